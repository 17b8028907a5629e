pub mod client;
pub mod formatter;
pub mod poller;
pub mod validator;
