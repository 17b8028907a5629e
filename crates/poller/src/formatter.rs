use serde_json::Value;

use hwbot_common::error::AppError;
use hwbot_common::types::{HomeworkStatus, Submission};

/// Text shown to the student for each review status.
pub fn verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
        HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
        HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
    }
}

/// Render the chat message announcing a submission's current status.
pub fn format_status_change(record: &Value) -> Result<String, AppError> {
    let submission = Submission::try_from(record)?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        submission.name,
        verdict(submission.status)
    ))
}
