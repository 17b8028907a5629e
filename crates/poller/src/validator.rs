//! Shape check for status API payloads.

use serde_json::Value;

use hwbot_common::error::{AppError, ShapeViolation};

/// Extract the submission records from a decoded payload, most recent first.
///
/// An empty `homeworks` list is an error rather than a quiet cycle: the API
/// window always covers the submission being tracked.
pub fn extract_submissions(payload: &Value) -> Result<&[Value], AppError> {
    let object = payload
        .as_object()
        .ok_or(AppError::Shape(ShapeViolation::NotAnObject))?;

    let homeworks = object
        .get("homeworks")
        .ok_or(AppError::Shape(ShapeViolation::MissingHomeworks))?
        .as_array()
        .ok_or(AppError::Shape(ShapeViolation::HomeworksNotAList))?;

    if homeworks.is_empty() {
        return Err(AppError::Shape(ShapeViolation::NoSubmissions));
    }

    Ok(homeworks.as_slice())
}
