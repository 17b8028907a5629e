use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Review state of a homework submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Reviewing,
    Approved,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Reviewing,
        HomeworkStatus::Approved,
        HomeworkStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HomeworkStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "approved" => Ok(HomeworkStatus::Approved),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(AppError::UnknownStatus(other.to_string())),
        }
    }
}

/// A single homework record as returned by the review API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub status: HomeworkStatus,
}

impl TryFrom<&Value> for Submission {
    type Error = AppError;

    /// Field presence is checked before the status value, name first.
    fn try_from(record: &Value) -> Result<Self, Self::Error> {
        let name = record
            .get("homework_name")
            .ok_or(AppError::UnknownField("homework_name"))?;
        let status = record.get("status").ok_or(AppError::UnknownField("status"))?;

        let name = match name {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let status = match status {
            Value::String(s) => s.parse()?,
            other => return Err(AppError::UnknownStatus(other.to_string())),
        };

        Ok(Self { name, status })
    }
}
