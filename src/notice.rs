use serde::Serialize;

use crate::errors::ItemsError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// User-facing outcome of an action
///
/// Every action ends in one of these instead of an error value; nothing the user
/// does can take the server down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl From<ItemsError> for Notice {
    // Bad input is the user's to fix, anything else is a storage problem
    fn from(err: ItemsError) -> Self {
        if err.is_validation() {
            log::warn!("{}", err);
            Notice::warning(err.to_string())
        } else {
            log::error!("{}", err);
            Notice::error(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_become_warnings() {
        let notice = Notice::from(ItemsError::ValidationFailure("Item and category are required.".into()));
        assert_eq!(notice, Notice::warning("Item and category are required."));
    }

    #[test]
    fn serializes_level_in_lowercase() {
        let json = serde_json::to_value(Notice::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "level": "error", "message": "boom" }));
    }
}
