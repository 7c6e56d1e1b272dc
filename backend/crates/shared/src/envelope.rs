//! Response Envelope
//!
//! Every JSON endpoint answers with `{status, message, data}`:
//! `status = 0` on success, `status = 1` on failure with `data = null`.

use serde::{Deserialize, Serialize};

/// Status code carried by a successful envelope
pub const STATUS_OK: i32 = 0;
/// Status code carried by a failed envelope
pub const STATUS_FAILED: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Failed envelope with a human-readable reason
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_FAILED,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_serializes_data() {
        let json = serde_json::to_value(Envelope::ok("pong")).unwrap();
        assert_eq!(json["status"], 0);
        assert_eq!(json["data"], "pong");
    }

    #[test]
    fn test_failed_has_null_data() {
        let env: Envelope<()> = Envelope::failed("Invalid username or password");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], 1);
        assert!(json["data"].is_null());
        assert_eq!(json["message"], "Invalid username or password");
        assert!(!env.is_ok());
    }
}
