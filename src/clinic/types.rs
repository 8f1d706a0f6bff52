//! Response shapes served by the API.

use serde::{Deserialize, Serialize};

/// A medical service offered by the clinic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Emoji shown on the service card.
    pub icon: String,
}

/// A doctor on staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    /// Human-readable experience, e.g. "15+ years".
    pub experience: String,
    pub description: String,
}

/// `{success, message}` envelope used by form acknowledgements and errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub success: bool,
    pub message: String,
}

impl Reply {
    /// Successful acknowledgement.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failure with a caller-facing message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_serializes_flat() {
        let json = serde_json::to_value(Reply::failure("Endpoint not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Endpoint not found"})
        );
    }
}
