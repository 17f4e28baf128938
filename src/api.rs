use serde::{Deserialize, Serialize};

/// Body of every 400 and 500 response: `{"error":{"message":"..."}}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(msg: &str) -> Self {
        ErrorResponse {
            error: ErrorMessage {
                message: msg.to_owned(),
            },
        }
    }
}

/// Body of a 401: `{"error":"Unauthorized request"}`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnauthorizedResponse {
    pub error: String,
}

impl UnauthorizedResponse {
    pub fn new(msg: &str) -> Self {
        UnauthorizedResponse { error: msg.to_owned() }
    }
}
