use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Plain acknowledgement body, e.g. `{"status": "ok"}`.
#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct StatusDto {
    pub status: String,
}

impl StatusDto {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}
