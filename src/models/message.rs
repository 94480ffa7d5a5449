use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// A buyer's inquiry about a listing, addressed to the listing's realtor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub message: String,
    pub home_id: i64,
    pub realtor_id: i64,
    pub buyer_id: i64,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateInquiry {
    pub message: String,
}

impl CreateInquiry {
    pub fn validate(&self) -> Result<()> {
        if self.message.trim().is_empty() {
            return Err(AppError::BadRequest("message must not be empty".into()));
        }
        Ok(())
    }
}
