use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum UserType {
    Buyer,
    Realtor,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
}

impl CreateUser {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        if !self.email.contains('@') {
            return Err(AppError::BadRequest("email must be a valid address".into()));
        }
        if self.phone.trim().is_empty() {
            return Err(AppError::BadRequest("phone must not be empty".into()));
        }
        Ok(())
    }
}

/// Contact details of the realtor who owns a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Realtor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}
