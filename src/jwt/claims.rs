use serde::{Deserialize, Serialize};

/// Custom claims carried in the token body next to `iat`/`exp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub name: String,
    pub id: i64,
}

/// Identity extracted from a verified token. Exists for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub user_id: i64,
    pub name: String,
    pub issued_at: i64,
    pub expires_at: i64,
}
