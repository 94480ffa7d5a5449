mod from_row;
pub mod queries;
mod schema;

use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::jwt::TokenKeys;
use crate::policy::AccessPolicy;
use crate::services::{InquiryService, ListingService};

pub use schema::init_db;

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub tokens: TokenKeys,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    pub fn new(db: DbPool, tokens: TokenKeys, policy: AccessPolicy) -> Self {
        Self {
            db,
            tokens,
            policy: Arc::new(policy),
        }
    }

    pub fn listings(&self) -> ListingService {
        ListingService::new(self.db.clone())
    }

    pub fn inquiries(&self) -> InquiryService {
        InquiryService::new(self.db.clone())
    }
}

/// Connection manager with foreign keys enforced on every connection.
pub fn connection_manager(path: &str) -> SqliteConnectionManager {
    let manager = if path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(path)
    };
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

pub fn create_pool(path: &str) -> Result<DbPool> {
    let pool = Pool::builder().build(connection_manager(path))?;
    Ok(pool)
}

/// Run blocking data-store work off the async runtime.
///
/// The connection is checked out inside the blocking task and returned to the
/// pool when the closure finishes.
pub async fn with_conn<T, F>(pool: &DbPool, f: F) -> Result<T>
where
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut *conn)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
}
