use crate::db::{DbPool, queries, with_conn};
use crate::error::{AppError, Result};
use crate::models::{Message, User};

/// Buyer-to-realtor messages about a listing.
#[derive(Clone)]
pub struct InquiryService {
    db: DbPool,
}

impl InquiryService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Record an inquiry addressed to whoever owns the listing right now.
    pub async fn create(&self, buyer: &User, home_id: i64, text: String) -> Result<Message> {
        let buyer_id = buyer.id;

        let message = with_conn(&self.db, move |conn| {
            let realtor = queries::get_realtor_by_home_id(conn, home_id)?
                .ok_or_else(|| AppError::NotFound("Home not found".into()))?;
            queries::create_message(conn, home_id, realtor.id, buyer_id, &text)
        })
        .await?;

        tracing::info!(
            message_id = message.id,
            home_id,
            buyer_id,
            realtor_id = message.realtor_id,
            "Created inquiry"
        );
        Ok(message)
    }

    /// Messages for a listing. No messages is reported as `NotFound`, same as
    /// an empty listing search.
    pub async fn list(&self, home_id: i64) -> Result<Vec<Message>> {
        let messages =
            with_conn(&self.db, move |conn| queries::list_messages_for_home(conn, home_id)).await?;
        if messages.is_empty() {
            return Err(AppError::NotFound("No messages for this home".into()));
        }
        Ok(messages)
    }
}
