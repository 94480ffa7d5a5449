use axum::{
    extract::{Extension, State},
    http::StatusCode,
};

use crate::db::AppState;
use crate::error::Result;
use crate::extractors::{Json, Path};
use crate::middleware::AuthContext;
use crate::models::{CreateInquiry, Message};
use crate::policy::check_ownership;

pub async fn inquire(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(home_id): Path<i64>,
    Json(input): Json<CreateInquiry>,
) -> Result<(StatusCode, Json<Message>)> {
    input.validate()?;
    let message = state
        .inquiries()
        .create(&ctx.user, home_id, input.message)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Messages for a listing, visible only to the realtor who owns it.
pub async fn get_home_messages(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(home_id): Path<i64>,
) -> Result<Json<Vec<Message>>> {
    let realtor = state.listings().owner_of(home_id).await?;
    check_ownership(realtor.id, ctx.user.id)?;

    let messages = state.inquiries().list(home_id).await?;
    Ok(Json(messages))
}
