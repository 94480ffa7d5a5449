use axum::{
    extract::{Extension, State},
    http::StatusCode,
};

use crate::db::AppState;
use crate::error::Result;
use crate::extractors::{Json, Path, Query};
use crate::middleware::AuthContext;
use crate::models::{CreateHome, Home, HomeDetail, HomeFilters, HomeSummary, UpdateHome};
use crate::policy::check_ownership;

pub async fn get_homes(
    State(state): State<AppState>,
    Query(filters): Query<HomeFilters>,
) -> Result<Json<Vec<HomeSummary>>> {
    filters.validate()?;
    let homes = state.listings().list(filters).await?;
    Ok(Json(homes))
}

pub async fn get_home(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HomeDetail>> {
    let home = state.listings().detail(id).await?;
    Ok(Json(home))
}

pub async fn create_home(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(input): Json<CreateHome>,
) -> Result<(StatusCode, Json<Home>)> {
    input.validate()?;
    let home = state.listings().create(input, ctx.user.id).await?;
    Ok((StatusCode::CREATED, Json(home)))
}

pub async fn update_home(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateHome>,
) -> Result<Json<Home>> {
    let listings = state.listings();
    let realtor = listings.owner_of(id).await?;
    check_ownership(realtor.id, ctx.user.id)?;
    input.validate()?;

    let home = listings.update(id, input).await?;
    Ok(Json(home))
}

pub async fn delete_home(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let listings = state.listings();
    let realtor = listings.owner_of(id).await?;
    check_ownership(realtor.id, ctx.user.id)?;

    listings.delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
