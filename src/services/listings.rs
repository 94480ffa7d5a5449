use crate::db::{DbPool, queries, with_conn};
use crate::error::{AppError, Result};
use crate::models::{CreateHome, Home, HomeDetail, HomeFilters, HomeSummary, Realtor, UpdateHome};

fn home_not_found() -> AppError {
    AppError::NotFound("Home not found".into())
}

/// CRUD and search over listings.
#[derive(Clone)]
pub struct ListingService {
    db: DbPool,
}

impl ListingService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Search listings. No matches is reported as `NotFound`.
    pub async fn list(&self, filters: HomeFilters) -> Result<Vec<HomeSummary>> {
        let homes = with_conn(&self.db, move |conn| queries::list_homes(conn, &filters)).await?;
        if homes.is_empty() {
            return Err(AppError::NotFound("No homes match the given filters".into()));
        }
        Ok(homes)
    }

    /// A listing together with its images, in insertion order.
    pub async fn detail(&self, id: i64) -> Result<HomeDetail> {
        with_conn(&self.db, move |conn| {
            let home = queries::get_home_by_id(conn, id)?.ok_or_else(home_not_found)?;
            let images = queries::list_images_for_home(conn, id)?;
            Ok(HomeDetail { home, images })
        })
        .await
    }

    /// Create a listing owned by `realtor_id` together with its images.
    pub async fn create(&self, input: CreateHome, realtor_id: i64) -> Result<Home> {
        let home =
            with_conn(&self.db, move |conn| queries::create_home(conn, &input, realtor_id)).await?;
        tracing::info!(home_id = home.id, realtor_id, "Created home");
        Ok(home)
    }

    /// Apply the provided fields; everything else keeps its stored value.
    pub async fn update(&self, id: i64, input: UpdateHome) -> Result<Home> {
        with_conn(&self.db, move |conn| {
            if queries::get_home_by_id(conn, id)?.is_none() {
                return Err(home_not_found());
            }
            queries::update_home(conn, id, &input)?;
            queries::get_home_by_id(conn, id)?.ok_or_else(home_not_found)
        })
        .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let deleted = with_conn(&self.db, move |conn| queries::delete_home(conn, id)).await?;
        if !deleted {
            return Err(home_not_found());
        }
        tracing::info!(home_id = id, "Deleted home");
        Ok(())
    }

    /// The realtor who owns a listing.
    pub async fn owner_of(&self, id: i64) -> Result<Realtor> {
        with_conn(&self.db, move |conn| queries::get_realtor_by_home_id(conn, id))
            .await?
            .ok_or_else(home_not_found)
    }
}
