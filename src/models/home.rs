use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, EnumString};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Residential,
    Condo,
}

/// A property listing. Every home has exactly one owning realtor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    pub id: i64,
    pub address: String,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub city: String,
    pub listed_date: i64,
    pub price: f64,
    pub land_size: f64,
    pub property_type: PropertyType,
    #[serde(skip_serializing)]
    pub realtor_id: i64,
    #[serde(skip_serializing)]
    pub created_at: i64,
    #[serde(skip_serializing)]
    pub updated_at: i64,
}

/// Search result row: the listing with the URL of its first image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSummary {
    pub id: i64,
    pub address: String,
    pub city: String,
    pub price: f64,
    pub property_type: PropertyType,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: i64,
    pub url: String,
    #[serde(skip_serializing)]
    pub home_id: i64,
    #[serde(skip_serializing)]
    pub created_at: i64,
}

/// A single listing as returned by `GET /home/{id}`, with all of its images.
#[derive(Debug, Clone, Serialize)]
pub struct HomeDetail {
    #[serde(flatten)]
    pub home: Home,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    pub url: String,
}

/// Search filters for `GET /home`. Absent or blank fields don't constrain
/// the search, so `?city=&minPrice=` is the same as no query at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFilters {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub property_type: Option<PropertyType>,
}

/// Query-string field where an empty value means "not given".
fn blank_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl HomeFilters {
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(AppError::BadRequest(
                    "minPrice must not exceed maxPrice".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHome {
    pub address: String,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: f64,
    pub city: String,
    pub price: f64,
    pub land_size: f64,
    pub property_type: PropertyType,
    #[serde(default)]
    pub images: Vec<CreateImage>,
}

impl CreateHome {
    pub fn validate(&self) -> Result<()> {
        require_text("address", &self.address)?;
        require_text("city", &self.city)?;
        require_positive("numberOfBedrooms", self.number_of_bedrooms as f64)?;
        require_positive("numberOfBathrooms", self.number_of_bathrooms)?;
        require_positive("price", self.price)?;
        require_positive("landSize", self.land_size)?;
        for image in &self.images {
            require_text("images.url", &image.url)?;
        }
        Ok(())
    }
}

/// Partial update. Only the fields present in the body are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHome {
    pub address: Option<String>,
    pub number_of_bedrooms: Option<i32>,
    pub number_of_bathrooms: Option<f64>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub land_size: Option<f64>,
    pub property_type: Option<PropertyType>,
}

impl UpdateHome {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.number_of_bedrooms.is_none()
            && self.number_of_bathrooms.is_none()
            && self.city.is_none()
            && self.price.is_none()
            && self.land_size.is_none()
            && self.property_type.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(AppError::BadRequest("No fields to update".into()));
        }
        if let Some(address) = &self.address {
            require_text("address", address)?;
        }
        if let Some(city) = &self.city {
            require_text("city", city)?;
        }
        if let Some(bedrooms) = self.number_of_bedrooms {
            require_positive("numberOfBedrooms", bedrooms as f64)?;
        }
        if let Some(bathrooms) = self.number_of_bathrooms {
            require_positive("numberOfBathrooms", bathrooms)?;
        }
        if let Some(price) = self.price {
            require_positive("price", price)?;
        }
        if let Some(land_size) = self.land_size {
            require_positive("landSize", land_size)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::BadRequest(format!("{} must be a positive number", field)));
    }
    Ok(())
}
