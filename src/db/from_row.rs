//! Row mapping for the query layer.
//!
//! Each `*_COLS` constant lists columns in the order the matching
//! `FromRow` impl reads them.

use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, Params, Row, types::Type};

use crate::error::Result;
use crate::models::{Home, HomeSummary, Image, Message, Realtor, User};

pub const USER_COLS: &str = "id, name, email, phone, user_type, created_at, updated_at";

pub const HOME_COLS: &str = "id, address, number_of_bedrooms, number_of_bathrooms, city, \
     listed_date, price, land_size, property_type, realtor_id, created_at, updated_at";

/// Summary columns plus the URL of the lowest-id image, if any.
pub const HOME_SUMMARY_COLS: &str = "h.id, h.address, h.city, h.price, h.property_type, \
     h.number_of_bedrooms, h.number_of_bathrooms, \
     (SELECT i.url FROM images i WHERE i.home_id = h.id ORDER BY i.id LIMIT 1)";

pub const IMAGE_COLS: &str = "id, url, home_id, created_at";

pub const MESSAGE_COLS: &str = "id, message, home_id, realtor_id, buyer_id, created_at";

pub const REALTOR_COLS: &str = "u.id, u.name, u.email, u.phone";

pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

fn parse_enum<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl FromRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            user_type: parse_enum(row, 4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl FromRow for Home {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Home {
            id: row.get(0)?,
            address: row.get(1)?,
            number_of_bedrooms: row.get(2)?,
            number_of_bathrooms: row.get(3)?,
            city: row.get(4)?,
            listed_date: row.get(5)?,
            price: row.get(6)?,
            land_size: row.get(7)?,
            property_type: parse_enum(row, 8)?,
            realtor_id: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }
}

impl FromRow for HomeSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(HomeSummary {
            id: row.get(0)?,
            address: row.get(1)?,
            city: row.get(2)?,
            price: row.get(3)?,
            property_type: parse_enum(row, 4)?,
            number_of_bedrooms: row.get(5)?,
            number_of_bathrooms: row.get(6)?,
            image: row.get(7)?,
        })
    }
}

impl FromRow for Image {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Image {
            id: row.get(0)?,
            url: row.get(1)?,
            home_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl FromRow for Message {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Message {
            id: row.get(0)?,
            message: row.get(1)?,
            home_id: row.get(2)?,
            realtor_id: row.get(3)?,
            buyer_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

impl FromRow for Realtor {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Realtor {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
        })
    }
}

pub fn query_one<T: FromRow>(conn: &Connection, sql: &str, params: impl Params) -> Result<Option<T>> {
    let row = conn
        .query_row(sql, params, |row| T::from_row(row))
        .optional()?;
    Ok(row)
}

pub fn query_all<T: FromRow>(conn: &Connection, sql: &str, params: impl Params) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| T::from_row(row))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
