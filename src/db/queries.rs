use chrono::Utc;
use rusqlite::{Connection, params, types::Value};

use crate::error::Result;
use crate::models::*;

use super::from_row::{
    HOME_COLS, HOME_SUMMARY_COLS, IMAGE_COLS, MESSAGE_COLS, REALTOR_COLS, USER_COLS, query_all,
    query_one,
};

fn now() -> i64 {
    Utc::now().timestamp()
}

// ============ Users ============

pub fn create_user(conn: &Connection, input: &CreateUser) -> Result<User> {
    let now = now();

    conn.execute(
        "INSERT INTO users (name, email, phone, user_type, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            &input.name,
            &input.email,
            &input.phone,
            input.user_type.as_ref(),
            now,
            now
        ],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        name: input.name.clone(),
        email: input.email.clone(),
        phone: input.phone.clone(),
        user_type: input.user_type,
        created_at: now,
        updated_at: now,
    })
}

pub fn get_user_by_id(conn: &Connection, id: i64) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLS),
        params![id],
    )
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE email = ?1", USER_COLS),
        params![email],
    )
}

// ============ Homes ============

/// Search homes. Each filter that is set narrows the result; none set returns all.
pub fn list_homes(conn: &Connection, filters: &HomeFilters) -> Result<Vec<HomeSummary>> {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(city) = filters.city.as_deref().filter(|c| !c.trim().is_empty()) {
        conditions.push("h.city = ?");
        values.push(city.to_string().into());
    }
    if let Some(min_price) = filters.min_price {
        conditions.push("h.price >= ?");
        values.push(min_price.into());
    }
    if let Some(max_price) = filters.max_price {
        conditions.push("h.price <= ?");
        values.push(max_price.into());
    }
    if let Some(property_type) = filters.property_type {
        conditions.push("h.property_type = ?");
        values.push(property_type.as_ref().to_string().into());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    query_all(
        conn,
        &format!(
            "SELECT {} FROM homes h{} ORDER BY h.id",
            HOME_SUMMARY_COLS, where_clause
        ),
        rusqlite::params_from_iter(values),
    )
}

pub fn get_home_by_id(conn: &Connection, id: i64) -> Result<Option<Home>> {
    query_one(
        conn,
        &format!("SELECT {} FROM homes WHERE id = ?1", HOME_COLS),
        params![id],
    )
}

/// Create a home and its images in one transaction.
///
/// If any image insert fails the home row is rolled back with it.
pub fn create_home(conn: &mut Connection, input: &CreateHome, realtor_id: i64) -> Result<Home> {
    let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
    let now = now();

    tx.execute(
        "INSERT INTO homes (address, number_of_bedrooms, number_of_bathrooms, city, listed_date,
                            price, land_size, property_type, realtor_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            &input.address,
            input.number_of_bedrooms,
            input.number_of_bathrooms,
            &input.city,
            now,
            input.price,
            input.land_size,
            input.property_type.as_ref(),
            realtor_id,
            now,
            now
        ],
    )?;
    let home_id = tx.last_insert_rowid();

    {
        let mut stmt =
            tx.prepare("INSERT INTO images (url, home_id, created_at) VALUES (?1, ?2, ?3)")?;
        for image in &input.images {
            stmt.execute(params![&image.url, home_id, now])?;
        }
    }

    tx.commit()?;

    Ok(Home {
        id: home_id,
        address: input.address.clone(),
        number_of_bedrooms: input.number_of_bedrooms,
        number_of_bathrooms: input.number_of_bathrooms,
        city: input.city.clone(),
        listed_date: now,
        price: input.price,
        land_size: input.land_size,
        property_type: input.property_type,
        realtor_id,
        created_at: now,
        updated_at: now,
    })
}

/// Column assignments for the fields present in a partial listing update.
fn home_changes(input: &UpdateHome) -> Vec<(&'static str, Value)> {
    let mut changes: Vec<(&'static str, Value)> = Vec::new();
    if let Some(address) = &input.address {
        changes.push(("address", address.clone().into()));
    }
    if let Some(bedrooms) = input.number_of_bedrooms {
        changes.push(("number_of_bedrooms", bedrooms.into()));
    }
    if let Some(bathrooms) = input.number_of_bathrooms {
        changes.push(("number_of_bathrooms", bathrooms.into()));
    }
    if let Some(city) = &input.city {
        changes.push(("city", city.clone().into()));
    }
    if let Some(price) = input.price {
        changes.push(("price", price.into()));
    }
    if let Some(land_size) = input.land_size {
        changes.push(("land_size", land_size.into()));
    }
    if let Some(property_type) = input.property_type {
        changes.push(("property_type", property_type.as_ref().to_string().into()));
    }
    changes
}

/// Write the provided fields and bump `updated_at`. Returns false when the
/// home doesn't exist or there was nothing to write.
pub fn update_home(conn: &Connection, id: i64, input: &UpdateHome) -> Result<bool> {
    let mut changes = home_changes(input);
    if changes.is_empty() {
        return Ok(false);
    }
    changes.push(("updated_at", now().into()));

    let assignments = changes
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");
    let mut values: Vec<Value> = changes.into_iter().map(|(_, value)| value).collect();
    values.push(id.into());

    let affected = conn.execute(
        &format!("UPDATE homes SET {} WHERE id = ?", assignments),
        rusqlite::params_from_iter(values),
    )?;
    Ok(affected > 0)
}

/// Delete a home. Its images and messages go with it.
pub fn delete_home(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM homes WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Contact details of the realtor who listed a home.
pub fn get_realtor_by_home_id(conn: &Connection, home_id: i64) -> Result<Option<Realtor>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM homes h JOIN users u ON u.id = h.realtor_id WHERE h.id = ?1",
            REALTOR_COLS
        ),
        params![home_id],
    )
}

// ============ Images ============

pub fn list_images_for_home(conn: &Connection, home_id: i64) -> Result<Vec<Image>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM images WHERE home_id = ?1 ORDER BY id",
            IMAGE_COLS
        ),
        params![home_id],
    )
}

// ============ Messages ============

pub fn create_message(
    conn: &Connection,
    home_id: i64,
    realtor_id: i64,
    buyer_id: i64,
    message: &str,
) -> Result<Message> {
    let now = now();

    conn.execute(
        "INSERT INTO messages (message, home_id, realtor_id, buyer_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![message, home_id, realtor_id, buyer_id, now],
    )?;

    Ok(Message {
        id: conn.last_insert_rowid(),
        message: message.to_string(),
        home_id,
        realtor_id,
        buyer_id,
        created_at: now,
    })
}

pub fn list_messages_for_home(conn: &Connection, home_id: i64) -> Result<Vec<Message>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM messages WHERE home_id = ?1 ORDER BY id",
            MESSAGE_COLS
        ),
        params![home_id],
    )
}
