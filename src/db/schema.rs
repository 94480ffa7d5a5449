use rusqlite::Connection;

use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT NOT NULL,
    user_type TEXT NOT NULL CHECK (user_type IN ('BUYER', 'REALTOR', 'ADMIN')),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS homes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL,
    number_of_bedrooms INTEGER NOT NULL,
    number_of_bathrooms REAL NOT NULL,
    city TEXT NOT NULL,
    listed_date INTEGER NOT NULL,
    price REAL NOT NULL,
    land_size REAL NOT NULL,
    property_type TEXT NOT NULL CHECK (property_type IN ('RESIDENTIAL', 'CONDO')),
    realtor_id INTEGER NOT NULL REFERENCES users(id),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_homes_realtor ON homes(realtor_id);
CREATE INDEX IF NOT EXISTS idx_homes_city ON homes(city);

CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL CHECK (length(url) > 0),
    home_id INTEGER NOT NULL REFERENCES homes(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_images_home ON images(home_id);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT NOT NULL,
    home_id INTEGER NOT NULL REFERENCES homes(id) ON DELETE CASCADE,
    realtor_id INTEGER NOT NULL REFERENCES users(id),
    buyer_id INTEGER NOT NULL REFERENCES users(id),
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_home ON messages(home_id);
"#;

/// Create all tables. Safe to run on every startup.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
