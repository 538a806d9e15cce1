//! Database schema definitions

/// SQL schema for the category database
pub const SCHEMA_SQL: &str = r#"
-- Crawled categories, in crawl order
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    saved_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_categories_position ON categories(position);

-- Stations per category, in page order
CREATE TABLE IF NOT EXISTS stations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    name TEXT NOT NULL,
    page_url TEXT,
    playlist_url TEXT,
    local_playlist TEXT,
    genres TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_stations_category ON stations(category_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
