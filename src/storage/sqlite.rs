//! SQLite-backed category store

use crate::model::{Category, Station};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{CategoryStore, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Name of the database file inside the storage directory
const DB_FILE: &str = "categories.db";

/// Subdirectory holding downloaded playlist files
const PLAYLISTS_DIR: &str = "playlists";

/// SQLite storage backend rooted at one base directory
///
/// The directory holds `categories.db` plus a `playlists/` subdirectory of
/// previously downloaded playlist files that enrichment links back to
/// stations.
pub struct SqliteStore {
    conn: Connection,
    playlists_dir: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the store under `base_dir`
    pub fn open(base_dir: &Path) -> StorageResult<Self> {
        std::fs::create_dir_all(base_dir)?;
        let conn = Connection::open(base_dir.join(DB_FILE))?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self {
            conn,
            playlists_dir: base_dir.join(PLAYLISTS_DIR),
        })
    }

    /// Directory where playlist artifacts are expected
    pub fn playlists_dir(&self) -> &Path {
        &self.playlists_dir
    }

    fn load_stations(&self, category_id: i64) -> StorageResult<Vec<Station>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, page_url, playlist_url, local_playlist, genres
             FROM stations WHERE category_id = ?1 ORDER BY position",
        )?;

        let rows = stmt.query_map(params![category_id], |row| {
            Ok(Station {
                name: row.get(0)?,
                page_url: row.get(1)?,
                playlist_url: row.get(2)?,
                local_playlist: row.get::<_, Option<String>>(3)?.map(PathBuf::from),
                genres: split_genres(&row.get::<_, String>(4)?),
            })
        })?;

        let mut stations = Vec::new();
        for station in rows {
            stations.push(station?);
        }
        Ok(stations)
    }
}

impl CategoryStore for SqliteStore {
    fn load(&self) -> StorageResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY position")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut categories = Vec::new();
        for row in rows {
            let (id, name) = row?;
            categories.push(Category {
                name,
                stations: self.load_stations(id)?,
            });
        }
        Ok(categories)
    }

    fn save(&mut self, categories: &[Category]) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM stations", [])?;
        tx.execute("DELETE FROM categories", [])?;

        for (position, category) in categories.iter().enumerate() {
            tx.execute(
                "INSERT INTO categories (position, name, saved_at) VALUES (?1, ?2, ?3)",
                params![position as i64, category.name, now],
            )?;
            let category_id = tx.last_insert_rowid();

            for (station_pos, station) in category.stations.iter().enumerate() {
                tx.execute(
                    "INSERT INTO stations
                     (category_id, position, name, page_url, playlist_url, local_playlist, genres)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        category_id,
                        station_pos as i64,
                        station.name,
                        station.page_url,
                        station.playlist_url,
                        station
                            .local_playlist
                            .as_ref()
                            .map(|p| p.to_string_lossy().into_owned()),
                        station.genres.join("\n"),
                    ],
                )?;
            }
        }

        tx.commit()?;
        tracing::debug!("Saved {} categories", categories.len());
        Ok(())
    }

    fn attach_playlists(&self, mut category: Category) -> StorageResult<Category> {
        for station in &mut category.stations {
            if station.local_playlist.is_some() {
                continue;
            }
            let Some(playlist_url) = &station.playlist_url else {
                continue;
            };
            let Some(file_name) = playlist_file_name(playlist_url) else {
                continue;
            };

            let path = self.playlists_dir.join(file_name);
            if path.is_file() {
                station.local_playlist = Some(path);
            }
        }
        Ok(category)
    }

    fn clear(&mut self) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM stations", [])?;
        tx.execute("DELETE FROM categories", [])?;
        tx.commit()?;
        Ok(())
    }
}

/// File name a playlist URL would have been downloaded under
fn playlist_file_name(playlist_url: &str) -> Option<&str> {
    playlist_url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}

fn split_genres(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        Vec::new()
    } else {
        joined.split('\n').map(str::to_string).collect()
    }
}
