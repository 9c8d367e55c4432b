//! `SQLite`-backed contact store.
//!
//! Persists contacts across process runs, the way the browser build kept
//! them in local storage.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::contact::{Contact, ContactId, ContactUpdate};
use crate::error::{Error, Result};

use super::{listing_order, migrations, ContactStore, Latency};

const CONTACT_COLUMNS: &str = "id, first, last, twitter, avatar, notes, favorite, created_at";

/// Contact store persisted in a `SQLite` database.
///
/// Queries run on tokio's blocking pool, one at a time.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
    latency: Latency,
}

impl SqliteStore {
    /// Open or create a contact database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self::from_connection(path, conn))
    }

    /// Create an in-memory database, mostly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;
        Ok(Self::from_connection(path, conn))
    }

    fn from_connection(path: PathBuf, conn: Connection) -> Self {
        Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
            latency: Latency::NONE,
        }
    }

    /// Delay every subsequent call by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        self.latency.wait().await;
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| Error::internal("database connection lock poisoned"))?;
            f(&conn)
        })
        .await
        .map_err(|err| Error::internal(format!("database task failed: {err}")))?
    }

    fn find(conn: &Connection, id: &ContactId) -> Result<Option<Contact>> {
        let contact = conn
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
                [id.as_str()],
                Self::row_to_contact,
            )
            .optional()?;
        Ok(contact)
    }

    fn exists(conn: &Connection, id: &ContactId) -> Result<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM contacts WHERE id = ?1",
            [id.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Convert a database row to a Contact struct.
    fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
        let id: String = row.get(0)?;
        let created_at_str: String = row.get(7)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Text,
                    Box::new(err),
                )
            })?;

        Ok(Contact {
            id: ContactId::new(id),
            first: row.get(1)?,
            last: row.get(2)?,
            twitter: row.get(3)?,
            avatar: row.get(4)?,
            notes: row.get(5)?,
            favorite: row.get(6)?,
            created_at,
        })
    }
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[async_trait::async_trait]
impl ContactStore for SqliteStore {
    /// Filters and sorts in Rust, the same way as [`super::MemoryStore`].
    /// `SQLite`'s `LIKE` and `NOCASE` fold only ASCII.
    async fn list_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>> {
        let mut contacts = self
            .with_conn(|conn| {
                let mut stmt = conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts"))?;
                let rows = stmt
                    .query_map([], Self::row_to_contact)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        if let Some(query) = query {
            contacts.retain(|contact| contact.matches_query(query));
        }
        contacts.sort_by(listing_order);
        Ok(contacts)
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        let id = id.clone();
        self.with_conn(move |conn| {
            Self::find(conn, &id)?.ok_or_else(|| Error::contact_not_found(id.as_str()))
        })
        .await
    }

    async fn create_contact(&self) -> Result<Contact> {
        let contact = self
            .with_conn(|conn| {
                let mut id = ContactId::generate();
                while Self::exists(conn, &id)? {
                    debug!("Regenerating colliding contact id {}", id);
                    id = ContactId::generate();
                }

                let contact = Contact::empty(id);
                conn.execute(
                    &format!(
                        "INSERT INTO contacts ({CONTACT_COLUMNS}) \
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                    ),
                    params![
                        contact.id.as_str(),
                        contact.first,
                        contact.last,
                        contact.twitter,
                        contact.avatar,
                        contact.notes,
                        contact.favorite,
                        timestamp(&contact.created_at),
                    ],
                )?;
                Ok(contact)
            })
            .await?;

        info!("Created contact {}", contact.id);
        Ok(contact)
    }

    async fn update_contact(&self, id: &ContactId, update: &ContactUpdate) -> Result<Contact> {
        let (id, update) = (id.clone(), update.clone());
        let contact = self
            .with_conn(move |conn| {
                let mut contact =
                    Self::find(conn, &id)?.ok_or_else(|| Error::contact_not_found(id.as_str()))?;
                update.apply(&mut contact);

                conn.execute(
                    r"
                    UPDATE contacts
                    SET first = ?2, last = ?3, twitter = ?4, avatar = ?5, notes = ?6, favorite = ?7
                    WHERE id = ?1
                    ",
                    params![
                        contact.id.as_str(),
                        contact.first,
                        contact.last,
                        contact.twitter,
                        contact.avatar,
                        contact.notes,
                        contact.favorite,
                    ],
                )?;
                Ok(contact)
            })
            .await?;

        info!("Updated contact {}", contact.id);
        Ok(contact)
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<bool> {
        let key = id.clone();
        let affected = self
            .with_conn(move |conn| {
                Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", [key.as_str()])?)
            })
            .await?;
        if affected > 0 {
            info!("Deleted contact {}", id);
        }
        Ok(affected > 0)
    }
}
