//! Core contact types.
//!
//! A [`Contact`] is owned by the store; everything else works on clones.
//! [`ContactUpdate`] turns a submitted form into a partial update.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Submitted form fields, keyed by field name.
pub type FormData = BTreeMap<String, String>;

/// Number of hex characters kept from a fresh UUID.
const ID_LEN: usize = 8;

/// Stable identifier of a contact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh short identifier.
    ///
    /// Uniqueness against existing contacts is the store's job.
    #[must_use]
    pub fn generate() -> Self {
        let simple = uuid::Uuid::new_v4().simple().to_string();
        Self(simple[..ID_LEN].to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A single entry in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique, stable identifier.
    pub id: ContactId,
    /// First name.
    pub first: String,
    /// Last name.
    pub last: String,
    /// Social handle, e.g. `@jack`.
    pub twitter: String,
    /// Avatar URL.
    pub avatar: String,
    /// Free-text notes.
    pub notes: String,
    /// Whether the contact is starred.
    pub favorite: bool,
    /// When the contact was created.
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Create a contact with empty fields.
    #[must_use]
    pub fn empty(id: ContactId) -> Self {
        Self {
            id,
            first: String::new(),
            last: String::new(),
            twitter: String::new(),
            avatar: String::new(),
            notes: String::new(),
            favorite: false,
            created_at: Utc::now(),
        }
    }

    /// Name shown in listings, `None` when both name fields are empty.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match (self.first.is_empty(), self.last.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.first.clone()),
            (true, false) => Some(self.last.clone()),
            (false, false) => Some(format!("{} {}", self.first, self.last)),
        }
    }

    /// Case-insensitive substring match against first or last name.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.first.to_lowercase().contains(&needle) || self.last.to_lowercase().contains(&needle)
    }
}

/// Partial update built from submitted form fields.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    /// New first name.
    pub first: Option<String>,
    /// New last name.
    pub last: Option<String>,
    /// New social handle.
    pub twitter: Option<String>,
    /// New avatar URL.
    pub avatar: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New favorite flag.
    pub favorite: Option<bool>,
}

impl ContactUpdate {
    /// Interpret a submitted form. Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `favorite` is not a recognizable boolean.
    pub fn from_form(form: &FormData) -> Result<Self> {
        let text = |name: &str| form.get(name).cloned();
        let favorite = form
            .get("favorite")
            .map(|value| parse_flag("favorite", value))
            .transpose()?;

        Ok(Self {
            first: text("first"),
            last: text("last"),
            twitter: text("twitter"),
            avatar: text("avatar"),
            notes: text("notes"),
            favorite,
        })
    }

    /// Merge the present fields into `contact`.
    pub fn apply(&self, contact: &mut Contact) {
        if let Some(first) = &self.first {
            contact.first.clone_from(first);
        }
        if let Some(last) = &self.last {
            contact.last.clone_from(last);
        }
        if let Some(twitter) = &self.twitter {
            contact.twitter.clone_from(twitter);
        }
        if let Some(avatar) = &self.avatar {
            contact.avatar.clone_from(avatar);
        }
        if let Some(notes) = &self.notes {
            contact.notes.clone_from(notes);
        }
        if let Some(favorite) = self.favorite {
            contact.favorite = favorite;
        }
    }
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        other => Err(Error::invalid_field(
            field,
            format!("expected true or false, got '{other}'"),
        )),
    }
}
