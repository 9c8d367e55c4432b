//! Tagged result of a loader or action.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// What a loader or action produced: data to render, or a place to go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Data handed to the route's view.
    Data {
        /// The payload.
        value: Value,
    },
    /// Navigate to `to` instead of rendering.
    Redirect {
        /// Target path.
        to: String,
    },
}

impl Outcome {
    /// Wrap any serializable value as view data.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized to JSON.
    pub fn data(value: impl Serialize) -> Result<Self> {
        Ok(Self::Data {
            value: serde_json::to_value(value)?,
        })
    }

    /// A redirect directive.
    #[must_use]
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect { to: to.into() }
    }
}
