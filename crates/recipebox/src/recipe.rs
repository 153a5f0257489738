//! Core recipe types for recipebox.
//!
//! This module defines the stored [`Recipe`] record and the validated
//! [`NewRecipe`] payload accepted by the create operation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{Error, Result};

/// A stored recipe.
///
/// Field order matches the persisted and wire form:
/// `id`, `title`, `ingredients`, `instructions`, `cookTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Creation time in milliseconds since the Unix epoch.
    ///
    /// Two recipes created within the same millisecond share an id.
    pub id: i64,

    /// Display title.
    pub title: String,

    /// Ingredients in the order given. Items are usually strings but any
    /// JSON value is kept as-is.
    pub ingredients: Vec<Value>,

    /// Free-form preparation instructions.
    pub instructions: String,

    /// Cooking time, kept exactly as the client sent it.
    pub cook_time: Number,
}

/// A validated create payload: a [`Recipe`] without its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Display title.
    pub title: String,
    /// Ingredients in the order given.
    pub ingredients: Vec<Value>,
    /// Free-form preparation instructions.
    pub instructions: String,
    /// Cooking time.
    pub cook_time: Number,
}

impl NewRecipe {
    /// Parse and validate a raw request body.
    ///
    /// The body must be a JSON object carrying `title` (string),
    /// `ingredients` (array of any values), `instructions` (string) and
    /// `cookTime` (number). Any other fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] if the body is not JSON, is not an
    /// object, or any required field is missing or has the wrong shape.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| Error::invalid_recipe(format!("body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] on any shape mismatch.
    pub fn from_value(value: Value) -> Result<Self> {
        // Structs also deserialize from sequences, so insist on an object.
        if !value.is_object() {
            return Err(Error::invalid_recipe("body must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| Error::invalid_recipe(e.to_string()))
    }

    /// Turn this payload into a stored recipe with the given id.
    #[must_use]
    pub fn with_id(self, id: i64) -> Recipe {
        Recipe {
            id,
            title: self.title,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cook_time: self.cook_time,
        }
    }

    /// Turn this payload into a stored recipe stamped with the current time.
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        self.with_id(Utc::now().timestamp_millis())
    }
}
