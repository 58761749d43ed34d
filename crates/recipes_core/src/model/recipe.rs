//! Recipe domain model.
//!
//! # Responsibility
//! - Define the canonical recipe record shared by memory and SQLite stores.
//! - Provide write-path validation used by the service layer.
//!
//! # Invariants
//! - `name` is never blank for a persisted recipe.
//! - `name` always derives a non-empty slug.
//! - Updates replace the whole record; there is no per-field tracking.

use crate::slug::slugify;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lookup key for a stored recipe.
///
/// Derived from `Recipe::name` by callers; stores treat it as opaque.
pub type RecipeId = String;

/// Canonical recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Human-readable title. Source of the recipe identifier.
    pub name: String,
    /// Free-form text.
    #[serde(default)]
    pub description: String,
}

/// Validation failures for recipe write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyName,
    UnsluggableName(String),
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "recipe name cannot be empty"),
            // Name stays out of the message; it ends up in logs.
            Self::UnsluggableName(_) => {
                write!(f, "recipe name has no characters usable in an identifier")
            }
        }
    }
}

impl Error for RecipeValidationError {}

impl Recipe {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Derives this recipe's identifier from its name.
    pub fn derive_id(&self) -> RecipeId {
        slugify(&self.name)
    }

    /// Validates invariants required before a store write.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is blank after trimming.
    /// - `UnsluggableName` when `name` produces an empty identifier.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecipeValidationError::EmptyName);
        }
        if self.derive_id().is_empty() {
            return Err(RecipeValidationError::UnsluggableName(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Recipe, RecipeValidationError};

    #[test]
    fn validate_accepts_regular_name() {
        let recipe = Recipe::new("Pasta Carbonara", "Classic Roman dish");
        assert!(recipe.validate().is_ok());
        assert_eq!(recipe.derive_id(), "pasta-carbonara");
    }

    #[test]
    fn validate_rejects_blank_and_symbol_only_names() {
        assert_eq!(
            Recipe::new("   ", "").validate(),
            Err(RecipeValidationError::EmptyName)
        );
        assert!(matches!(
            Recipe::new("!!!", "").validate(),
            Err(RecipeValidationError::UnsluggableName(name)) if name == "!!!"
        ));
    }

    #[test]
    fn validation_messages_do_not_echo_the_name() {
        let err = Recipe::new("?!?! ***", "").validate().unwrap_err();
        assert!(matches!(err, RecipeValidationError::UnsluggableName(_)));
        assert!(!err.to_string().contains("?!?!"));
        assert!(!err.to_string().contains("***"));
    }

    #[test]
    fn description_defaults_to_empty_when_missing() {
        let recipe: Recipe = serde_json::from_str(r#"{"name":"Toast"}"#).unwrap();
        assert_eq!(recipe, Recipe::new("Toast", ""));
    }
}
