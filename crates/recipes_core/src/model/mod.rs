//! Recipe domain model.
//!
//! # Responsibility
//! - Define the single record type managed by every store variant.
//!
//! # Invariants
//! - Every stored recipe is addressed by a slug-shaped `RecipeId`.

pub mod recipe;
