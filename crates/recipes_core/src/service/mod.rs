//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep HTTP adapters decoupled from storage details.

pub mod recipe_service;
