//! `recipebox` - A minimal recipe collection HTTP service
//!
//! This library provides the recipe model, the whole-file JSON store, the
//! recipe book that serializes writes, and the axum router exposing them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod book;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod recipe;
pub mod server;
pub mod storage;

pub use book::{ReadPolicy, RecipeBook};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recipe::{NewRecipe, Recipe};
pub use storage::{FileStore, MemoryStore, RecipeStore, StoreStats};
