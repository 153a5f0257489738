//! Storage layer for recipebox.
//!
//! The whole recipe collection is read and written as one unit. Every write
//! replaces the previous contents entirely; there is no incremental update,
//! no locking between processes and no temp-file-then-rename step, so a crash
//! mid-write can leave a truncated file behind.

mod file;
mod memory;

use async_trait::async_trait;
use tracing::error;

use crate::error::Result;
use crate::recipe::Recipe;

pub use file::{FileStore, StoreStats};
pub use memory::MemoryStore;

/// Whole-collection persistence for recipes.
#[async_trait]
pub trait RecipeStore: Send + Sync + std::fmt::Debug {
    /// Human-readable location of the backing data, for logs.
    fn describe(&self) -> String;

    /// Read the full collection, surfacing any failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data cannot be read or parsed.
    async fn load(&self) -> Result<Vec<Recipe>>;

    /// Replace the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing data cannot be written. The previous
    /// contents may already be lost at that point.
    async fn write(&self, recipes: &[Recipe]) -> Result<()>;

    /// Read the full collection, treating any failure as an empty collection.
    ///
    /// Failures are logged and never reach the caller.
    async fn read(&self) -> Vec<Recipe> {
        match self.load().await {
            Ok(recipes) => recipes,
            Err(e) => {
                error!(store = %self.describe(), "Read error: {e}");
                Vec::new()
            }
        }
    }
}
