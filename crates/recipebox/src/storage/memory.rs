//! In-memory recipe store, used as a test fake.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::RecipeStore;
use crate::error::{Error, Result};
use crate::recipe::Recipe;

/// A recipe store that keeps the collection in process memory.
///
/// Reads and writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: Mutex<Vec<Recipe>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with recipes.
    #[must_use]
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            ..Self::default()
        }
    }

    /// Make every subsequent `load` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `write` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of the current collection, bypassing failure switches.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Recipe> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Recipe>> {
        self.recipes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    fn describe(&self) -> String {
        ":memory:".to_string()
    }

    async fn load(&self) -> Result<Vec<Recipe>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Io(io::Error::other("reads disabled")));
        }
        Ok(self.lock().clone())
    }

    async fn write(&self, recipes: &[Recipe]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Io(io::Error::other("writes disabled")));
        }
        *self.lock() = recipes.to_vec();
        Ok(())
    }
}
