//! The recipe book: list and create over a [`RecipeStore`].
//!
//! Create is a read-append-write of the whole collection. Within one process
//! those three steps run under a single writer lock, so two concurrent
//! creates cannot overwrite each other. Separate processes sharing a backing
//! file are not coordinated.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Result;
use crate::recipe::{NewRecipe, Recipe};
use crate::storage::RecipeStore;

/// How the book treats store read failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Log the failure and carry on with an empty collection.
    #[default]
    FailOpen,
    /// Return the failure to the caller.
    Strict,
}

/// Shared handle to the recipe collection.
///
/// Cloning is cheap; clones share the store and the writer lock.
#[derive(Debug, Clone)]
pub struct RecipeBook {
    store: Arc<dyn RecipeStore>,
    read_policy: ReadPolicy,
    write_lock: Arc<Mutex<()>>,
}

impl RecipeBook {
    /// Create a book over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RecipeStore>, read_policy: ReadPolicy) -> Self {
        Self {
            store,
            read_policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The store behind this book.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecipeStore> {
        &self.store
    }

    /// The read policy in effect.
    #[must_use]
    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    /// All recipes in insertion order.
    ///
    /// # Errors
    ///
    /// Only fails under [`ReadPolicy::Strict`], when the store cannot be read.
    pub async fn list(&self) -> Result<Vec<Recipe>> {
        self.read_collection().await
    }

    /// Append a new recipe and persist the full collection.
    ///
    /// The id is taken from the wall clock before the lock is acquired.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written, or under
    /// [`ReadPolicy::Strict`] if it cannot be read. Nothing is persisted in
    /// either case.
    pub async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe> {
        let recipe = new_recipe.into_recipe();

        let _guard = self.write_lock.lock().await;
        let mut recipes = self.read_collection().await?;
        recipes.push(recipe.clone());
        self.store.write(&recipes).await?;

        info!(id = recipe.id, title = %recipe.title, "Recipe added");
        debug!("Collection now holds {} recipes", recipes.len());
        Ok(recipe)
    }

    async fn read_collection(&self) -> Result<Vec<Recipe>> {
        match self.read_policy {
            ReadPolicy::FailOpen => Ok(self.store.read().await),
            ReadPolicy::Strict => self.store.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use serde_json::json;

    fn new_recipe(title: &str) -> NewRecipe {
        NewRecipe::from_value(json!({
            "title": title,
            "ingredients": ["water", "tea leaves"],
            "instructions": "Boil and steep",
            "cookTime": 5
        }))
        .unwrap()
    }

    fn memory_book(policy: ReadPolicy) -> (Arc<MemoryStore>, RecipeBook) {
        let store = Arc::new(MemoryStore::new());
        let book = RecipeBook::new(store.clone(), policy);
        (store, book)
    }

    #[tokio::test]
    async fn test_list_fresh_store_is_empty() {
        let (_, book) = memory_book(ReadPolicy::FailOpen);
        assert!(book.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (store, book) = memory_book(ReadPolicy::FailOpen);

        let created = book.create(new_recipe("Tea")).await.unwrap();
        let listed = book.list().await.unwrap();

        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(store.snapshot(), vec![created]);
    }

    #[tokio::test]
    async fn test_sequential_creates_keep_order() {
        let (_, book) = memory_book(ReadPolicy::FailOpen);

        let first = book.create(new_recipe("First")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = book.create(new_recipe("Second")).await.unwrap();

        let listed = book.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "First");
        assert_eq!(listed[1].title, "Second");
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_write_failure_persists_nothing() {
        let (store, book) = memory_book(ReadPolicy::FailOpen);
        store.set_fail_writes(true);

        assert!(book.create(new_recipe("Tea")).await.is_err());

        store.set_fail_writes(false);
        assert!(book.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fail_open_masks_read_errors() {
        let (store, book) = memory_book(ReadPolicy::FailOpen);
        store.set_fail_reads(true);

        assert!(book.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_strict_surfaces_read_errors() {
        let (store, book) = memory_book(ReadPolicy::Strict);
        store.set_fail_reads(true);

        assert!(book.list().await.is_err());
        assert!(book.create(new_recipe("Tea")).await.is_err());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_strict_create_leaves_corrupt_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "garbage").unwrap();
        let book = RecipeBook::new(Arc::new(FileStore::new(&path)), ReadPolicy::Strict);

        assert!(book.create(new_recipe("Tea")).await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("recipes.json")));
        let book = RecipeBook::new(store, ReadPolicy::FailOpen);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let book = book.clone();
                tokio::spawn(async move { book.create(new_recipe(&format!("Recipe {i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(book.list().await.unwrap().len(), 16);
    }

    #[test]
    fn test_read_policy_default() {
        assert_eq!(ReadPolicy::default(), ReadPolicy::FailOpen);
    }
}
