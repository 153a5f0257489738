//! JSON file backed recipe store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, error, info};

use super::RecipeStore;
use crate::error::{Error, Result};
use crate::recipe::Recipe;

/// Serialized form of an empty collection.
const EMPTY_COLLECTION: &str = "[]";

/// A recipe store backed by a single pretty-printed JSON array file.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the backing file.
    path: PathBuf,
}

/// Statistics about the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Path to the backing file.
    pub path: PathBuf,
    /// Whether the backing file exists yet.
    pub exists: bool,
    /// Number of recipes in the file (0 if unreadable).
    pub total_recipes: usize,
    /// Size of the backing file in bytes.
    pub size_bytes: u64,
}

impl FileStore {
    /// Create a store for the given backing file.
    ///
    /// Nothing touches the disk until the first read or write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file holding an empty collection if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file cannot be created.
    pub async fn ensure_exists(&self) -> Result<()> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| Error::DirectoryCreate {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        fs::write(&self.path, EMPTY_COLLECTION)
            .await
            .map_err(|source| Error::StoreWrite {
                path: self.path.clone(),
                source,
            })?;
        info!("Initialized empty recipe store at {}", self.path.display());
        Ok(())
    }

    /// Get statistics about the backing file without creating it.
    pub async fn stats(&self) -> StoreStats {
        let size_bytes = fs::metadata(&self.path).await.map(|m| m.len()).ok();
        let total_recipes = if size_bytes.is_some() {
            self.read().await.len()
        } else {
            0
        };

        StoreStats {
            path: self.path.clone(),
            exists: size_bytes.is_some(),
            total_recipes,
            size_bytes: size_bytes.unwrap_or(0),
        }
    }
}

#[async_trait]
impl RecipeStore for FileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<Recipe>> {
        self.ensure_exists().await?;

        let data = fs::read(&self.path)
            .await
            .map_err(|source| Error::StoreRead {
                path: self.path.clone(),
                source,
            })?;

        let recipes: Vec<Recipe> =
            serde_json::from_slice(&data).map_err(|source| Error::CorruptStore {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} recipes from {}", recipes.len(), self.path.display());
        Ok(recipes)
    }

    async fn write(&self, recipes: &[Recipe]) -> Result<()> {
        let data = serde_json::to_string_pretty(recipes)?;

        if let Err(source) = fs::write(&self.path, data).await {
            error!("Write error: {source}");
            return Err(Error::StoreWrite {
                path: self.path.clone(),
                source,
            });
        }

        debug!("Wrote {} recipes to {}", recipes.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::NewRecipe;
    use serde_json::json;

    fn create_test_recipe(title: &str, id: i64) -> Recipe {
        NewRecipe::from_value(json!({
            "title": title,
            "ingredients": ["water", "tea leaves"],
            "instructions": "Boil and steep",
            "cookTime": 5
        }))
        .unwrap()
        .with_id(id)
    }

    #[tokio::test]
    async fn test_read_missing_file_initializes_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let store = FileStore::new(&path);

        assert!(store.read().await.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_read_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("recipes.json");
        let store = FileStore::new(&path);

        assert!(store.load().await.unwrap().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("recipes.json"));
        let recipes = vec![create_test_recipe("Tea", 1), create_test_recipe("Toast", 2)];

        store.write(&recipes).await.unwrap();

        assert_eq!(store.read().await, recipes);
    }

    #[tokio::test]
    async fn test_write_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let store = FileStore::new(&path);

        store.write(&[create_test_recipe("Tea", 1)]).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(contents.contains("\"cookTime\": 5"));
    }

    #[tokio::test]
    async fn test_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("recipes.json"));

        store
            .write(&[create_test_recipe("Tea", 1), create_test_recipe("Toast", 2)])
            .await
            .unwrap();
        store.write(&[create_test_recipe("Soup", 3)]).await.unwrap();

        let recipes = store.read().await;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Soup");
    }

    #[tokio::test]
    async fn test_read_mixed_type_ingredients() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"title":"Old","ingredients":[2,"eggs",{"q":1}],"instructions":"Whisk","cookTime":3}]"#,
        )
        .unwrap();
        let store = FileStore::new(&path);

        let recipes = store.load().await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients, vec![json!(2), json!("eggs"), json!({"q": 1})]);
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "[{\"id\": 1, \"title\": ").unwrap();
        let store = FileStore::new(&path);

        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();
        let store = FileStore::new(&path);

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
        assert!(err.is_read_error());
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("gone").join("recipes.json"));

        let err = store.write(&[create_test_recipe("Tea", 1)]).await.unwrap_err();
        assert!(matches!(err, Error::StoreWrite { .. }));
    }

    #[tokio::test]
    async fn test_stats_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        let store = FileStore::new(&path);

        let stats = store.stats().await;
        assert!(!stats.exists);
        assert_eq!(stats.total_recipes, 0);
        assert_eq!(stats.size_bytes, 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_stats_counts_recipes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("recipes.json"));
        store
            .write(&[create_test_recipe("Tea", 1), create_test_recipe("Toast", 2)])
            .await
            .unwrap();

        let stats = store.stats().await;
        assert!(stats.exists);
        assert_eq!(stats.total_recipes, 2);
        assert!(stats.size_bytes > 0);
    }

    #[test]
    fn test_describe_is_path() {
        let store = FileStore::new("/tmp/recipes.json");
        assert_eq!(store.describe(), "/tmp/recipes.json");
        assert_eq!(store.path(), Path::new("/tmp/recipes.json"));
    }
}
