//! src/storage/fs.rs
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Local-filesystem store behind the pipeline's three directories.
///
/// The narrow surface the workflow needs: list a directory of inputs,
/// read a file, read one task's intermediate records back, persist the
/// final artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        FileStore
    }

    /// Regular files in `dir`, sorted by path so a run visits inputs in a
    /// deterministic order.
    #[tracing::instrument(name = "List files")]
    pub async fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, anyhow::Error> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .context(format!("Failed to read directory: {}", dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_type = entry
                .file_type()
                .await
                .context("Failed to read entry file type")?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    #[tracing::instrument(name = "Read file")]
    pub async fn read(&self, path: &Path) -> Result<String, anyhow::Error> {
        tokio::fs::read_to_string(path)
            .await
            .context(format!("Failed to read file: {}", path.display()))
    }

    /// The intermediate records one map task wrote, one record per line.
    #[tracing::instrument(name = "Read task records")]
    pub async fn read_records(&self, path: &Path) -> Result<Vec<String>, anyhow::Error> {
        let contents = self.read(path).await?;
        Ok(contents.lines().map(String::from).collect())
    }

    /// Persists `data` at `path`, creating missing parent directories.
    #[tracing::instrument(name = "Put", skip(data))]
    pub async fn put(&self, path: &Path, data: &str) -> Result<(), anyhow::Error> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        tokio::fs::write(path, data)
            .await
            .context(format!("Failed to write file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::test_utils::scratch_dir;
    use claims::assert_err;
    use std::fs;

    #[tokio::test]
    async fn should_fail_to_list_a_missing_directory() {
        let store = FileStore::new();
        let dir = scratch_dir().join("does_not_exist");
        assert_err!(store.list(&dir).await);
    }

    #[tokio::test]
    async fn should_list_only_regular_files_in_sorted_order() {
        let store = FileStore::new();
        let dir = scratch_dir();
        fs::write(dir.join("b.txt"), "b").expect("Failed to write test file");
        fs::write(dir.join("a.txt"), "a").expect("Failed to write test file");
        fs::create_dir(dir.join("nested")).expect("Failed to create test subdirectory");

        let files = store.list(&dir).await.expect("Failed to list files");

        assert_eq!(files, vec![dir.join("a.txt"), dir.join("b.txt")]);
        fs::remove_dir_all(dir).expect("Failed to delete test dirs");
    }

    #[tokio::test]
    async fn should_get_back_what_it_put() {
        let store = FileStore::new();
        let path = scratch_dir().join("artifacts").join("out.txt");
        let data = "\"a\", 1\n\"other\", 1\n";

        store.put(&path, data).await.expect("Failed to put data");
        let result = store.read(&path).await.expect("Failed to read data back");

        assert_eq!(result, data);
    }

    #[tokio::test]
    async fn should_read_records_line_by_line() {
        let store = FileStore::new();
        let path = scratch_dir().join("map_0.txt");
        store
            .put(&path, "\"apple\", 1\n\"pear\", 1\n")
            .await
            .expect("Failed to put records");

        let records = store
            .read_records(&path)
            .await
            .expect("Failed to read records");

        assert_eq!(records, vec!["\"apple\", 1", "\"pear\", 1"]);
    }
}
