//! src/test_utils.rs
use std::path::PathBuf;
use uuid::Uuid;

/// Fresh scratch directory for one test, under `/tmp/wordcount`.
pub fn scratch_dir() -> PathBuf {
    let path = PathBuf::from(format!("/tmp/wordcount/{}", Uuid::new_v4()));
    std::fs::create_dir_all(&path).expect("Failed to create scratch directory");
    path
}
