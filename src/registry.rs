//! src/registry.rs
use std::path::{Path, PathBuf};

/// Object-safe mapper surface the workflow drives: given a task id and an
/// input file, write that file's intermediate records under `temp_dir`
/// and return the path they landed at.
pub trait MapperDyn: Send + Sync {
    fn name(&self) -> &str;
    fn run(&self, task_id: u32, input: &Path, temp_dir: &Path) -> Result<PathBuf, anyhow::Error>;
}

impl std::fmt::Debug for dyn MapperDyn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperDyn").field("name", &self.name()).finish()
    }
}

pub struct MapperRegistration {
    pub name: &'static str,
    pub factory: fn() -> Box<dyn MapperDyn>,
}

inventory::collect!(MapperRegistration);

/// Resolves the mapper named in the pipeline settings.
pub fn get_mapper(name: &str) -> Result<Box<dyn MapperDyn>, anyhow::Error> {
    inventory::iter::<MapperRegistration>()
        .find(|reg| reg.name == name)
        .map(|reg| (reg.factory)())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Mapper '{name}' not found (registered mappers: {:?})",
                list_mappers()
            )
        })
}

pub fn list_mappers() -> Vec<&'static str> {
    inventory::iter::<MapperRegistration>()
        .map(|reg| reg.name)
        .collect()
}
