//! src/configuration.rs
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub paths: PathSettings,
    pub pipeline: PipelineSettings,
}

/// The three filesystem locations a run touches, plus the name of the
/// final artifact inside `output_dir`.
#[derive(serde::Deserialize, Clone)]
pub struct PathSettings {
    pub input_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_filename: String,
}

impl PathSettings {
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct PipelineSettings {
    /// Upper bound on concurrently running map tasks.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub workers: usize,
    /// Registry name of the mapper that tokenizes input files.
    pub mapper: String,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory.");
    let config_dir = base_path.join("configuration");

    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("workflow.yaml")))
        .add_source(
            config::Environment::with_prefix("WORDCOUNT")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
