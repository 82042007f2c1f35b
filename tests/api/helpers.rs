//! tests/api/helpers.rs
use std::path::PathBuf;
use std::sync::LazyLock;
use uuid::Uuid;
use wordcount::configuration::{PathSettings, PipelineSettings, Settings};
use wordcount::telemetry::init_tracing;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    init_tracing().expect("Failed to setup tracing");
});

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

/// One test's isolated run environment under `/tmp/wordcount/<uuid>`.
pub struct TestRun {
    pub root: PathBuf,
    pub settings: Settings,
}

pub fn setup() -> TestRun {
    LazyLock::force(&TRACING);
    let root = PathBuf::from(format!("/tmp/wordcount/{}", Uuid::new_v4()));
    let input_dir = root.join("input");
    std::fs::create_dir_all(&input_dir).expect("Failed to create input directory");

    let settings = Settings {
        paths: PathSettings {
            input_dir,
            temp_dir: root.join("temp"),
            output_dir: root.join("output"),
            output_filename: "word_counts.txt".to_string(),
        },
        pipeline: PipelineSettings {
            workers: 4,
            mapper: "word_counter".to_string(),
        },
    };
    TestRun { root, settings }
}

impl TestRun {
    pub fn write_input(&self, name: &str, contents: &str) {
        std::fs::write(self.settings.paths.input_dir.join(name), contents)
            .expect("Failed to write input file");
    }

    pub fn output(&self) -> String {
        std::fs::read_to_string(self.settings.paths.output_file())
            .expect("Failed to read output artifact")
    }

    pub fn teardown(self) {
        std::fs::remove_dir_all(&self.root).expect("Failed to delete test dirs");
    }
}
