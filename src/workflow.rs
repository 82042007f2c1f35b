//! src/workflow.rs
use crate::configuration::Settings;
use crate::partition::ShardSet;
use crate::reduce::reduce;
use crate::registry::{self, MapperDyn};
use crate::storage::FileStore;
use anyhow::Context;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use uuid::Uuid;

/// Outcome of one pipeline run. Wall-clock time is reported whether or
/// not the run succeeded.
pub struct RunReport {
    pub outcome: Result<(), anyhow::Error>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Single-run orchestrator: a bounded map fan-out over the input files,
/// a hard barrier, a two-way reduce fan-out, an ordered merge, and one
/// persisted artifact.
///
/// The shard tries and the task-id counter are owned here and scoped to
/// the run; both outlive every task the run spawns and are dropped with
/// the workflow.
pub struct Workflow {
    run_id: Uuid,
    settings: Settings,
    store: FileStore,
}

impl Workflow {
    pub fn new(settings: Settings) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            settings,
            store: FileStore::new(),
        }
    }

    pub fn run_id(&self) -> &Uuid {
        &self.run_id
    }

    #[tracing::instrument(name = "Run workflow", skip_all, fields(run_id = %self.run_id))]
    pub async fn run(self) -> RunReport {
        tracing::info!("Starting workflow");
        let start = Instant::now();
        let outcome = self.execute().await;
        let elapsed = start.elapsed();
        match &outcome {
            Ok(()) => {
                tracing::info!("Workflow took {:.3}s to complete", elapsed.as_secs_f64());
            }
            Err(error) => {
                tracing::error!(
                    error.cause_chain = ?error,
                    "Workflow failed after {:.3}s",
                    elapsed.as_secs_f64()
                );
            }
        }
        RunReport { outcome, elapsed }
    }

    async fn execute(&self) -> Result<(), anyhow::Error> {
        if self.settings.pipeline.workers == 0 {
            return Err(anyhow::anyhow!("pipeline.workers must be at least 1"));
        }

        let files = self
            .store
            .list(&self.settings.paths.input_dir)
            .await
            .context("Failed to list input files")?;
        tracing::info!("Mapping {} input files", files.len());

        let mapper: Arc<dyn MapperDyn> =
            Arc::from(registry::get_mapper(&self.settings.pipeline.mapper)?);
        let shards = Arc::new(ShardSet::new());
        let task_counter = Arc::new(AtomicU32::new(0));
        let permits = Arc::new(Semaphore::new(self.settings.pipeline.workers));

        let mut map_handles = Vec::with_capacity(files.len());
        for path in files {
            let mapper = Arc::clone(&mapper);
            let shards = Arc::clone(&shards);
            let task_counter = Arc::clone(&task_counter);
            let permits = Arc::clone(&permits);
            let temp_dir = self.settings.paths.temp_dir.clone();
            let store = self.store;
            map_handles.push(tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .context("Map worker pool closed unexpectedly")?;
                let task_id = task_counter.fetch_add(1, Ordering::SeqCst);
                let records_path = mapper
                    .run(task_id, &path, &temp_dir)
                    .context(format!("Map task {task_id} failed for {}", path.display()))?;
                tracing::info!("Wrote temp file {task_id}");
                let records = store.read_records(&records_path).await?;
                shards.distribute(&records)
            }));
        }

        // Barrier: every map task joins before any reduce task starts, so
        // no reduce can observe a partially shuffled shard.
        for handle in map_handles {
            handle.await.context("Map task panicked")??;
        }

        let mut reduce_handles = Vec::new();
        for index in 0..shards.shards().len() {
            let shards = Arc::clone(&shards);
            reduce_handles.push(tokio::spawn(async move {
                let shard = &shards.shards()[index];
                let trie = shard
                    .trie()
                    .lock()
                    .map_err(|_| anyhow::anyhow!("Shard {} lock poisoned", shard.label()))?;
                let block = reduce(&trie)
                    .context(format!("Failed to reduce shard {}", shard.label()))?;
                Ok::<String, anyhow::Error>(block)
            }));
        }

        // Await in shard order; concatenating a-m before n-z keeps the
        // merged artifact globally sorted.
        let mut merged = String::new();
        for handle in reduce_handles {
            let block = handle.await.context("Reduce task panicked")??;
            merged.push_str(&block);
        }

        let output_file = self.settings.paths.output_file();
        self.store
            .put(&output_file, &merged)
            .await
            .context("Failed to persist merged output")?;
        tracing::info!("Wrote output artifact: {}", output_file.display());
        Ok(())
    }
}
