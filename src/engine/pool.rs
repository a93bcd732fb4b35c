use crate::engine::Engine;
use crate::TallyError;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Spawns the fixed worker pool
///
/// Each worker loops forever: take a command, dispatch it, mark it done.
/// There is no drain or shutdown protocol; the pool dies with the process,
/// which is acceptable for short-lived batch work. Per-command errors are
/// contained here so one bad entry never stops the pool: a resolution
/// failure goes into the skip summary, anything else is logged and dropped.
pub fn spawn_workers(engine: &Arc<Engine>, count: u32) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|worker_id| {
            let engine = Arc::clone(engine);
            tokio::spawn(async move {
                tracing::debug!("Worker {} spawned", worker_id);

                loop {
                    let cmd = engine.queue().take().await;
                    let kind = cmd.kind();
                    tracing::trace!("Worker {} took a {} command", worker_id, kind);

                    match engine.dispatch(cmd).await {
                        Ok(()) => {}
                        Err(TallyError::ResolutionFailed { title }) => {
                            tracing::warn!("Couldn't find {:?} on IMDB, skipping entry", title);
                            engine.record_skip(&title);
                        }
                        Err(e) => {
                            tracing::error!("{} command failed: {}", kind, e);
                        }
                    }

                    // Done even on error; the command's fate is settled.
                    engine.queue().mark_done();
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Command, TaskQueue};
    use crate::sources::{
        CatalogPage, CatalogSource, DocumentSource, FetchedDocument, TitleResolver,
    };
    use crate::Result;
    use async_trait::async_trait;

    struct EmptyCatalog;

    #[async_trait]
    impl CatalogSource for EmptyCatalog {
        async fn fetch_page(&self, _page: u32) -> Result<CatalogPage> {
            Ok(CatalogPage {
                total: 0,
                entries: vec![],
            })
        }
    }

    struct MissResolver;

    #[async_trait]
    impl TitleResolver for MissResolver {
        async fn search(&self, _words: &[&str]) -> Result<Option<String>> {
            Ok(None)
        }
    }

    struct BlankDocuments;

    #[async_trait]
    impl DocumentSource for BlankDocuments {
        async fn fetch_document(&self, imdb_id: &str) -> Result<FetchedDocument> {
            Ok(FetchedDocument {
                url: format!("http://docs.test/tt{}", imdb_id),
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_resolution_failure_is_contained_and_summarized() {
        let queue = Arc::new(TaskQueue::with_capacity(16));
        let engine = Arc::new(Engine::new(
            queue,
            Arc::new(EmptyCatalog),
            Arc::new(MissResolver),
            Arc::new(BlankDocuments),
            50,
        ));

        let _workers = spawn_workers(&engine, 2);

        engine
            .queue()
            .submit(Command::ResolveAndCount {
                entry_id: "bad".into(),
                title: "No Such Film".into(),
            })
            .unwrap();
        engine
            .queue()
            .submit(Command::CountImages {
                entry_id: "good".into(),
                title: "Fine Film".into(),
                imdb_id: "1234567".into(),
            })
            .unwrap();

        engine.queue().await_completion().await;

        // The failed entry landed in the skip summary, the good one in the
        // results; the pool survived both.
        assert_eq!(engine.skipped(), vec!["No Such Film".to_string()]);
        assert_eq!(engine.results().len(), 1);
        assert_eq!(engine.queue().outstanding(), 0);
    }
}
