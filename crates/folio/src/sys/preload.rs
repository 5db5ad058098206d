use crate::events::AppEvent;
use async_channel::Sender;
use folio_core::content::{ContentStore, ImageRef};
use folio_core::preload::PreloadOutcome;
use gdk_pixbuf::Pixbuf;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadJob {
    pub image: ImageRef,
    pub path: PathBuf,
}

/// One job per distinct image in the store, resolved against `assets`.
pub fn jobs_for(content: &ContentStore, assets: &Path) -> Vec<PreloadJob> {
    content
        .image_refs()
        .into_iter()
        .map(|image| PreloadJob {
            path: assets.join(image.as_str()),
            image,
        })
        .collect()
}

fn decode(job: &PreloadJob) -> PreloadOutcome {
    match Pixbuf::from_file(&job.path) {
        Ok(_) => PreloadOutcome::Loaded,
        Err(e) => {
            log::warn!("Failed to preload {}: {}", job.path.display(), e);
            PreloadOutcome::Failed
        }
    }
}

/// Decodes every job concurrently and reports each attempt exactly once.
pub async fn run_preloader(tx: Sender<AppEvent>, jobs: Vec<PreloadJob>) {
    let mut set = JoinSet::new();
    for job in jobs {
        set.spawn_blocking(move || {
            let outcome = decode(&job);
            (job.image, outcome)
        });
    }

    while let Some(res) = set.join_next().await {
        let event = match res {
            Ok((image, outcome)) => AppEvent::AssetResolved {
                image: Some(image),
                outcome,
            },
            Err(e) => {
                log::error!("Preload task failed: {}", e);
                AppEvent::AssetResolved {
                    image: None,
                    outcome: PreloadOutcome::Failed,
                }
            }
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_files_still_resolve() {
        let (tx, rx) = async_channel::unbounded();
        let jobs = ["a.png", "b.png"]
            .into_iter()
            .map(|name| PreloadJob {
                image: ImageRef::new(name),
                path: PathBuf::from("/nonexistent/folio").join(name),
            })
            .collect();

        run_preloader(tx, jobs).await;

        let mut outcomes = Vec::new();
        while let Ok(AppEvent::AssetResolved { outcome, .. }) = rx.try_recv() {
            outcomes.push(outcome);
        }
        assert_eq!(outcomes, vec![PreloadOutcome::Failed; 2]);
    }

    #[tokio::test]
    async fn test_empty_batch_sends_nothing() {
        let (tx, rx) = async_channel::unbounded();
        run_preloader(tx, Vec::new()).await;
        assert!(rx.try_recv().is_err());
    }
}
