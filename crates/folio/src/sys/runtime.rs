use crate::config::WatchTargets;
use crate::events::AppEvent;
use crate::sys::preload::{self, PreloadJob};
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(
    tx: Sender<AppEvent>,
    jobs: Vec<PreloadJob>,
    targets: WatchTargets,
) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    preload::run_preloader(tx, jobs).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx, targets).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
