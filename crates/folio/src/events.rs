use folio_core::content::ImageRef;
use folio_core::preload::PreloadOutcome;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// One preload attempt finished. `image` is `None` when the loader task
    /// itself died.
    AssetResolved {
        image: Option<ImageRef>,
        outcome: PreloadOutcome,
    },
    ConfigReload,
    ContentReload,
}
