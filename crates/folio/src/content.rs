use crate::config::ConfigError;
use folio_core::content::{ContentFile, ContentStore};
use std::path::Path;

const DEFAULT_CONTENT: &str = include_str!("content.toml");

/// Loads the built-in content, or `path` in its place when given.
pub fn load_content(path: Option<&Path>) -> Result<ContentStore, ConfigError> {
    let source = match path {
        Some(path) => {
            log::info!("Loading content from {}", path.display());
            config::Config::builder().add_source(config::File::from(path))
        }
        None => config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONTENT,
            config::FileFormat::Toml,
        )),
    };

    let file: ContentFile = source.build()?.try_deserialize()?;
    Ok(ContentStore::try_from(file)?)
}
