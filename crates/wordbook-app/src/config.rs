use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use wordbook_config::Config;
use wordbook_config::storage::StorageConfig;
use wordbook_core::{BlobStore, FileBlobStore, MemoryBlobStore};

/// Environment-derived config, replaced by `path` when given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No config file given, using environment");
        let config = Config::new();
        config.validate()?;
        return Ok(config);
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut config: Config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;

    // The key usually lives in the environment rather than in the file
    if config.genai.api_key.is_empty() {
        config.genai.api_key = Config::new().genai.api_key;
    }

    config
        .validate()
        .with_context(|| format!("checking {}", path.display()))?;
    Ok(config)
}

/// Blob store for setup profile and notebook
pub fn open_blob_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn BlobStore>> {
    if storage.ephemeral {
        tracing::warn!("Ephemeral storage: nothing will be kept after exit");
        return Ok(Arc::new(MemoryBlobStore::new()));
    }

    let dir = storage.resolve_data_dir();
    let store = FileBlobStore::open(&dir)
        .with_context(|| format!("opening data directory {}", dir.display()))?;
    Ok(Arc::new(store))
}
