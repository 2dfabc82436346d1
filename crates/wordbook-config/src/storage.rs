use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const APP_DIR: &str = "wordbook";

#[derive(Default, Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `setup.json` and `notebook.json`.
    /// `None` resolves to the platform data directory at startup.
    pub data_dir: Option<PathBuf>,
    /// Keep everything in memory; nothing survives a restart
    pub ephemeral: bool,
}

impl StorageConfig {
    pub fn new() -> Self {
        Self {
            data_dir: env::var("WORDBOOK_DATA_DIR").ok().map(PathBuf::from),
            ephemeral: false,
        }
    }

    /// Explicit `data_dir`, else `<platform local data dir>/wordbook`
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        match platform_data_dir() {
            Some(dir) => dir,
            None => {
                tracing::warn!(
                    "No platform data directory; keeping the notebook in ./{}",
                    APP_DIR
                );
                PathBuf::from(".").join(APP_DIR)
            }
        }
    }
}

fn platform_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dir_follows_platform() {
        let storage = StorageConfig::default();
        let resolved = storage.resolve_data_dir();

        assert!(resolved.ends_with(APP_DIR));
        if let Some(base) = dirs::data_local_dir() {
            assert_eq!(resolved, base.join(APP_DIR));
        }
    }
}
