use wordbook_types::SetupProfile;

use crate::error::StorageError;
use crate::language::LanguagePair;
use crate::storage::{BlobStore, SETUP_KEY};

/// Read the persisted language pair.
///
/// A missing, unreadable or unknown-language profile counts as "not set up".
pub fn load_profile(blobs: &dyn BlobStore) -> Option<LanguagePair> {
    let blob = match blobs.read(SETUP_KEY) {
        Ok(blob) => blob?,
        Err(e) => {
            tracing::warn!("Could not read setup profile: {}", e);
            return None;
        }
    };

    let profile: SetupProfile = match serde_json::from_str(&blob) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!("Discarding unreadable setup profile: {}", e);
            return None;
        }
    };

    let pair = LanguagePair::resolve(&profile);
    if pair.is_none() {
        tracing::warn!(
            "Setup profile names unknown languages: {} / {}",
            profile.native_lang,
            profile.target_lang
        );
    }
    pair
}

pub fn save_profile(blobs: &dyn BlobStore, pair: &LanguagePair) -> Result<(), StorageError> {
    let json = serde_json::to_string(&pair.profile())?;
    blobs.write(SETUP_KEY, &json)?;
    tracing::info!(
        "Saved setup profile {} -> {}",
        pair.native_code(),
        pair.target_code()
    );
    Ok(())
}
