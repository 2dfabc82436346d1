use wordbook_core::language::{LANGUAGES, find};
use wordbook_core::{LanguagePair, save_profile};
use wordbook_types::View;

use crate::context::EventContext;
use crate::state::AppState;

pub async fn handle_setup(
    state: &mut AppState,
    ctx: &EventContext,
    native: &str,
    target: &str,
) -> anyhow::Result<()> {
    let (Some(native), Some(target)) = (find(native), find(target)) else {
        return ctx
            .status("Unknown language code. Type `languages` to list the choices.")
            .await;
    };

    if native.code == target.code {
        return ctx.status("Native and target language must differ.").await;
    }

    let pair = LanguagePair { native, target };
    if let Err(e) = save_profile(state.notebook.blobs(), &pair) {
        tracing::error!("Failed to persist setup profile: {}", e);
        ctx.status(format!("Setup applied but not saved: {e}")).await?;
    }

    let message = format!(
        "Learning {} {} from {} {}.",
        target.flag, target.name, native.flag, native.name
    );
    state.pair = Some(pair);
    ctx.status(message).await
}

pub async fn handle_languages(ctx: &EventContext) -> anyhow::Result<()> {
    ctx.show(View::Languages(LANGUAGES.to_vec())).await
}
