use wordbook_core::Toggle;
use wordbook_types::View;

use crate::context::EventContext;
use crate::state::AppState;

/// Save the displayed entry, or unsave it if its word is already saved
pub async fn handle_save(state: &mut AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let Some(entry) = state.focused_entry().cloned() else {
        return ctx.status("Nothing to save. Look a word up first.").await;
    };
    let word = entry.word.clone();

    let outcome = match state.notebook.toggle(entry.clone()) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Failed to persist notebook: {}", e);
            ctx.status(format!("Notebook changed but could not be saved: {e}"))
                .await?;
            if state.notebook.contains(&word) {
                Toggle::Saved
            } else {
                Toggle::Removed
            }
        }
    };
    state.sync_study();

    let message = match outcome {
        Toggle::Saved => format!("Saved \"{word}\" ({} in notebook).", state.notebook.len()),
        Toggle::Removed => format!("Removed \"{word}\" from the notebook."),
    };
    ctx.status(message).await
}

pub async fn handle_show_notebook(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    ctx.show(View::Notebook(state.notebook.entries().to_vec()))
        .await
}

pub async fn handle_remove(state: &mut AppState, ctx: &EventContext, id: &str) -> anyhow::Result<()> {
    if !state.notebook.entries().iter().any(|entry| entry.id == id) {
        return ctx.status(format!("No saved entry with id {id}.")).await;
    }

    if let Err(e) = state.notebook.remove(id) {
        tracing::error!("Failed to persist notebook: {}", e);
        ctx.status(format!("Notebook changed but could not be saved: {e}"))
            .await?;
    }

    state.sync_study();
    handle_show_notebook(state, ctx).await
}

/// Show a saved entry by its 1-based notebook position
pub async fn handle_open(state: &mut AppState, ctx: &EventContext, position: usize) -> anyhow::Result<()> {
    let Some(entry) = position
        .checked_sub(1)
        .and_then(|index| state.notebook.get(index))
        .cloned()
    else {
        return ctx
            .status(format!(
                "Pick a number between 1 and {}.",
                state.notebook.len()
            ))
            .await;
    };

    state.show_entry(entry.clone());
    ctx.show(View::Entry { entry, saved: true }).await
}
