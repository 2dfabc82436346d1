use wordbook_core::LookupError;
use wordbook_types::{Seq, View, WordEntry};

use crate::context::EventContext;
use crate::events::AppEvent;
use crate::state::{AppState, OpKind};

/// Start a lookup in the background. Its completion comes back as
/// `AppEvent::LookupFinished`.
pub async fn handle_lookup_request(
    state: &mut AppState,
    ctx: &EventContext,
    query: String,
) -> anyhow::Result<()> {
    let Some(pair) = state.pair.clone() else {
        return ctx.show(View::SetupRequired).await;
    };

    if query.trim().is_empty() {
        return ctx.status("Type a word or phrase after `lookup`.").await;
    }

    let seq = state.sequences.issue(OpKind::Lookup);
    state.begin_lookup();
    tracing::info!("Lookup #{} for '{}'", seq, query);
    ctx.show(View::Loading(format!("Looking up \"{query}\"..."))).await?;

    let fetcher = ctx.services.fetcher.clone();
    let events_tx = ctx.events_tx.clone();
    tokio::spawn(async move {
        let result = fetcher.lookup(&query, &pair).await;
        if let Err(e) = events_tx
            .send(AppEvent::LookupFinished { seq, query, result })
            .await
        {
            tracing::error!("Failed to deliver lookup result: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_lookup_finished(
    state: &mut AppState,
    ctx: &EventContext,
    seq: Seq,
    query: String,
    result: Result<WordEntry, LookupError>,
) -> anyhow::Result<()> {
    if !state.sequences.is_current(OpKind::Lookup, seq) {
        tracing::debug!("Dropping stale lookup #{} for '{}'", seq, query);
        return Ok(());
    }

    match result {
        Ok(entry) => {
            tracing::info!(
                "Lookup #{} for '{}' done (image: {})",
                seq,
                query,
                entry.has_image()
            );
            let saved = state.is_saved(&entry);
            state.show_entry(entry.clone());
            ctx.show(View::Entry { entry, saved }).await
        }
        Err(e) => {
            tracing::warn!("Lookup #{} for '{}' failed: {}", seq, query, e);
            ctx.show(View::Idle).await
        }
    }
}
