use wordbook_core::story::{MIN_STORY_WORDS, can_compose};
use wordbook_types::{Seq, View};

use crate::context::EventContext;
use crate::events::AppEvent;
use crate::state::{AppState, OpKind};

pub async fn handle_story_request(state: &mut AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let words = state.notebook.words();
    if !can_compose(words.len()) {
        ctx.status(format!(
            "Save at least {MIN_STORY_WORDS} words to get a new story."
        ))
        .await?;
        if let Some(story) = state.story.clone() {
            ctx.show(View::Story(story)).await?;
        }
        return Ok(());
    }
    let Some(pair) = state.pair.clone() else {
        return ctx.show(View::SetupRequired).await;
    };

    let seq = state.sequences.issue(OpKind::Story);
    tracing::info!("Story #{} from {} words", seq, words.len());
    ctx.show(View::Loading("Writing a story...".to_string()))
        .await?;

    let composer = ctx.services.composer.clone();
    let events_tx = ctx.events_tx.clone();
    tokio::spawn(async move {
        let story = composer
            .compose(&words, pair.target_label(), pair.native_label())
            .await;
        if let Err(e) = events_tx.send(AppEvent::StoryComposed { seq, story }).await {
            tracing::error!("Failed to deliver story: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_story_composed(
    state: &mut AppState,
    ctx: &EventContext,
    seq: Seq,
    story: String,
) -> anyhow::Result<()> {
    if !state.sequences.is_current(OpKind::Story, seq) {
        tracing::debug!("Dropping stale story #{}", seq);
        return Ok(());
    }

    state.story = Some(story.clone());
    ctx.show(View::Story(story)).await
}
