use wordbook_core::tutor::is_askable;
use wordbook_types::{ChatMessage, Seq, View};

use crate::context::EventContext;
use crate::events::AppEvent;
use crate::state::{AppState, OpKind};

/// Ask the tutor about the displayed entry, the study card while studying.
///
/// The question joins the transcript before the request goes out; the reply
/// (or its fallback) is appended when `AppEvent::TutorReplied` arrives.
pub async fn handle_question(
    state: &mut AppState,
    ctx: &EventContext,
    question: String,
) -> anyhow::Result<()> {
    if !is_askable(&question) {
        return Ok(());
    }

    let (Some(pair), Some(entry)) = (state.pair.clone(), state.focused_entry().cloned()) else {
        return ctx.status("Look a word up before asking about it.").await;
    };

    let history = state.transcript.clone();
    state.transcript.push(ChatMessage::user(question.trim()));
    let seq = state.sequences.issue(OpKind::Tutor);
    ctx.show(View::Loading("Thinking...".to_string())).await?;

    let tutor = ctx.services.tutor.clone();
    let events_tx = ctx.events_tx.clone();
    tokio::spawn(async move {
        let Some(reply) = tutor.ask(&question, &entry, &pair, &history).await else {
            return;
        };
        if let Err(e) = events_tx.send(AppEvent::TutorReplied { seq, reply }).await {
            tracing::error!("Failed to deliver tutor reply: {}", e);
        }
    });

    Ok(())
}

pub async fn handle_tutor_replied(
    state: &mut AppState,
    ctx: &EventContext,
    seq: Seq,
    reply: ChatMessage,
) -> anyhow::Result<()> {
    if !state.sequences.is_current(OpKind::Tutor, seq) {
        tracing::debug!("Dropping stale tutor reply #{}", seq);
        return Ok(());
    }

    state.transcript.push(reply.clone());
    ctx.show(View::ChatReply(reply)).await
}
