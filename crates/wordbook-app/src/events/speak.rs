use wordbook_types::{Role, SpeakTarget};

use crate::context::EventContext;
use crate::state::AppState;

/// Read text aloud without waiting for playback
pub async fn handle_speak(state: &AppState, ctx: &EventContext, target: SpeakTarget) -> anyhow::Result<()> {
    let Some(playback) = ctx.services.playback.clone() else {
        return ctx
            .status("Speech is unavailable: this build has no audio output.")
            .await;
    };
    let Some(text) = speakable_text(state, target) else {
        return ctx.status("Nothing to read aloud.").await;
    };

    let voice = ctx.services.voice.clone();
    tokio::spawn(async move {
        playback.speak(&text, &voice).await;
    });

    Ok(())
}

pub fn speakable_text(state: &AppState, target: SpeakTarget) -> Option<String> {
    match target {
        SpeakTarget::Word => state.focused_entry().map(|e| e.word.clone()),
        SpeakTarget::Example => state
            .focused_entry()
            .and_then(|e| e.primary_example())
            .map(|example| example.target.clone()),
        SpeakTarget::Reply => state
            .transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::Model)
            .map(|m| m.text.clone()),
    }
}
