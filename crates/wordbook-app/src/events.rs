use kanal::AsyncReceiver;
use wordbook_core::LookupError;
use wordbook_types::{ChatMessage, Seq, UiCommand, View, WordEntry};

use crate::context::EventContext;
use crate::state::AppState;

pub mod lookup;
pub mod notebook;
pub mod setup;
pub mod speak;
pub mod story;
pub mod study;
pub mod tutor;

use lookup::{handle_lookup_finished, handle_lookup_request};
use notebook::{handle_open, handle_remove, handle_save, handle_show_notebook};
use setup::{handle_languages, handle_setup};
use speak::handle_speak;
use story::{handle_story_composed, handle_story_request};
use study::{handle_flip, handle_next, handle_previous, handle_study};
use tutor::{handle_question, handle_tutor_replied};

/// Messages consumed by the controller
#[derive(Debug)]
pub enum AppEvent {
    Command(UiCommand),
    LookupFinished {
        seq: Seq,
        query: String,
        result: Result<WordEntry, LookupError>,
    },
    TutorReplied {
        seq: Seq,
        reply: ChatMessage,
    },
    StoryComposed {
        seq: Seq,
        story: String,
    },
}

/// App's main loop. Owns the state; spawned requests report back as events.
pub async fn event_loop(
    mut state: AppState,
    ctx: EventContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    greet(&state, &ctx).await?;

    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            _ = ctx.cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));
        handle_event(&mut state, &ctx, event).await?;
    }

    tracing::info!("Event loop stopping");
    Ok(())
}

async fn greet(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    match &state.pair {
        Some(pair) => {
            ctx.status(format!(
                "Learning {} {} from {} {}. {} saved words. Type `help` for commands.",
                pair.target.flag,
                pair.target_label(),
                pair.native.flag,
                pair.native_label(),
                state.notebook.len()
            ))
            .await
        }
        None => ctx.show(View::SetupRequired).await,
    }
}

pub async fn handle_event(
    state: &mut AppState,
    ctx: &EventContext,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Command(command) => handle_command(state, ctx, command).await?,
        AppEvent::LookupFinished { seq, query, result } => {
            handle_lookup_finished(state, ctx, seq, query, result).await?;
        }
        AppEvent::TutorReplied { seq, reply } => {
            handle_tutor_replied(state, ctx, seq, reply).await?;
        }
        AppEvent::StoryComposed { seq, story } => {
            handle_story_composed(state, ctx, seq, story).await?;
        }
    }

    Ok(())
}

async fn handle_command(
    state: &mut AppState,
    ctx: &EventContext,
    command: UiCommand,
) -> anyhow::Result<()> {
    // Everything but setup needs a language pair
    let needs_setup = !matches!(
        command,
        UiCommand::Setup { .. } | UiCommand::Languages | UiCommand::Help | UiCommand::Quit
    );
    if needs_setup && state.pair.is_none() {
        return ctx.show(View::SetupRequired).await;
    }

    match command {
        UiCommand::Setup { native, target } => handle_setup(state, ctx, &native, &target).await,
        UiCommand::Languages => handle_languages(ctx).await,
        UiCommand::Lookup(query) => handle_lookup_request(state, ctx, query).await,
        UiCommand::Save => handle_save(state, ctx).await,
        UiCommand::Notebook => handle_show_notebook(state, ctx).await,
        UiCommand::Remove(id) => handle_remove(state, ctx, &id).await,
        UiCommand::Open(position) => handle_open(state, ctx, position).await,
        UiCommand::Ask(question) => handle_question(state, ctx, question).await,
        UiCommand::Speak(target) => handle_speak(state, ctx, target).await,
        UiCommand::Study => handle_study(state, ctx).await,
        UiCommand::Next => handle_next(state, ctx).await,
        UiCommand::Previous => handle_previous(state, ctx).await,
        UiCommand::Flip => handle_flip(state, ctx).await,
        UiCommand::Story => handle_story_request(state, ctx).await,
        UiCommand::Help => ctx.show(View::Help).await,
        UiCommand::Quit => {
            tracing::info!("Quit requested");
            ctx.cancel.cancel();
            Ok(())
        }
    }
}
