use wordbook_core::StudyNavigator;
use wordbook_types::View;

use crate::context::EventContext;
use crate::state::AppState;

/// Enter study mode at the first card
pub async fn handle_study(state: &mut AppState, ctx: &EventContext) -> anyhow::Result<()> {
    state.study = StudyNavigator::new(state.notebook.len());
    state.reset_conversation();
    show_card(state, ctx).await
}

pub async fn handle_next(state: &mut AppState, ctx: &EventContext) -> anyhow::Result<()> {
    move_cursor(state, StudyNavigator::next);
    show_card(state, ctx).await
}

pub async fn handle_previous(state: &mut AppState, ctx: &EventContext) -> anyhow::Result<()> {
    move_cursor(state, StudyNavigator::previous);
    show_card(state, ctx).await
}

/// A different card starts a different conversation
fn move_cursor(state: &mut AppState, step: fn(&mut StudyNavigator)) {
    let Some(nav) = state.study.as_mut() else {
        return;
    };
    let before = nav.index();
    step(nav);
    if nav.index() != before {
        state.reset_conversation();
    }
}

pub async fn handle_flip(state: &mut AppState, ctx: &EventContext) -> anyhow::Result<()> {
    if let Some(nav) = state.study.as_mut() {
        nav.flip();
    }
    show_card(state, ctx).await
}

/// Current card, or the empty state when there is no session
async fn show_card(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let (Some(nav), Some(entry)) = (state.study, state.card()) else {
        return ctx.show(View::EmptyStudy).await;
    };

    ctx.show(View::Card {
        position: nav.index() + 1,
        total: nav.len(),
        entry: entry.clone(),
        flipped: nav.is_flipped(),
    })
    .await
}
