//! Pure reducer for the TUI.
//!
//! `update` folds one action into the model and returns the remote request to
//! run next, if any. The runtime executes requests on background tasks and
//! feeds each `Outcome` back in as `Action::RemoteFinished`, so outcomes are
//! applied in completion order and the last one to land wins.

use chrono::{DateTime, Utc};

use crate::list::{Outcome, Request};

use super::keymap::Action as NormalAction;
use super::model::{AppMode, AppModel, PromptAction, PromptOverlay};

#[derive(Debug)]
pub(super) enum Action {
    Normal(NormalAction),
    PromptSubmit,
    PromptCancel,
    PromptInput(char),
    PromptBackspace,
    RemoteFinished(Outcome),
}

pub(super) fn update(model: &mut AppModel, action: Action, now: DateTime<Utc>) -> Option<Request> {
    let effect = match action {
        Action::Normal(action) => update_normal_action(model, action),
        Action::PromptSubmit => submit_prompt(model),
        Action::PromptCancel => {
            cancel_prompt(model);
            None
        }
        Action::PromptInput(c) => {
            edit_prompt_buffer(model, |buffer| buffer.push(c));
            None
        }
        Action::PromptBackspace => {
            edit_prompt_buffer(model, |buffer| {
                buffer.pop();
            });
            None
        }
        Action::RemoteFinished(outcome) => {
            model.in_flight = model.in_flight.saturating_sub(1);
            let follow_up = model.list.apply(outcome, now);
            model.clamp_cursor();
            follow_up
        }
    };

    if effect.is_some() {
        model.in_flight += 1;
    }
    effect
}

fn update_normal_action(model: &mut AppModel, action: NormalAction) -> Option<Request> {
    match action {
        NormalAction::Quit => {
            model.exit = true;
            None
        }
        NormalAction::NextItem => {
            model.select_next();
            None
        }
        NormalAction::PreviousItem => {
            model.select_previous();
            None
        }
        NormalAction::ToggleComplete => model
            .cursored_item()
            .map(|item| model.list.plan_toggle(item)),
        NormalAction::Rename => {
            open_rename_prompt(model);
            None
        }
        NormalAction::Create => {
            model.mode = AppMode::Prompt(PromptOverlay {
                message: "New todo: ".to_string(),
                buffer: String::new(),
                action: PromptAction::Add,
            });
            None
        }
        NormalAction::Delete => model
            .cursored_item()
            .map(|item| model.list.plan_delete(&item.id)),
        NormalAction::CycleFilter => {
            model.list.set_filter(model.list.filter().next());
            model.clamp_cursor();
            None
        }
        NormalAction::ToggleDisplayMode => {
            model.list.toggle_display_mode();
            None
        }
        NormalAction::Reload => Some(model.list.plan_load()),
    }
}

/// Open the rename prompt, resuming a draft that is still pending for the
/// cursored item.
fn open_rename_prompt(model: &mut AppModel) {
    let Some(item) = model.cursored_item().cloned() else {
        return;
    };

    let resumes_draft = model
        .list
        .edit_session()
        .is_some_and(|session| session.target_id == item.id);
    if !resumes_draft {
        model.list.begin_edit(&item);
    }

    let buffer = model
        .list
        .edit_session()
        .map(|session| session.draft_title.clone())
        .unwrap_or_default();
    model.mode = AppMode::Prompt(PromptOverlay {
        message: "Rename: ".to_string(),
        buffer,
        action: PromptAction::Rename,
    });
}

fn edit_prompt_buffer<F>(model: &mut AppModel, op: F)
where
    F: FnOnce(&mut String),
{
    if let AppMode::Prompt(overlay) = &mut model.mode {
        op(&mut overlay.buffer);
        if overlay.action == PromptAction::Rename {
            model.list.update_draft(&overlay.buffer);
        }
    }
}

fn submit_prompt(model: &mut AppModel) -> Option<Request> {
    let AppMode::Prompt(overlay) = &model.mode else {
        return None;
    };

    let request = match overlay.action {
        PromptAction::Add => model.list.plan_add(&overlay.buffer),
        PromptAction::Rename => model.list.plan_commit(),
    };
    // Blank input keeps the prompt open.
    if request.is_some() {
        model.mode = AppMode::Normal;
    }
    request
}

fn cancel_prompt(model: &mut AppModel) {
    if let AppMode::Prompt(overlay) = &model.mode
        && overlay.action == PromptAction::Rename
    {
        model.list.cancel_edit();
    }
    model.mode = AppMode::Normal;
}
