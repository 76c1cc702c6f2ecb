use std::sync::LazyLock;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::model::AppMode;
use super::update::Action as AppAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Action {
    Quit,
    NextItem,
    PreviousItem,
    ToggleComplete,
    Rename,
    Create,
    Delete,
    CycleFilter,
    ToggleDisplayMode,
    Reload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct KeyBinding {
    pub(super) action: Action,
    pub(super) key_code: KeyCode,
    pub(super) help_token: &'static str,
}

const HELP_SUFFIX: &str = "Ops affect the cursored item.";

const KEY_BINDINGS: [KeyBinding; 12] = [
    KeyBinding {
        action: Action::NextItem,
        key_code: KeyCode::Char('j'),
        help_token: "j/k-nav",
    },
    KeyBinding {
        action: Action::PreviousItem,
        key_code: KeyCode::Char('k'),
        help_token: "j/k-nav",
    },
    KeyBinding {
        action: Action::NextItem,
        key_code: KeyCode::Down,
        help_token: "j/k-nav",
    },
    KeyBinding {
        action: Action::PreviousItem,
        key_code: KeyCode::Up,
        help_token: "j/k-nav",
    },
    KeyBinding {
        action: Action::Create,
        key_code: KeyCode::Char('c'),
        help_token: "c-new",
    },
    KeyBinding {
        action: Action::ToggleComplete,
        key_code: KeyCode::Char('e'),
        help_token: "e-done",
    },
    KeyBinding {
        action: Action::Rename,
        key_code: KeyCode::Char('E'),
        help_token: "E-edit",
    },
    KeyBinding {
        action: Action::Delete,
        key_code: KeyCode::Char('d'),
        help_token: "d-delete",
    },
    KeyBinding {
        action: Action::CycleFilter,
        key_code: KeyCode::Char('f'),
        help_token: "f-filter",
    },
    KeyBinding {
        action: Action::ToggleDisplayMode,
        key_code: KeyCode::Char('m'),
        help_token: "m-dark",
    },
    KeyBinding {
        action: Action::Reload,
        key_code: KeyCode::Char('r'),
        help_token: "r-reload",
    },
    KeyBinding {
        action: Action::Quit,
        key_code: KeyCode::Char('q'),
        help_token: "q-quit",
    },
];

static HELP_TEXT: LazyLock<String> = LazyLock::new(|| {
    let mut tokens: Vec<&'static str> = Vec::new();
    for binding in KEY_BINDINGS {
        if !tokens.contains(&binding.help_token) {
            tokens.push(binding.help_token);
        }
    }

    let joined_tokens = tokens.join(", ");
    format!("{joined_tokens}. {HELP_SUFFIX}")
});

pub(super) fn action_for_key(key_code: KeyCode) -> Option<Action> {
    KEY_BINDINGS
        .iter()
        .find(|binding| binding.key_code == key_code)
        .map(|binding| binding.action)
}

#[cfg(test)]
pub(super) fn key_for_action(action: Action) -> KeyCode {
    KEY_BINDINGS
        .iter()
        .find(|binding| binding.action == action)
        .map(|binding| binding.key_code)
        .expect("all actions must have a key binding")
}

pub(super) fn help_text() -> &'static str {
    HELP_TEXT.as_str()
}

/// Translate a key press into a reducer action for the current mode.
pub(super) fn translate_key(mode: &AppMode, key_event: KeyEvent) -> Option<AppAction> {
    match mode {
        AppMode::Prompt(_) => match key_event.code {
            KeyCode::Enter => Some(AppAction::PromptSubmit),
            KeyCode::Esc => Some(AppAction::PromptCancel),
            KeyCode::Backspace => Some(AppAction::PromptBackspace),
            KeyCode::Char(c)
                if key_event.modifiers.is_empty() || key_event.modifiers == KeyModifiers::SHIFT =>
            {
                Some(AppAction::PromptInput(c))
            }
            _ => None,
        },
        AppMode::Normal => action_for_key(key_event.code).map(AppAction::Normal),
    }
}
