use crate::item::Item;
use crate::list::{ListState, ReconcilePolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PromptAction {
    Add,
    Rename,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PromptOverlay {
    pub(super) message: String,
    pub(super) buffer: String,
    pub(super) action: PromptAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum AppMode {
    Normal,
    Prompt(PromptOverlay),
}

/// Everything the TUI needs to render a frame.
///
/// `cursor` indexes into the filtered view, not the full collection, and is
/// clamped whenever the view can shrink.
#[derive(Debug, Clone)]
pub(super) struct AppModel {
    pub(super) exit: bool,
    pub(super) list: ListState,
    pub(super) cursor: usize,
    pub(super) mode: AppMode,
    pub(super) in_flight: usize,
}

impl AppModel {
    pub(super) fn new(policy: ReconcilePolicy) -> Self {
        Self {
            exit: false,
            list: ListState::new(policy),
            cursor: 0,
            mode: AppMode::Normal,
            in_flight: 0,
        }
    }

    pub(super) fn view_len(&self) -> usize {
        self.list.derived_view().count()
    }

    pub(super) fn cursored_item(&self) -> Option<&Item> {
        self.list.derived_view().nth(self.cursor)
    }

    pub(super) fn select_next(&mut self) {
        let len = self.view_len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub(super) fn select_previous(&mut self) {
        let len = self.view_len();
        if len > 0 {
            self.cursor = if self.cursor == 0 {
                len - 1
            } else {
                self.cursor - 1
            };
        }
    }

    pub(super) fn clamp_cursor(&mut self) {
        let len = self.view_len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub(super) fn is_syncing(&self) -> bool {
        self.in_flight > 0
    }
}
