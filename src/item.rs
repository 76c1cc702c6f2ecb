//! Canonical task item model shared by the remote client, the controller, and
//! the terminal front-end.
//!
//! Wire-level naming differences are handled in `wire`; everything else in
//! the crate only sees the types defined here.

use std::fmt;

use crate::error::{Result, TaskpadError};

/// Server-assigned identifier. Opaque to the client; never generated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId(n.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub completed: bool,
    /// Carried through updates untouched; the client never edits it.
    pub description: String,
}

impl Item {
    /// Full-replace payload with the completion flag flipped.
    pub fn with_completed_flipped(&self) -> Item {
        Item {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Full-replace payload with a new title.
    pub fn with_title(&self, title: &str) -> Item {
        Item {
            title: title.to_string(),
            ..self.clone()
        }
    }
}

/// Payload for a create call. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub completed: bool,
    pub description: String,
}

impl Draft {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            completed: false,
            description: String::new(),
        }
    }
}

/// Rejects titles that are empty after trimming.
pub fn validate_title(title: &str) -> Result<&str> {
    if title.trim().is_empty() {
        Err(TaskpadError::validation("title must not be empty"))
    } else {
        Ok(title)
    }
}

/// Local view predicate. Never sent to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub fn matches(self, item: &Item) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => item.completed,
            Filter::Pending => !item.completed,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Completed,
            Filter::Completed => Filter::Pending,
            Filter::Pending => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Completed => "Completed",
            Filter::Pending => "Pending",
        }
    }

    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Pending];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str, completed: bool) -> Item {
        Item {
            id: ItemId::from(id),
            title: title.to_string(),
            completed,
            description: "keep me".to_string(),
        }
    }

    #[test]
    fn validate_title_rejects_blank_input() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   \t").is_err());
        assert_eq!(validate_title(" Buy milk ").unwrap(), " Buy milk ");
    }

    #[test]
    fn flipping_completed_preserves_other_fields() {
        let original = item(1, "A", false);
        let flipped = original.with_completed_flipped();
        assert!(flipped.completed);
        assert_eq!(flipped.id, original.id);
        assert_eq!(flipped.title, "A");
        assert_eq!(flipped.description, "keep me");
    }

    #[test]
    fn retitling_preserves_completion_and_description() {
        let original = item(7, "old", true);
        let renamed = original.with_title("new");
        assert_eq!(renamed.title, "new");
        assert!(renamed.completed);
        assert_eq!(renamed.description, "keep me");
    }

    #[test]
    fn filter_predicates() {
        let done = item(1, "done", true);
        let open = item(2, "open", false);
        assert!(Filter::All.matches(&done) && Filter::All.matches(&open));
        assert!(Filter::Completed.matches(&done) && !Filter::Completed.matches(&open));
        assert!(Filter::Pending.matches(&open) && !Filter::Pending.matches(&done));
    }

    #[test]
    fn filter_cycles_through_all_values() {
        let mut filter = Filter::default();
        for expected in [Filter::Completed, Filter::Pending, Filter::All] {
            filter = filter.next();
            assert_eq!(filter, expected);
        }
    }

    #[test]
    fn display_mode_defaults_to_light_and_toggles() {
        let mode = DisplayMode::default();
        assert!(!mode.is_dark());
        assert!(mode.toggled().is_dark());
        assert_eq!(mode.toggled().toggled(), DisplayMode::Light);
    }
}
