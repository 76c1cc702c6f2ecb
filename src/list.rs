//! Local view of the remote collection and its reconciliation rules.
//!
//! `ListState` never talks to the network. Operations that need the remote
//! return a `Request`; the caller executes it and hands the resulting
//! `Outcome` back to `apply`, which may ask for a follow-up resync. Local
//! items only ever change in response to a confirmed outcome, so a failed call
//! cannot leave them diverged from the last server-confirmed state.

use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::{ErrorKind, Result, TaskpadError};
use crate::item::{DisplayMode, Draft, Filter, Item, ItemId, validate_title};

/// What to do after a mutation the server confirmed with the changed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Merge the returned item, then refetch the whole collection.
    Resync,
    /// Merge the returned item and stop there.
    Merge,
}

/// Reconciliation per mutating operation. Deletes are always patched locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcilePolicy {
    pub add: Reconcile,
    pub toggle: Reconcile,
    pub edit: Reconcile,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            add: Reconcile::Resync,
            toggle: Reconcile::Resync,
            edit: Reconcile::Resync,
        }
    }
}

impl ReconcilePolicy {
    pub fn merge_only() -> Self {
        Self {
            add: Reconcile::Merge,
            toggle: Reconcile::Merge,
            edit: Reconcile::Merge,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target_id: ItemId,
    pub draft_title: String,
}

/// Controller operation a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Toggle,
    Save,
    Delete,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Load => "load todos",
            Operation::Add => "add todo",
            Operation::Toggle => "update todo",
            Operation::Save => "save changes",
            Operation::Delete => "delete todo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub operation: Operation,
    pub kind: ErrorKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.operation.verb(), self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCause {
    Toggle,
    Edit,
}

/// A remote call the state machine wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListAll,
    Create(Draft),
    Update { item: Item, cause: UpdateCause },
    Delete(ItemId),
}

/// The result of executing a `Request`.
#[derive(Debug)]
pub enum Outcome {
    Listed(Result<Vec<Item>>),
    Created(Result<Item>),
    Updated {
        id: ItemId,
        cause: UpdateCause,
        result: Result<Item>,
    },
    Deleted {
        id: ItemId,
        result: Result<()>,
    },
}

#[derive(Debug, Clone)]
pub struct ListState {
    items: Vec<Item>,
    filter: Filter,
    edit_session: Option<EditSession>,
    display_mode: DisplayMode,
    last_error: Option<ErrorInfo>,
    policy: ReconcilePolicy,
    loaded: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(ReconcilePolicy::default())
    }
}

impl ListState {
    pub fn new(policy: ReconcilePolicy) -> Self {
        Self {
            items: Vec::new(),
            filter: Filter::default(),
            edit_session: None,
            display_mode: DisplayMode::default(),
            last_error: None,
            policy,
            loaded: false,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit_session.as_ref()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn last_error(&self) -> Option<&ErrorInfo> {
        self.last_error.as_ref()
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    /// Whether a full fetch has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Items passing the current filter, in collection order.
    ///
    /// The iterator is lazy and can be cloned to walk the view again.
    pub fn derived_view(&self) -> impl Iterator<Item = &Item> + Clone + '_ {
        let filter = self.filter;
        self.items.iter().filter(move |item| filter.matches(item))
    }

    pub fn plan_load(&self) -> Request {
        Request::ListAll
    }

    pub fn plan_add(&self, title: &str) -> Option<Request> {
        match validate_title(title) {
            Ok(title) => Some(Request::Create(Draft::new(title))),
            Err(e) => {
                debug!("Ignoring add: {e}");
                None
            }
        }
    }

    pub fn plan_toggle(&self, item: &Item) -> Request {
        Request::Update {
            item: item.with_completed_flipped(),
            cause: UpdateCause::Toggle,
        }
    }

    pub fn plan_delete(&self, id: &ItemId) -> Request {
        Request::Delete(id.clone())
    }

    /// Start renaming `item`, discarding any other draft.
    pub fn begin_edit(&mut self, item: &Item) {
        if let Some(previous) = &self.edit_session
            && previous.target_id != item.id
        {
            debug!("Discarding draft for item {}", previous.target_id);
        }
        self.edit_session = Some(EditSession {
            target_id: item.id.clone(),
            draft_title: item.title.clone(),
        });
    }

    pub fn update_draft(&mut self, text: &str) {
        if let Some(session) = &mut self.edit_session {
            session.draft_title = text.to_string();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_session = None;
    }

    /// Build the save request for the active session.
    ///
    /// Returns `None` without touching the session when there is nothing to
    /// save: no session, a blank draft, or a target that is no longer listed.
    pub fn plan_commit(&self) -> Option<Request> {
        let session = self.edit_session.as_ref()?;
        if validate_title(&session.draft_title).is_err() {
            debug!("Ignoring commit of blank draft");
            return None;
        }
        let original = self.find(&session.target_id)?;
        Some(Request::Update {
            item: original.with_title(&session.draft_title),
            cause: UpdateCause::Edit,
        })
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn toggle_display_mode(&mut self) {
        self.display_mode = self.display_mode.toggled();
    }

    /// Fold a finished remote call into local state.
    ///
    /// Returns the follow-up request, if the reconciliation policy wants one.
    pub fn apply(&mut self, outcome: Outcome, now: DateTime<Utc>) -> Option<Request> {
        match outcome {
            Outcome::Listed(Ok(items)) => {
                info!("Resynced {} items", items.len());
                self.items = items;
                self.loaded = true;
                self.last_error = None;
                self.drop_orphaned_session();
                None
            }
            Outcome::Listed(Err(e)) => {
                self.record(Operation::Load, &e, now);
                None
            }
            Outcome::Created(Ok(item)) => {
                self.merge(item);
                self.follow_up(self.policy.add)
            }
            Outcome::Created(Err(e)) => {
                self.record(Operation::Add, &e, now);
                None
            }
            Outcome::Updated {
                id,
                cause,
                result: Ok(item),
            } => {
                if cause == UpdateCause::Edit
                    && self
                        .edit_session
                        .as_ref()
                        .is_some_and(|session| session.target_id == id)
                {
                    self.edit_session = None;
                }
                self.merge(item);
                match cause {
                    UpdateCause::Toggle => self.follow_up(self.policy.toggle),
                    UpdateCause::Edit => self.follow_up(self.policy.edit),
                }
            }
            Outcome::Updated {
                cause,
                result: Err(e),
                ..
            } => {
                let operation = match cause {
                    UpdateCause::Toggle => Operation::Toggle,
                    UpdateCause::Edit => Operation::Save,
                };
                self.record(operation, &e, now);
                None
            }
            Outcome::Deleted { id, result: Ok(()) } => {
                self.remove(&id);
                None
            }
            Outcome::Deleted { id, result: Err(e) } => {
                self.record(Operation::Delete, &e, now);
                if e.is_not_found() {
                    self.remove(&id);
                }
                None
            }
        }
    }

    fn follow_up(&self, reconcile: Reconcile) -> Option<Request> {
        match reconcile {
            Reconcile::Resync => Some(Request::ListAll),
            Reconcile::Merge => None,
        }
    }

    /// Replace the item with the same id in place, or append it.
    fn merge(&mut self, item: Item) {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    fn remove(&mut self, id: &ItemId) {
        self.items.retain(|item| &item.id != id);
        if self
            .edit_session
            .as_ref()
            .is_some_and(|session| &session.target_id == id)
        {
            self.edit_session = None;
        }
    }

    fn drop_orphaned_session(&mut self) {
        if let Some(session) = &self.edit_session
            && self.find(&session.target_id).is_none()
        {
            debug!("Edited item {} vanished on resync", session.target_id);
            self.edit_session = None;
        }
    }

    fn record(&mut self, operation: Operation, e: &TaskpadError, now: DateTime<Utc>) {
        let info = ErrorInfo {
            operation,
            kind: e.kind(),
            message: e.to_string(),
            at: now,
        };
        warn!("{info}");
        self.last_error = Some(info);
    }
}
