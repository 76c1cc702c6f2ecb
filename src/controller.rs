//! The list controller: `ListState` wired to a `RemoteCollection`.
//!
//! Each operation plans a request, awaits it, and folds the outcome back in,
//! following up with a resync when the reconciliation policy asks for one.
//! Failures are recorded in `last_error` and never returned to the caller.

use crate::error::Result;
use crate::item::{DisplayMode, Filter, Item, ItemId};
use crate::list::{EditSession, ErrorInfo, ListState, Outcome, ReconcilePolicy, Request};
use crate::remote::RemoteCollection;
use crate::time::{SharedClock, system_clock};

/// Run one request against the remote.
pub async fn execute<R: RemoteCollection + ?Sized>(remote: &R, request: Request) -> Outcome {
    match request {
        Request::ListAll => Outcome::Listed(remote.list_all().await),
        Request::Create(draft) => Outcome::Created(remote.create(&draft).await),
        Request::Update { item, cause } => {
            let result: Result<Item> = remote.update(&item.id, &item).await;
            Outcome::Updated {
                id: item.id,
                cause,
                result,
            }
        }
        Request::Delete(id) => {
            let result = remote.delete(&id).await;
            Outcome::Deleted { id, result }
        }
    }
}

pub struct ListController<R> {
    remote: R,
    state: ListState,
    clock: SharedClock,
}

impl<R: RemoteCollection> ListController<R> {
    pub fn new(remote: R) -> Self {
        Self::with_policy(remote, ReconcilePolicy::default())
    }

    pub fn with_policy(remote: R, policy: ReconcilePolicy) -> Self {
        Self::new_with_clock(remote, policy, system_clock())
    }

    pub fn new_with_clock(remote: R, policy: ReconcilePolicy, clock: SharedClock) -> Self {
        Self {
            remote,
            state: ListState::new(policy),
            clock,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        self.state.items()
    }

    pub fn filter(&self) -> Filter {
        self.state.filter()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.state.edit_session()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.state.display_mode()
    }

    pub fn last_error(&self) -> Option<&ErrorInfo> {
        self.state.last_error()
    }

    pub fn derived_view(&self) -> impl Iterator<Item = &Item> + Clone + '_ {
        self.state.derived_view()
    }

    pub async fn initialize(&mut self) {
        let request = self.state.plan_load();
        self.drive(request).await;
    }

    /// Refetch the collection on demand.
    pub async fn reload(&mut self) {
        self.initialize().await;
    }

    pub async fn add_item(&mut self, title: &str) {
        if let Some(request) = self.state.plan_add(title) {
            self.drive(request).await;
        }
    }

    pub async fn toggle_complete(&mut self, item: &Item) {
        let request = self.state.plan_toggle(item);
        self.drive(request).await;
    }

    pub fn begin_edit(&mut self, item: &Item) {
        self.state.begin_edit(item);
    }

    pub fn update_draft(&mut self, text: &str) {
        self.state.update_draft(text);
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    pub async fn commit_edit(&mut self) {
        if let Some(request) = self.state.plan_commit() {
            self.drive(request).await;
        }
    }

    pub async fn delete_item(&mut self, id: &ItemId) {
        let request = self.state.plan_delete(id);
        self.drive(request).await;
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.state.set_filter(filter);
    }

    pub fn toggle_display_mode(&mut self) {
        self.state.toggle_display_mode();
    }

    async fn drive(&mut self, request: Request) {
        let mut next = Some(request);
        while let Some(request) = next {
            let outcome = execute(&self.remote, request).await;
            next = self.state.apply(outcome, self.clock.now());
        }
    }
}
