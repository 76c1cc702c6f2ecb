//! Terminal front end for the list controller.
//!
//! The runtime owns an `AppModel`, feeds key presses through `update`, and
//! runs every request the reducer emits on its own tokio task. Finished
//! requests come back over a channel and are applied in the order they
//! complete, so concurrent operations race and the last to land wins.

mod keymap;
mod model;
mod theme;
mod update;
mod view;
mod widgets;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::controller::execute;
use crate::error::Result;
use crate::list::{Outcome, ReconcilePolicy, Request};
use crate::remote::RemoteCollection;
use crate::time::{SharedClock, system_clock};

use model::AppModel;
use update::{Action, update};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The TUI application.
///
/// Must be driven from inside a tokio runtime: remote calls are spawned as
/// tasks while the event loop keeps drawing.
///
/// ```ignore
/// let remote = HttpCollection::new(&settings.base_url, &settings.collection, settings.schema)?;
/// let mut app = App::new(remote, ReconcilePolicy::default());
/// let mut terminal = ratatui::init();
/// let result = app.run(&mut terminal);
/// ratatui::restore();
/// ```
pub struct App<R> {
    model: AppModel,
    remote: R,
    clock: SharedClock,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
}

impl<R> App<R>
where
    R: RemoteCollection + Clone + Send + Sync + 'static,
{
    pub fn new(remote: R, policy: ReconcilePolicy) -> Self {
        Self::new_with_clock(remote, policy, system_clock())
    }

    pub fn new_with_clock(remote: R, policy: ReconcilePolicy, clock: SharedClock) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            model: AppModel::new(policy),
            remote,
            clock,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.start();
        while !self.model.exit {
            terminal.draw(|frame| view::draw(frame, &self.model))?;
            self.drain_outcomes();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Kick off the initial load.
    fn start(&mut self) {
        let request = self.model.list.plan_load();
        self.model.in_flight += 1;
        self.spawn(request);
    }

    fn handle_events(&mut self) -> Result<()> {
        if !event::poll(EVENT_POLL_INTERVAL)? {
            return Ok(());
        }
        if let Event::Key(key_event) = event::read()?
            && key_event.kind == KeyEventKind::Press
        {
            self.handle_key_event(key_event);
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(action) = keymap::translate_key(&self.model.mode, key_event) {
            self.dispatch(action);
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.dispatch(Action::RemoteFinished(outcome));
        }
    }

    fn dispatch(&mut self, action: Action) {
        let now = self.clock.now();
        if let Some(request) = update(&mut self.model, action, now) {
            self.spawn(request);
        }
    }

    fn spawn(&self, request: Request) {
        debug!("Spawning {request:?}");
        let remote = self.remote.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = execute(&remote, request).await;
            // The receiver only goes away when the app is dropped.
            let _ = tx.send(outcome);
        });
    }

    /// Apply outcomes until nothing is in flight.
    #[cfg(test)]
    async fn settle(&mut self) {
        while self.model.is_syncing() {
            match self.outcome_rx.recv().await {
                Some(outcome) => self.dispatch(Action::RemoteFinished(outcome)),
                None => break,
            }
        }
    }
}
