//! View state for the schedule screen and the results modal.
//!
//! The controller owns the state and is the only thing that changes it.
//! Fetches run on the tokio runtime and report back through a channel; the
//! owner drains that channel with [`ScheduleController::poll`] (GUI, once per
//! frame) or [`ScheduleController::next_update`] (CLI and tests). Each drained
//! update replaces the affected state in one step.

pub mod state;

use std::sync::Arc;

use log::{debug, error, warn};
use serde_json::Value;
use tokio::{
    runtime::Handle,
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
};

use crate::{PaddockError, ergast::RaceRepository};

pub use state::{Action, LoadState, ResultsView, SelectedRace, reduce};

/// Completed background work waiting to be applied.
#[derive(Debug)]
pub enum Update {
    Load(Action),
    ResultsLoaded(SelectedRace),
    ResultsFailed { round: u32, message: String },
}

type UpdateHook = Arc<dyn Fn() + Send + Sync>;

pub struct ScheduleController<R: RaceRepository + 'static> {
    repository: Arc<R>,
    runtime: Handle,
    updates_tx: UnboundedSender<Update>,
    updates_rx: UnboundedReceiver<Update>,
    load_state: LoadState,
    results: ResultsView,
    on_update: Option<UpdateHook>,
}

impl<R: RaceRepository + 'static> ScheduleController<R> {
    pub fn new(repository: Arc<R>, runtime: Handle) -> Self {
        let (updates_tx, updates_rx) = unbounded_channel();
        Self {
            repository,
            runtime,
            updates_tx,
            updates_rx,
            load_state: LoadState::Idle,
            results: ResultsView::default(),
            on_update: None,
        }
    }

    /// Called from the worker whenever an update is queued, e.g. to wake the UI.
    pub fn with_update_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_update = Some(Arc::new(hook));
        self
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn results_view(&self) -> &ResultsView {
        &self.results
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatching {}", action.kind());
        let previous = std::mem::take(&mut self.load_state);
        self.load_state = reduce(previous, action);
    }

    /// Dispatches a serialized action. A known action with a payload that
    /// does not fit it is returned as an error and leaves the state alone.
    ///
    /// # Panics
    ///
    /// Panics when the action type is not one the controller knows. This is
    /// an integration bug on the sender's side and is never ignored.
    pub fn dispatch_serialized(&mut self, raw: &str) -> Result<(), PaddockError> {
        match parse_action(raw) {
            Ok(action) => {
                self.dispatch(action);
                Ok(())
            }
            Err(e @ PaddockError::UnhandledAction { .. }) => {
                error!("{}", e);
                panic!("{}", e);
            }
            Err(e) => Err(e),
        }
    }

    /// Starts (or restarts) loading the season schedule.
    pub fn load_schedule(&mut self) {
        self.dispatch(Action::FetchInit);

        let repository = Arc::clone(&self.repository);
        let sender = self.sender();
        self.runtime.spawn(async move {
            let action = match repository.fetch_season_schedule().await {
                Ok(races) => Action::FetchSuccess(races),
                Err(e) => Action::FetchFailure(e.to_string()),
            };
            sender.send(Update::Load(action));
        });
    }

    /// Fetches results for `round` and opens the modal once they arrive.
    ///
    /// Failures are only logged: the modal stays as it is and the schedule
    /// is untouched. Requests are not sequenced, so when several selections
    /// overlap the last response to arrive wins, even if it belongs to an
    /// earlier click.
    pub fn select_race(&mut self, round: u32) {
        let race_name = self
            .load_state
            .races()
            .and_then(|races| races.iter().find(|r| r.round == round))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("Round {round}"));

        let repository = Arc::clone(&self.repository);
        let sender = self.sender();
        self.runtime.spawn(async move {
            let update = match repository.fetch_race_results(round).await {
                Ok(results) => Update::ResultsLoaded(SelectedRace {
                    round,
                    race_name,
                    results,
                }),
                Err(e) => Update::ResultsFailed {
                    round,
                    message: e.to_string(),
                },
            };
            sender.send(update);
        });
    }

    pub fn dismiss_modal(&mut self) {
        self.results.dismiss();
    }

    /// Applies every update that has arrived so far. Returns whether
    /// anything was applied.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply(update);
            applied = true;
        }
        applied
    }

    /// Waits for the next update and applies it.
    pub async fn next_update(&mut self) -> bool {
        match self.updates_rx.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Load(action) => self.dispatch(action),
            Update::ResultsLoaded(selected) => {
                if selected.results.is_empty() {
                    warn!("No results published yet for round {}", selected.round);
                }
                self.results.show(selected);
            }
            Update::ResultsFailed { round, message } => {
                error!("Could not load results for round {}: {}", round, message);
            }
        }
    }

    fn sender(&self) -> UpdateSender {
        UpdateSender {
            updates_tx: self.updates_tx.clone(),
            on_update: self.on_update.clone(),
        }
    }
}

struct UpdateSender {
    updates_tx: UnboundedSender<Update>,
    on_update: Option<UpdateHook>,
}

impl UpdateSender {
    fn send(&self, update: Update) {
        // the receiver lives in the controller; a closed channel means it is gone
        if self.updates_tx.send(update).is_err() {
            debug!("Controller dropped before update arrived");
            return;
        }
        if let Some(hook) = &self.on_update {
            hook();
        }
    }
}

/// Parses a serialized action. The `type` decides the action; the payload
/// is only read by actions that carry one.
pub fn parse_action(raw: &str) -> Result<Action, PaddockError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| PaddockError::UnhandledAction {
        kind: raw.to_string(),
    })?;
    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return Err(PaddockError::UnhandledAction {
            kind: raw.to_string(),
        });
    };
    let payload = value.get("payload").cloned().unwrap_or(Value::Null);

    match kind {
        "FETCH_INIT" => Ok(Action::FetchInit),
        "FETCH_SUCCESS" => serde_json::from_value(payload)
            .map(Action::FetchSuccess)
            .map_err(|e| PaddockError::InvalidActionPayload {
                kind: kind.to_string(),
                source: e,
            }),
        "FETCH_FAILURE" => Ok(Action::FetchFailure(failure_message(payload))),
        _ => Err(PaddockError::UnhandledAction {
            kind: kind.to_string(),
        }),
    }
}

fn failure_message(payload: Value) -> String {
    match payload {
        Value::String(message) => message,
        Value::Null => String::new(),
        Value::Object(ref fields) => match fields.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => payload.to_string(),
        },
        other => other.to_string(),
    }
}
