use serde::{Deserialize, Serialize};

use crate::ergast::{Race, RaceResult};

/// Progress of the season schedule load. Races only exist once loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Race>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn races(&self) -> Option<&[Race]> {
        match self {
            LoadState::Loaded(races) => Some(races),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Transitions of the schedule load. Serialized as `{"type": ..., "payload": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    FetchInit,
    FetchSuccess(Vec<Race>),
    FetchFailure(String),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::FetchInit => "FETCH_INIT",
            Action::FetchSuccess(_) => "FETCH_SUCCESS",
            Action::FetchFailure(_) => "FETCH_FAILURE",
        }
    }
}

/// Computes the next load state. Every action is accepted from every state:
/// a late success or failure simply replaces whatever is there.
pub fn reduce(_state: LoadState, action: Action) -> LoadState {
    match action {
        Action::FetchInit => LoadState::Loading,
        Action::FetchSuccess(races) => LoadState::Loaded(races),
        Action::FetchFailure(message) => LoadState::Failed(message),
    }
}

/// Results shown in the modal, with the race they belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedRace {
    pub round: u32,
    pub race_name: String,
    pub results: Vec<RaceResult>,
}

/// Modal state. `visible` is only ever true while `selected` is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultsView {
    selected: Option<SelectedRace>,
    visible: bool,
}

impl ResultsView {
    pub fn show(&mut self, selected: SelectedRace) {
        self.selected = Some(selected);
        self.visible = true;
    }

    /// Hides the modal and keeps the last results around.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> Option<&SelectedRace> {
        self.selected.as_ref()
    }

    /// The selection to render, if the modal is open.
    pub fn visible_selection(&self) -> Option<&SelectedRace> {
        self.selected.as_ref().filter(|_| self.visible)
    }
}
