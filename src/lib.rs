// Library interface for paddock
// This allows integration tests to access internal modules

pub mod config;
pub mod controller;
pub mod ergast;
pub mod errors;
pub mod normalize;
pub mod ui;

// Re-export commonly used types
pub use config::AppConfig;
pub use controller::{Action, LoadState, ResultsView, ScheduleController, SelectedRace};
pub use ergast::{ErgastClient, Race, RaceRepository, RaceResult};
pub use errors::{FetchError, PaddockError};
pub use normalize::{driver_slug, normalize};
