use std::sync::Arc;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::info;
use paddock::{
    AppConfig, ErgastClient, LoadState, PaddockError, RaceResult, ScheduleController, driver_slug,
    ui::PaddockApp,
};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root of the Ergast-compatible API for this run. ergast.com is retired;
    /// point this at a mirror such as https://api.jolpi.ca/ergast/f1
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Season to show for this run, a year or "current"
    #[arg(short, long, global = true)]
    season: Option<String>,

    /// Log to the terminal in release builds too
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the schedule window (default)
    Gui,
    /// Print the season schedule
    Schedule,
    /// Print the results of one round
    Results { round: u32 },
    /// Print the headshot slug for a driver
    Slug { given_name: String, family_name: String },
}

fn build_runtime() -> Result<Runtime, PaddockError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| PaddockError::RuntimeError { source: e })
}

/// `stored` is what the app writes back on exit; `run_config` only feeds the
/// client.
fn gui(stored: AppConfig, run_config: &AppConfig) -> Result<(), PaddockError> {
    let runtime = build_runtime()?;
    let repository = Arc::new(ErgastClient::from_config(run_config));

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("Paddock")
        .with_inner_size(stored.window_size())
        .with_position(stored.window_position.clone());

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Paddock",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaddockApp::new(repository, handle, stored, cc)))),
    )
    .map_err(|e| PaddockError::GuiError {
        description: e.to_string(),
    })
}

fn schedule(app_config: &AppConfig) -> Result<(), PaddockError> {
    let runtime = build_runtime()?;
    let repository = Arc::new(ErgastClient::from_config(app_config));
    let mut controller = ScheduleController::new(repository, runtime.handle().clone());

    controller.load_schedule();
    runtime.block_on(controller.next_update());

    match controller.load_state() {
        LoadState::Loaded(races) => {
            println!(
                "{:>5}  {:<32} {:<40} {:<10} {}",
                "Round", "Race name", "Circuit name", "Date", "Time"
            );
            for race in races {
                println!(
                    "{:>5}  {:<32} {:<40} {:<10} {}",
                    race.round,
                    race.name,
                    race.circuit_name,
                    race.date,
                    race.time.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        LoadState::Failed(message) => Err(PaddockError::ScheduleUnavailable {
            message: message.clone(),
        }),
        LoadState::Idle | LoadState::Loading => Err(PaddockError::ScheduleUnavailable {
            message: "request did not complete".to_string(),
        }),
    }
}

fn format_result(result: &RaceResult) -> String {
    [
        format!("{:>3}", result.position),
        format!("{:<26}", result.driver_name),
        format!("{:<14}", result.nationality),
        format!("{:<20}", result.team),
        format!("{:<12}", result.time.as_deref().unwrap_or("")),
        format!("{:>5}", result.points),
        result.headshot_url.clone(),
    ]
    .iter()
    .join(" ")
}

fn results(app_config: &AppConfig, round: u32) -> Result<(), PaddockError> {
    let runtime = build_runtime()?;
    let repository = Arc::new(ErgastClient::from_config(app_config));
    let mut controller = ScheduleController::new(repository, runtime.handle().clone());

    controller.select_race(round);
    runtime.block_on(controller.next_update());

    let selection = controller
        .results_view()
        .visible_selection()
        .ok_or(PaddockError::ResultsUnavailable { round })?;
    println!("{} Results", selection.race_name);
    println!("{}", selection.results.iter().map(format_result).join("\n"));
    Ok(())
}

fn main() {
    let cli = Args::parse();
    if cfg!(debug_assertions) || cli.verbose {
        colog::init();
    }

    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let stored = AppConfig::from_local_file().unwrap_or_default();
    let app_config = stored.with_overrides(cli.base_url, cli.season);
    info!(
        "Using {} for season {}",
        app_config.api_base_url, app_config.season
    );

    let outcome = match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => gui(stored, &app_config),
        Commands::Schedule => schedule(&app_config),
        Commands::Results { round } => results(&app_config, round),
        Commands::Slug {
            given_name,
            family_name,
        } => {
            println!("{}", driver_slug(&given_name, &family_name));
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
