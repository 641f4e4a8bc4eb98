//! cvtour - terminal host for the CV Generator onboarding tour.
//!
//! Usage: cvtour [--state FILE] [--config FILE] <command>

mod fixture;
mod terminal;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use cvtour_core::app::CompletionStore;
use cvtour_core::domain::Termination;
use cvtour_core::impls::JsonFileStorage;
use cvtour_core::{Decision, Restart, TourConfig, TourController, TourControllerBuilder};

use crate::fixture::{FixturePage, PageFixture};
use crate::terminal::{Console, TerminalAlerter, TerminalDriver, TerminalOverlay, TerminalToast};

#[derive(Parser)]
#[command(name = "cvtour")]
#[command(about = "CV Generator onboarding tour, played in the terminal")]
struct Cli {
    /// File that stores the completion marker
    #[arg(long, global = true, default_value = ".cvtour-state.json")]
    state: PathBuf,

    /// JSON configuration file (CVTOUR_* variables still apply on top)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a page and offer the tour as a first visit would
    Run {
        /// Page fixture (JSON)
        page: PathBuf,

        /// Show the completion message as an alert instead of a toast
        #[arg(long)]
        no_toast: bool,
    },

    /// Clear the marker and show the tour again (help button)
    Restart {
        /// Page fixture (JSON)
        page: PathBuf,

        /// Show the completion message as an alert instead of a toast
        #[arg(long)]
        no_toast: bool,
    },

    /// Print the stored completion marker
    Status,

    /// Remove the stored completion marker
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let storage = Arc::new(JsonFileStorage::new(&cli.state));

    match cli.command {
        Command::Run { page, no_toast } => run(config, storage, &page, no_toast).await,
        Command::Restart { page, no_toast } => restart(config, storage, &page, no_toast).await,
        Command::Status => {
            let store = CompletionStore::new(storage, config.storage_key);
            println!("{}", store.get()?);
            Ok(())
        }
        Command::Reset => {
            let state = storage.path().display().to_string();
            let store = CompletionStore::new(storage, config.storage_key);
            store.clear()?;
            info!(%state, "completion marker removed");
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<TourConfig> {
    let Some(path) = path else {
        return Ok(TourConfig::from_env()?);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Ok(TourConfig::from_json(&text)?.with_overrides(|key| std::env::var(key).ok())?)
}

fn controller(
    config: TourConfig,
    storage: Arc<JsonFileStorage>,
    fixture: PageFixture,
    no_toast: bool,
) -> Result<(TourController, Arc<FixturePage>)> {
    let console = Console::stdin();
    let page = Arc::new(FixturePage::new(fixture.path));

    let mut builder = TourControllerBuilder::new(config)
        .storage(storage)
        .page(page.clone())
        .document(Arc::new(fixture.elements))
        .overlay_host(Arc::new(TerminalOverlay::new(console.clone())))
        .alerter(Arc::new(TerminalAlerter))
        .driver(Arc::new(TerminalDriver::new(console)));
    if !no_toast {
        builder = builder.notifier(Arc::new(TerminalToast));
    }
    Ok((builder.build()?, page))
}

async fn run(
    config: TourConfig,
    storage: Arc<JsonFileStorage>,
    page: &Path,
    no_toast: bool,
) -> Result<()> {
    let fixture = PageFixture::load(page)?;
    let (mut controller, _page) = controller(config, storage, fixture, no_toast)?;

    match controller.init().await? {
        Decision::Started => {
            controller.run_until_terminated().await;
            report(&controller);
        }
        Decision::NotHomePage => println!("not a home page; nothing to show"),
        Decision::AlreadySeen(marker) => println!("tour already {marker}"),
        Decision::StorageUnavailable => println!("completion marker unreadable; tour not offered"),
        Decision::Declined { dont_show_again } => {
            if dont_show_again {
                println!("tour skipped; it will not be offered again");
            } else {
                println!("tour declined for now");
            }
        }
    }
    Ok(())
}

async fn restart(
    config: TourConfig,
    storage: Arc<JsonFileStorage>,
    page: &Path,
    no_toast: bool,
) -> Result<()> {
    let fixture = PageFixture::load(page)?;
    let (mut controller, page) = controller(config, storage, fixture, no_toast)?;

    match controller.restart()? {
        Restart::Started => {
            controller.run_until_terminated().await;
            report(&controller);
        }
        Restart::Navigated => {
            let to = page.navigated().unwrap_or_default();
            println!("marker cleared; open {to} to take the tour");
        }
    }
    Ok(())
}

fn report(controller: &TourController) {
    let Some(session) = controller.last_session() else {
        return;
    };
    let outcome = match session.termination {
        Some(Termination::Completed) => "completed",
        Some(Termination::Exited) => "closed",
        None => return,
    };
    println!(
        "tour {outcome} at step {} of {} ({}, started {})",
        session.current_step + 1,
        session.total_steps,
        session.id,
        session.started_at().format("%H:%M:%S"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_global_state_after_the_subcommand() {
        let cli = Cli::try_parse_from(["cvtour", "run", "home.json", "--state", "s.json"]).unwrap();
        assert_eq!(cli.state, PathBuf::from("s.json"));
        assert!(matches!(
            cli.command,
            Command::Run { ref page, no_toast: false } if page == Path::new("home.json")
        ));
    }

    #[test]
    fn state_defaults_to_the_working_directory() {
        let cli = Cli::try_parse_from(["cvtour", "status"]).unwrap();
        assert_eq!(cli.state, PathBuf::from(".cvtour-state.json"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_without_a_file_starts_from_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.storage_key, TourConfig::default().storage_key);
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let err = load_config(Some(Path::new("no/such/cvtour.json"))).unwrap_err();
        assert!(err.to_string().contains("no/such/cvtour.json"));
    }

    #[test]
    fn restart_accepts_no_toast() {
        let cli = Cli::try_parse_from(["cvtour", "restart", "p.json", "--no-toast"]).unwrap();
        assert!(matches!(cli.command, Command::Restart { no_toast: true, .. }));
    }
}
