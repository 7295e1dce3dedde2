use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use observatory_common::{Config, SeedDataset};
use observatory_dashboard::{DashboardEvent, DashboardState, DashboardView, Mode};
use observatory_store::{
    client_from_config, FirestoreGateway, MemoryGateway, RiskGateway, RiskRepository, Seeder,
};

mod render;

#[derive(Parser)]
#[command(name = "observatory", about = "AI 4 Society risk observatory")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the store once and print the dashboard
    Dashboard(DashboardArgs),
    /// Replace the store contents with a dataset file
    Seed(SeedArgs),
    /// Print the JSON schema of the dataset file format
    Schema,
}

#[derive(clap::Args)]
struct DashboardArgs {
    /// Slider position; clamped to 2026..=2050
    #[arg(long, default_value_t = 2026)]
    year: i32,

    #[arg(long, value_enum, default_value_t = ModeArg::Monitor)]
    mode: ModeArg,

    /// Select this risk or solution id instead of the mode's default
    #[arg(long)]
    select: Option<String>,

    /// Toggle the mode after entering it (resets the selection)
    #[arg(long)]
    toggle_mode: bool,

    /// Read from a dataset file instead of the store
    #[arg(long)]
    dataset: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SeedArgs {
    #[arg(long)]
    dataset: PathBuf,

    /// Write on top of the current contents instead of clearing first
    #[arg(long)]
    keep_existing: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Monitor,
    Solution,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Monitor => Mode::Monitor,
            ModeArg::Solution => Mode::Solution,
        }
    }
}

impl DashboardArgs {
    /// Interactions replayed on a fresh dashboard state, in order.
    fn events(&self) -> Vec<DashboardEvent> {
        let mut events = Vec::new();
        if Mode::from(self.mode) != Mode::default() {
            events.push(DashboardEvent::ToggleMode);
        }
        if self.toggle_mode {
            events.push(DashboardEvent::ToggleMode);
        }
        events.push(DashboardEvent::SetYear(self.year));
        if let Some(id) = &self.select {
            events.push(DashboardEvent::Select(id.clone()));
        }
        events
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs)?;

    match cli.command {
        Command::Dashboard(args) => dashboard(args).await,
        Command::Seed(args) => seed(args).await,
        Command::Schema => schema(),
    }
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("observatory=info".parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn dashboard(args: DashboardArgs) -> Result<()> {
    let gateway: Arc<dyn RiskGateway> = match &args.dataset {
        Some(path) => Arc::new(MemoryGateway::new(load_dataset(path)?)),
        None => {
            let config = Config::from_env()?;
            config.log_redacted();
            Arc::new(FirestoreGateway::from_config(&config))
        }
    };

    let repository = RiskRepository::new(gateway);
    let snapshot = repository.load().await;
    if let Some(error) = snapshot.error() {
        warn!(%error, "Store partially unavailable");
    }

    let mut state = DashboardState::default();
    for event in args.events() {
        state.apply(event);
    }

    let view = DashboardView::build(&state, &snapshot);
    print!("{}", render::Rendered(&view));

    repository.shutdown();
    Ok(())
}

async fn seed(args: SeedArgs) -> Result<()> {
    let config = Config::from_env()?;
    config.log_redacted();
    if !config.is_emulator() && config.access_token.is_none() {
        warn!("No FIRESTORE_ACCESS_TOKEN set; production writes will likely be rejected");
    }

    let dataset = load_dataset(&args.dataset)?;
    info!(
        risks = dataset.risks.len(),
        solutions = dataset.solutions.len(),
        clear = !args.keep_existing,
        "Seeding store"
    );

    let client = client_from_config(&config);
    let report = Seeder::new(&client)
        .seed(&dataset, !args.keep_existing)
        .await
        .context("Seeding failed")?;

    println!("Seeded project {}: {report}", config.project_id);
    Ok(())
}

fn schema() -> Result<()> {
    let schema = SeedDataset::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn load_dataset(path: &Path) -> Result<SeedDataset> {
    SeedDataset::from_path(path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DashboardArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Command::Dashboard(args) => args,
            _ => panic!("expected dashboard command"),
        }
    }

    #[test]
    fn test_default_dashboard_only_sets_year() {
        let args = parse(&["observatory", "dashboard"]);
        assert_eq!(args.events(), vec![DashboardEvent::SetYear(2026)]);
    }

    #[test]
    fn test_solution_mode_selects_after_toggle() {
        let args = parse(&[
            "observatory",
            "dashboard",
            "--mode",
            "solution",
            "--select",
            "S03",
            "--year",
            "2040",
        ]);
        let mut state = DashboardState::default();
        for event in args.events() {
            state.apply(event);
        }
        assert_eq!(state.mode, Mode::Solution);
        assert_eq!(state.selected_id.as_deref(), Some("S03"));
        assert_eq!(state.year.get(), 2040);
    }

    #[test]
    fn test_toggle_mode_resets_to_default_selection() {
        let args = parse(&["observatory", "dashboard", "--mode", "solution", "--toggle-mode"]);
        let mut state = DashboardState::default();
        for event in args.events() {
            state.apply(event);
        }
        assert_eq!(state.mode, Mode::Monitor);
        assert_eq!(state.selected_id.as_deref(), Some("R01"));
    }

    #[test]
    fn test_json_logs_is_global() {
        let cli = Cli::try_parse_from(["observatory", "schema", "--json-logs"]).unwrap();
        assert!(cli.json_logs);
    }

    #[test]
    fn test_seed_requires_dataset() {
        assert!(Cli::try_parse_from(["observatory", "seed"]).is_err());
    }
}
