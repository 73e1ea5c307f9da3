use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{CustomType, InquireError, Password, Select, Text};
use weather_core::{
    Config, FetchOutcome, ForecastTab,
    config::MAX_FORECAST_DAYS,
    provider::{forecast_request, provider_from_config},
};

use crate::{render, session::Session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    Hours,
    Days,
}

impl From<TabArg> for ForecastTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Hours => ForecastTab::Hours,
            TabArg::Days => ForecastTab::Days,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the weatherapi.com key and defaults.
    Configure,

    /// Fetch the forecast once and print it.
    Show {
        /// Address or location name; falls back to the configured default.
        location: Option<String>,

        /// Forecast tab to print.
        #[arg(long, value_enum, default_value = "hours")]
        tab: TabArg,

        /// Select forecast day N (0 = today) before printing.
        #[arg(long)]
        day: Option<usize>,

        /// Print the selected day and the day list as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Browse the forecast interactively.
    Browse {
        /// Address or location name; falls back to the configured default.
        location: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, tab, day, json } => show(location, tab.into(), day, json).await,
            Command::Browse { location } => browse(location).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    let location = Text::new("Default location (empty for none):")
        .with_initial_value(cfg.default_location.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read default location")?;

    let days = CustomType::<u8>::new("Forecast days:")
        .with_default(cfg.forecast_days())
        .with_help_message(&format!("1 to {MAX_FORECAST_DAYS}"))
        .prompt()
        .context("Failed to read forecast days")?;

    cfg.api_key = Some(api_key.trim().to_string());
    cfg.default_location = Some(location.trim().to_string()).filter(|l| !l.is_empty());
    cfg.forecast_days = days.clamp(1, MAX_FORECAST_DAYS);
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn session_from_config(location: Option<String>) -> anyhow::Result<Session> {
    let cfg = Config::load()?;
    let location = cfg.resolve_location(location)?;
    let provider = provider_from_config(&cfg)?;
    Ok(Session::new(provider, forecast_request(&cfg, location)))
}

async fn show(
    location: Option<String>,
    tab: ForecastTab,
    day: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = session_from_config(location)?;

    match session.sync().await {
        // `sync` holds the session until its fetch completes, so nothing can supersede it.
        FetchOutcome::Applied | FetchOutcome::Stale => {}
        FetchOutcome::Failed(err) => {
            return Err(anyhow::Error::new(err).context("Failed to fetch the forecast"));
        }
    }

    if let Some(index) = day {
        let record = session.state().days().get(index).cloned().with_context(|| {
            format!("Day {index} is not in the forecast ({} days)", session.state().days().len())
        })?;
        session.select_day(&record);
    }

    if json {
        let out = serde_json::json!({
            "current": session.state().current_day(),
            "days": session.state().days(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    session.select_tab(tab);
    print!("{}", session.render());
    Ok(())
}

const SWITCH_TAB: &str = "Switch tab";
const PICK_DAY: &str = "Pick a day";
const SEARCH: &str = "Search location";
const SYNC: &str = "Sync";
const QUIT: &str = "Quit";

fn cancelled(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

async fn browse(location: Option<String>) -> anyhow::Result<()> {
    let mut session = session_from_config(location)?;
    report(session.sync().await);

    loop {
        print!("\n{}", session.render());

        let action = match Select::new("Action:", vec![SWITCH_TAB, PICK_DAY, SEARCH, SYNC, QUIT]).prompt() {
            Ok(action) => action,
            Err(err) if cancelled(&err) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            SWITCH_TAB => {
                let next = match session.active_tab() {
                    ForecastTab::Hours => ForecastTab::Days,
                    ForecastTab::Days => ForecastTab::Hours,
                };
                session.select_tab(next);
            }
            PICK_DAY => {
                let days = session.state().days().to_vec();
                if days.is_empty() {
                    println!("No forecast days loaded yet.");
                    continue;
                }

                let labels: Vec<String> = days.iter().map(render::list_entry).collect();
                match Select::new("Day:", labels).raw_prompt() {
                    Ok(choice) => {
                        session.select_day(&days[choice.index]);
                    }
                    Err(err) if cancelled(&err) => {}
                    Err(err) => return Err(err.into()),
                }
            }
            SEARCH => {
                let location = match Text::new("Location:")
                    .with_initial_value(session.location())
                    .prompt()
                {
                    Ok(location) => location,
                    Err(err) if cancelled(&err) => continue,
                    Err(err) => return Err(err.into()),
                };
                if location.trim().is_empty() {
                    continue;
                }
                report(session.search(&location).await);
            }
            SYNC => report(session.sync().await),
            _ => break,
        }
    }

    Ok(())
}

fn report(outcome: FetchOutcome) {
    match outcome {
        FetchOutcome::Applied => {}
        FetchOutcome::Stale => tracing::debug!("sync superseded by a newer request"),
        FetchOutcome::Failed(err) => eprintln!("{} ({err})", err.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_parses_tab_and_day() {
        let cli = Cli::try_parse_from(["weather", "show", "London", "--tab", "days", "--day", "1"])
            .unwrap();
        match cli.command {
            Command::Show { location, tab, day, json } => {
                assert_eq!(location.as_deref(), Some("London"));
                assert_eq!(ForecastTab::from(tab), ForecastTab::Days);
                assert_eq!(day, Some(1));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_defaults_to_hours_tab() {
        let cli = Cli::try_parse_from(["weather", "show"]).unwrap();
        match cli.command {
            Command::Show { location, tab, .. } => {
                assert!(location.is_none());
                assert_eq!(ForecastTab::from(tab), ForecastTab::Hours);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_tab_is_rejected() {
        assert!(Cli::try_parse_from(["weather", "show", "--tab", "weeks"]).is_err());
    }
}
