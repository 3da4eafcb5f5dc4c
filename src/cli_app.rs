//! Top-level CLI definition and dispatch.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use thiserror::Error;

use alsa_profile_switcher::core::config::Config;
use alsa_profile_switcher::core::errors::ApsError;
use alsa_profile_switcher::logger::ActivityLog;
use alsa_profile_switcher::pactl::gateway::{CardGateway, PactlGateway};
use alsa_profile_switcher::pactl::model::{Card, Directory};
use alsa_profile_switcher::tui::commands::execute;
use alsa_profile_switcher::tui::model::{AppCmd, AppMsg};
use alsa_profile_switcher::tui::{self, RuntimeConfig};

/// ALSA profile switcher: browse sound cards and switch their active profile.
#[derive(Debug, Parser)]
#[command(
    name = "aps",
    author,
    version,
    about = "Browse sound cards and switch their profile through pactl",
    long_about = None
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Use this executable instead of the configured pactl.
    #[arg(long, global = true, value_name = "PATH")]
    pactl: Option<PathBuf>,
    /// Do not write the activity log.
    #[arg(long, global = true)]
    no_log: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute; the interactive browser runs when omitted.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Print every card with its profiles.
    List(ListArgs),
    /// Activate a profile on a card without opening the browser.
    SetProfile(SetProfileArgs),
    /// Print the effective configuration as TOML.
    Config,
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct ListArgs {
    /// Print the parsed card directory as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct SetProfileArgs {
    /// Card name as reported by `pactl list cards`.
    card: String,
    /// Profile key to activate.
    profile: String,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApsError),
    /// Output serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render configuration: {0}")]
    Toml(#[from] toml::ser::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected outcome from {0}")]
    Internal(&'static str),
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    let config = effective_config(cli)?;
    let log = ActivityLog::from_config(&config);
    let gateway = PactlGateway::new(config.pactl.program.clone());

    match &cli.command {
        None => {
            tui::run(
                RuntimeConfig::from_config(&config),
                Arc::new(gateway),
                &log,
            )?;
            Ok(())
        }
        Some(Command::List(args)) => run_list(&gateway, &log, args),
        Some(Command::SetProfile(args)) => run_set_profile(&gateway, &log, args),
        Some(Command::Config) => {
            let rendered = toml::to_string_pretty(&config)?;
            let mut stdout = io::stdout().lock();
            write!(stdout, "{rendered}")?;
            Ok(())
        }
        Some(Command::Completions(args)) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Loaded configuration with command-line overrides applied on top.
fn effective_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(program) = &cli.pactl {
        config.pactl.program.clone_from(program);
    }
    if cli.no_log {
        config.logging.enabled = false;
    }
    Ok(config)
}

fn run_list(gateway: &dyn CardGateway, log: &ActivityLog, args: &ListArgs) -> Result<(), CliError> {
    let cards = match execute(gateway, log, &AppCmd::Fetch) {
        Some(AppMsg::DataFetched(cards)) => cards,
        Some(AppMsg::Error(err)) => return Err(err.into()),
        _ => return Err(CliError::Internal("list cards")),
    };

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &cards)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", format_directory(&cards))?;
    }
    Ok(())
}

fn run_set_profile(
    gateway: &dyn CardGateway,
    log: &ActivityLog,
    args: &SetProfileArgs,
) -> Result<(), CliError> {
    let cmd = AppCmd::ApplyProfile {
        card: args.card.clone(),
        profile: args.profile.clone(),
    };
    match execute(gateway, log, &cmd) {
        Some(AppMsg::ProfileChanged) => {
            println!(
                "{} {} -> {}",
                "profile set:".green(),
                args.card,
                args.profile.bold()
            );
            Ok(())
        }
        Some(AppMsg::Error(err)) => Err(err.into()),
        _ => Err(CliError::Internal("set card profile")),
    }
}

fn format_directory(cards: &Directory) -> String {
    if cards.is_empty() {
        return "no cards found\n".to_string();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join("\n")
}

fn format_card(card: &Card) -> String {
    let mut out = String::new();
    let index = card.index.map(|i| format!("#{i} ")).unwrap_or_default();
    out.push_str(&format!("{index}{}\n", card.name.bold()));
    for (label, value) in [
        ("driver", card.driver.as_str()),
        ("description", card.properties.device_description.as_str()),
        ("nick", card.properties.device_nick.as_str()),
        ("product", card.properties.device_product_name.as_str()),
    ] {
        if !value.is_empty() {
            out.push_str(&format!("  {label}: {value}\n"));
        }
    }

    let active = if card.active_profile.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        card.active_profile.clone()
    };
    out.push_str(&format!("  active profile: {active}\n"));
    out.push_str("  profiles:\n");

    let keys = card.sorted_profile_keys();
    let width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
    for key in &keys {
        let Some(profile) = card.profiles.get(key) else {
            continue;
        };
        let marker = if card.is_active(key) { "*" } else { " " };
        let padded = format!("{key:<width$}");
        let key_text = if card.is_active(key) {
            padded.green().to_string()
        } else if profile.available {
            padded
        } else {
            padded.dimmed().to_string()
        };
        let suffix = if profile.available { "" } else { " (unavailable)" };
        let line = format!("  {marker} {key_text}  {}{suffix}", profile.description);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
