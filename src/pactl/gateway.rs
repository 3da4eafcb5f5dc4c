//! External control gateway: enumerates cards and switches profiles by
//! shelling out to `pactl`.
//!
//! Stateless request/response. No retries; every failure surfaces as one of
//! the `APS-20xx` gateway errors.

use std::path::PathBuf;
use std::process::{Command, Output};

use crate::core::errors::{ApsError, Result};
use crate::pactl::model::Directory;

/// The two operations the UI needs from the audio server.
pub trait CardGateway: Send + Sync {
    /// Enumerate all cards with their profiles.
    fn list_cards(&self) -> Result<Directory>;
    /// Make `profile` the active profile of the card named `card`.
    fn set_profile(&self, card: &str, profile: &str) -> Result<()>;
}

/// [`CardGateway`] backed by the `pactl` command-line utility.
#[derive(Debug, Clone)]
pub struct PactlGateway {
    program: PathBuf,
}

impl Default for PactlGateway {
    fn default() -> Self {
        Self::new("pactl")
    }
}

impl PactlGateway {
    /// Gateway that runs `program` for every call.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ApsError::GatewayUnavailable {
                program: self.program.display().to_string(),
                source,
            })
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(args.iter().map(|s| (*s).to_string()));
        parts.join(" ")
    }
}

impl CardGateway for PactlGateway {
    fn list_cards(&self) -> Result<Directory> {
        let args = ["-f", "json", "list", "cards"];
        let output = self.run(&args)?;
        if !output.status.success() {
            return Err(ApsError::GatewayExit {
                command: self.describe(&args),
                code: output.status.code().unwrap_or(-1),
                diagnostics: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        parse_cards(&output.stdout)
    }

    fn set_profile(&self, card: &str, profile: &str) -> Result<()> {
        let args = ["set-card-profile", card, profile];
        let output = self.run(&args)?;
        if output.status.success() {
            return Ok(());
        }
        Err(ApsError::GatewayExit {
            command: self.describe(&args),
            code: output.status.code().unwrap_or(-1),
            diagnostics: combined_output(&output),
        })
    }
}

/// Parse the JSON card listing.
///
/// # Errors
/// Returns [`ApsError::GatewayParse`] when the payload is not an array of
/// cards or a card has an empty name.
pub fn parse_cards(raw: &[u8]) -> Result<Directory> {
    let cards: Directory = serde_json::from_slice(raw).map_err(|e| ApsError::GatewayParse {
        details: e.to_string(),
    })?;
    if let Some(pos) = cards.iter().position(|c| c.name.is_empty()) {
        return Err(ApsError::GatewayParse {
            details: format!("card at position {pos} has an empty name"),
        });
    }
    Ok(cards)
}

fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
