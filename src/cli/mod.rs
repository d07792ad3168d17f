//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::sync::OnceLock;

use clap::Parser;
use regex::Regex;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::encoder::SecretEncoder;
use crate::errors::{ClaspSecretsError, Result};

/// clasp-secrets CLI: move clasp credentials into GitHub Actions secrets.
#[derive(Parser)]
#[command(
    name = "clasp-secrets",
    about = "Upload clasp credentials (~/.clasprc.json) to GitHub Actions secrets",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Secret layout: single-blob (CLASPRC_JSON) or field-by-field (CLASP_*)
    #[arg(long, value_enum, env = "CLASP_SECRETS_ENCODING", global = true)]
    pub encoding: Option<SecretEncoder>,

    /// GitHub CLI binary to run (default: gh)
    #[arg(long = "gh", value_name = "PATH", env = "CLASP_SECRETS_GH", global = true)]
    pub gh: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Upload local ~/.clasprc.json credentials to GitHub Secrets via `gh secret set`
    Upload {
        /// GitHub repository (owner/repo)
        repo: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete clasp-related GitHub Secrets from a repository
    Delete {
        /// GitHub repository (owner/repo)
        repo: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show whether the clasp secrets exist in a repository
    List {
        /// GitHub repository (owner/repo)
        repo: String,
    },

    /// Check that ~/.clasprc.json is present and complete
    Verify,

    /// Write ~/.clasprc.json from CLASP_* environment variables (for CI)
    Seed,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Set up `tracing` output on stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// logs for this crate with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "clasp_secrets=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load `.clasp-secrets.toml` from the working directory and apply the
/// global command-line overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok(settings.with_overrides(cli.encoding, cli.gh.as_deref()))
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| ClaspSecretsError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Validate that a repository argument looks like `owner/name`.
///
/// Only letters, digits, `-`, `_` and `.` are allowed on either side, so
/// nothing unexpected reaches the `gh` command line.
pub fn validate_repo(repo: &str) -> Result<()> {
    static REPO_RE: OnceLock<Regex> = OnceLock::new();
    let re = REPO_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("repository pattern is valid")
    });

    if !re.is_match(repo) || repo.split('/').any(|part| part == "." || part == "..") {
        return Err(ClaspSecretsError::InvalidRepo(repo.to_string()));
    }

    Ok(())
}
