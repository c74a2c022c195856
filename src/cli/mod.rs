//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, Write};
use std::path::Path;

use clap::Parser;

use crate::config::Settings;
use crate::kubectl::Kubectl;
use crate::secret::OutputFormat;

const EXAMPLES: &str = "Examples:
  kubectl view-secret                           Pick a secret, then a key, interactively
  kubectl view-secret <secret>                  Pick a key (or all) interactively
  kubectl view-secret <secret> <key>            Decode a specific key
  kubectl view-secret <secret> -a               Decode every key
  kubectl view-secret <secret> -n <ns>          Use a different namespace
  kubectl view-secret <secret> -a -o yaml       Decode every key as YAML
  kubectl view-secret <secret> -q               Hide informational messages";

/// kubectl-view-secret: decode Kubernetes secrets.
#[derive(Parser, Debug)]
#[command(
    name = "kubectl-view_secret",
    bin_name = "kubectl view-secret",
    about = "Decode a kubernetes secret by name & key in the current context/cluster/namespace",
    after_help = EXAMPLES,
    version
)]
pub struct Cli {
    /// Secret name (omit to choose from the secrets in the namespace)
    pub secret: Option<String>,

    /// Key to decode (omit to choose interactively)
    pub key: Option<String>,

    /// Decode every key of the secret
    #[arg(short, long)]
    pub all: bool,

    /// Override the namespace defined in the current context
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Path to the kubeconfig file to use
    #[arg(long)]
    pub kubeconfig: Option<String>,

    /// The kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Username to impersonate for the operation
    #[arg(long = "as", value_name = "USER")]
    pub impersonate: Option<String>,

    /// Group to impersonate for the operation (repeatable)
    #[arg(long = "as-group", value_name = "GROUP")]
    pub impersonate_groups: Vec<String>,

    /// Suppress informational output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format: text (default), json or yaml
    #[arg(short, long)]
    pub output: Option<String>,

    /// kubectl binary to run
    #[arg(long, env = "VIEW_SECRET_KUBECTL")]
    pub kubectl: Option<String>,

    /// Path to the config file
    #[arg(long, env = "VIEW_SECRET_CONFIG")]
    pub config: Option<String>,

    /// Print a shell completion script (bash, zsh, fish, powershell, elvish) and exit
    #[arg(long, value_name = "SHELL")]
    pub generate_completions: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by the commands
// ---------------------------------------------------------------------------

/// Load settings from `--config` or the default location.
pub fn load_settings(cli: &Cli) -> crate::errors::Result<Settings> {
    Settings::load_from(cli.config.as_deref().map(Path::new))
}

/// Build the kubectl invocation from CLI flags, falling back to settings.
pub fn kubectl(cli: &Cli, settings: &Settings) -> Kubectl {
    Kubectl {
        binary: cli
            .kubectl
            .clone()
            .unwrap_or_else(|| settings.kubectl.clone()),
        namespace: cli.namespace.clone(),
        kubeconfig: cli.kubeconfig.clone(),
        context: cli.context.clone(),
        impersonate: cli.impersonate.clone(),
        impersonate_groups: cli.impersonate_groups.clone(),
    }
}

/// `--output` wins over the config file; unknown names mean text.
pub fn output_format(cli: &Cli, settings: &Settings) -> OutputFormat {
    OutputFormat::parse_lossy(cli.output.as_deref().unwrap_or(&settings.output))
}

/// The informational sink: stderr, or a discard sink when quiet.
pub fn info_sink(cli: &Cli, settings: &Settings) -> Box<dyn Write> {
    if cli.quiet || settings.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    }
}
