//! `kubectl view-secret [SECRET] [KEY]` — fetch, decode and print a secret.

use std::io::{self, Write};

use tracing::debug;

use crate::cli::output;
use crate::cli::{info_sink, kubectl, load_settings, output_format, Cli};
use crate::errors::{Result, ViewSecretError};
use crate::kubectl::SecretSource;
use crate::prompt::{self, Prompter};
use crate::secret::{render, resolve, OutputFormat, Request, Resolution, Secret, SecretList};

/// What the operator asked to see.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub secret: Option<String>,
    pub key: Option<String>,
    pub decode_all: bool,
    pub format: OutputFormat,
}

/// Execute the view command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let source = kubectl(cli, &settings);

    let options = ViewOptions {
        secret: cli.secret.clone(),
        key: cli.key.clone(),
        decode_all: cli.all,
        format: output_format(cli, &settings),
    };

    let mut info = info_sink(cli, &settings);
    let mut prompter = prompt::for_stdin(info_sink(cli, &settings));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(&source, &options, &mut prompter, &mut out, &mut info)
}

/// Fetch, resolve and render one secret.
///
/// Nothing reaches `out` unless every step succeeds.
pub fn run(
    source: &dyn SecretSource,
    options: &ViewOptions,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
    info: &mut dyn Write,
) -> Result<()> {
    let secret = match options.secret.as_deref().filter(|s| !s.is_empty()) {
        Some(name) => Secret::from_json(&source.get_secret(name)?)?,
        None => pick_secret(source, prompter, info)?,
    };

    let request = Request {
        decode_all: options.decode_all,
        key: options.key.as_deref(),
    };
    let resolution = resolve(&secret, request, prompter)?;

    match &resolution {
        Resolution::Single {
            entry,
            auto_selected: true,
        } => {
            output::info(info, &format!("Viewing only available key: {}", entry.key))?;
        }
        Resolution::Single {
            entry,
            auto_selected: false,
        } if request.key.map_or(true, str::is_empty) => {
            output::tip(
                info,
                &format!(
                    "next time: kubectl view-secret {} {}",
                    secret.name(),
                    entry.key
                ),
            )?;
        }
        _ => {}
    }

    debug!(format = %options.format, entries = resolution.key_values().len(), "rendering");
    render(out, resolution.key_values(), &secret, options.format)
}

/// No secret name given: list the namespace and let the operator choose.
fn pick_secret(
    source: &dyn SecretSource,
    prompter: &mut dyn Prompter,
    info: &mut dyn Write,
) -> Result<Secret> {
    let list = SecretList::from_json(&source.list_secrets()?)?;
    let names = list.names();

    let chosen = match names.as_slice() {
        [] => return Err(ViewSecretError::NoSecretFound),
        [only] => {
            output::info(info, &format!("Viewing only available secret: {only}"))?;
            only.clone()
        }
        _ => prompter.select(
            "Select a secret",
            &format!("{} secrets found", names.len()),
            &names,
        )?,
    };

    list.into_lookup()
        .remove(&chosen)
        .ok_or_else(|| ViewSecretError::CommandFailed(format!("secret '{chosen}' not found")))
}
