//! Invocation driver: validate, dispatch, print

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, HELP};
use crate::cli::output::{self, OutputFormatter};
use crate::cli::{CliError, CliResult};
use crate::config::{default_config_path, Settings};
use crate::domain::{InvocationOptions, Request, ResultColor};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::Library;
use crate::infrastructure::InfraError;

/// Version banner printed by `--version`.
pub fn version_banner() -> String {
    format!("Bible.js v{}", env!("CARGO_PKG_VERSION"))
}

/// Run one invocation, writing all user-facing output to `out`.
///
/// Invalid colors, version and help stop before the configuration is touched.
/// Per-request failures are printed and do not make the invocation fail.
pub fn execute_command(
    cli: &Cli,
    library: Arc<dyn Library>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let result_color = match cli.result_color.as_deref() {
        Some(input) => match ResultColor::parse(input) {
            Ok(color) => color,
            Err(e) => {
                debug!("invalid result color: {input:?}");
                return emit(out, &format!("{e}\n"));
            }
        },
        None => ResultColor::default(),
    };

    if cli.version {
        return emit(out, &format!("{}\n", version_banner()));
    }

    let Some(options) = cli.invocation_options(result_color) else {
        return emit(out, &format!("{HELP}\n"));
    };

    emit(out, &output::preamble(&options))?;

    let settings = Settings::load(&config_path(cli)?)?;
    let container = ServiceContainer::with_deps(settings, library);
    read(&container, &options, out)
}

fn config_path(cli: &Cli) -> CliResult<PathBuf> {
    cli.config
        .clone()
        .or_else(default_config_path)
        .ok_or_else(|| {
            CliError::from(ApplicationError::Config {
                message: "cannot determine home directory for ~/.bible-config".into(),
            })
        })
}

#[instrument(skip(container, out))]
fn read(
    container: &ServiceContainer,
    options: &InvocationOptions,
    out: &mut dyn Write,
) -> CliResult<()> {
    let reader = container.reader(&options.language)?;
    let formatter = OutputFormatter::new(options);

    let mut requests = Vec::new();
    if let Some(reference) = &options.reference {
        requests.push(Request::Lookup(reference.clone()));
    }
    if let Some(pattern) = &options.search {
        requests.push(Request::Search(pattern.clone()));
    }

    let mut write_result = Ok(());
    reader.run(requests, |completion| {
        debug!(
            "completed {} '{}': ok={}",
            completion.request.kind(),
            completion.request.argument(),
            completion.result.is_ok()
        );
        if write_result.is_ok() {
            write_result = emit(out, &formatter.render(&completion.result));
        }
    });
    write_result
}

/// Write one block in a single call so concurrent completions never interleave.
fn emit(out: &mut dyn Write, block: &str) -> CliResult<()> {
    out.write_all(block.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| InfraError::io("write output", e).into())
}
