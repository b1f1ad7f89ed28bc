// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crate::error::CLIError;
use crate::output::OutputConfig;
use crate::{cli, cli_commands, config};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const BINARY_NAME: &str = "lakeboot";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LOGGING_CONFIG: &str = "warn";
const VERBOSE_LOGGING_CONFIG: &str = "info";
const VERY_VERBOSE_LOGGING_CONFIG: &str = "debug";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn run(args: cli::Cli) -> Result<(), CLIError> {
    // Always capture backtraces for logging - whether they reach the user
    // depends on verbosity
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    let output_config = Arc::new(configure_output(&args));
    configure_logging(&output_config);

    tracing::info!(
        version = VERSION,
        args = ?std::env::args().collect::<Vec<_>>(),
        "Initializing {BINARY_NAME}"
    );

    let config = config::load_config(args.config.as_deref()).map_err(CLIError::usage_error_from)?;
    tracing::info!(?config, "Loaded configuration");

    let result = match cli_commands::get_command(args, &config, output_config) {
        Ok(mut command) => command.run().await,
        Err(e) => Err(e),
    };

    match &result {
        Ok(()) => {
            tracing::info!("Command successful");
        }
        Err(err) => {
            tracing::error!(error_dbg = ?err, error = %err, "Command failed");
            eprintln!("{}: {}", console::style("Error").red().bold(), err);
        }
    }

    result
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_output(args: &cli::Cli) -> OutputConfig {
    OutputConfig {
        verbosity_level: args.verbose,
        quiet: args.quiet,
        is_tty: console::Term::stdout().features().is_attended(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Logging
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn configure_logging(output_config: &OutputConfig) {
    use tracing_log::LogTracer;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    // Logging may be already initialized when running under tests
    if tracing::dispatcher::has_been_set() {
        return;
    }

    // Use configuration from RUST_LOG env var if provided
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match output_config.verbosity_level {
            0 => EnvFilter::new(DEFAULT_LOGGING_CONFIG),
            1 => EnvFilter::new(VERBOSE_LOGGING_CONFIG),
            _ => EnvFilter::new(VERY_VERBOSE_LOGGING_CONFIG),
        }
    });

    // Redirect all standard logging to tracing events
    LogTracer::init().ok();

    // Logs go to STDERR, diagnostics printed by commands go to STDOUT
    if output_config.verbosity_level >= 2 {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .pretty()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
