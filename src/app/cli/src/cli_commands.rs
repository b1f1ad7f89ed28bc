// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use lakeboot_ingest_datafusion::{ExportServiceImpl, IngestBootstrapServiceImpl, SessionFactory};
use lakeboot_metastore_lfs::MetastoreLfs;

use crate::commands::*;
use crate::error::CLIError;
use crate::output::OutputConfig;
use crate::{cli, config};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn get_command(
    args: cli::Cli,
    config: &config::CLIConfig,
    output_config: Arc<OutputConfig>,
) -> Result<Box<dyn Command>, CLIError> {
    let command: Box<dyn Command> = match args.command {
        cli::Command::Ingest(c) => {
            let resolved = config::resolve_bootstrap(
                config,
                &c,
                std::env::var(config::STORAGE_ENV_VAR).ok(),
            )
            .map_err(CLIError::usage_error_from)?;

            let metastore = Arc::new(MetastoreLfs::new(&resolved.warehouse_path));
            let bootstrap_svc = IngestBootstrapServiceImpl::new(
                Arc::new(SessionFactory::new(resolved.storage_root.clone())),
                Arc::new(ExportServiceImpl::new()),
                metastore.clone(),
            );

            Box::new(IngestCommand::new(
                Arc::new(bootstrap_svc),
                metastore,
                resolved.plan,
                output_config,
            ))
        }

        cli::Command::Tables(c) => match c.subcommand {
            cli::TablesSubCommand::List(sc) => Box::new(TablesListCommand::new(
                Arc::new(MetastoreLfs::new(config::resolve_warehouse(config))),
                sc.namespace,
            )),
        },

        cli::Command::Completions(c) => Box::new(CompletionsCommand::new(c.shell)),
    };

    Ok(command)
}
