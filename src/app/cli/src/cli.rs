// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use lakeboot_core::{ExportFormat, TableName};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Bootstraps a local data lake workspace from files in shared storage
#[derive(Debug, clap::Parser)]
#[command(name = "lakeboot", version, disable_help_subcommand = true)]
pub struct Cli {
    /// Sets the level of verbosity (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Reads the source file, refreshes the local export, and registers the
    /// catalog table if it does not exist yet
    Ingest(IngestArgs),

    /// Catalog inspection
    Tables(TablesArgs),

    /// Generates tab-completion scripts for your shell
    Completions(CompletionsArgs),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Args)]
pub struct IngestArgs {
    /// Storage root URL (e.g. `s3a://lake/`), overriding the config file and
    /// the STORAGE environment variable
    #[arg(long, value_name = "URL")]
    pub storage: Option<String>,

    /// Path of the source file relative to the storage root
    #[arg(long, value_name = "PATH")]
    pub source_path: Option<String>,

    /// Catalog table to register (e.g. `default.hollow_processed`)
    #[arg(long, value_name = "TABLE")]
    pub table: Option<TableName>,

    /// Local directory receiving the export
    #[arg(long, value_name = "DIR")]
    pub export_path: Option<PathBuf>,

    /// Format of the exported file
    #[arg(long, value_enum, default_value_t = ExportFormatArg::Csv)]
    pub export_format: ExportFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Parquet,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(v: ExportFormatArg) -> Self {
        match v {
            ExportFormatArg::Csv => Self::Csv,
            ExportFormatArg::Parquet => Self::Parquet,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Args)]
pub struct TablesArgs {
    #[command(subcommand)]
    pub subcommand: TablesSubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum TablesSubCommand {
    /// Lists namespaces and the tables registered in them
    List(TablesListArgs),
}

#[derive(Debug, clap::Args)]
pub struct TablesListArgs {
    /// Limit the listing to one namespace
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, clap::Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
