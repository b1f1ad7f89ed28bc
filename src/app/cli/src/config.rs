// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use internal_error::*;
use lakeboot_core::{BootstrapPlan, ReadStepCsv, TableName};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::cli;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const STORAGE_ENV_VAR: &str = "STORAGE";
pub const DEFAULT_CONFIG_FILE: &str = ".lakebootconfig";

pub const DEFAULT_SOURCE_PATH: &str = "datalake/data/content_metadata/hollow_processed.csv";
pub const DEFAULT_TABLE: &str = "default.hollow_processed";
pub const DEFAULT_EXPORT_PATH: &str = "/home/cdsw/raw/hollow-processed";
pub const DEFAULT_WAREHOUSE_PATH: &str = "/home/cdsw/warehouse";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Optional YAML configuration file. Every field has a default, so an absent
/// file is equivalent to an empty one. The storage root may also come from
/// the `STORAGE` environment variable or the `--storage` flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CLIConfig {
    /// Storage root URL or local directory path
    pub storage: Option<String>,

    /// Path of the source file relative to the storage root
    pub source_path: Option<String>,

    /// Catalog table to register
    pub table: Option<TableName>,

    /// Local directory receiving the export
    pub export_path: Option<PathBuf>,

    /// Root directory of the file-backed metastore
    pub warehouse_path: Option<PathBuf>,

    /// CSV read options, including an optional declared schema as DDL column
    /// definitions. When omitted entirely, the source is read with a header
    /// row, `,` separator, and `NA` mapped to null.
    pub read: Option<ReadStepCsv>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Fully-validated inputs of one `ingest` run
#[derive(Debug, Clone)]
pub struct ResolvedBootstrap {
    pub storage_root: Url,
    pub warehouse_path: PathBuf,
    pub plan: BootstrapPlan,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn load_config(path: Option<&Path>) -> Result<CLIConfig, ConfigError> {
    let path = match path {
        Some(p) => {
            if !p.is_file() {
                return Err(ConfigError::NotFound {
                    path: p.display().to_string(),
                });
            }
            p.to_path_buf()
        }
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(CLIConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path).int_err()?;
    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Merges the config file, the environment, and CLI flags into a validated
/// [`BootstrapPlan`]. Precedence: flags, then environment, then file, then
/// defaults. Services never consult the environment themselves - the storage
/// root is resolved exactly once, here.
pub fn resolve_bootstrap(
    config: &CLIConfig,
    args: &cli::IngestArgs,
    env_storage: Option<String>,
) -> Result<ResolvedBootstrap, ConfigError> {
    let storage = args
        .storage
        .clone()
        .or_else(|| env_storage.filter(|s| !s.is_empty()))
        .or_else(|| config.storage.clone())
        .ok_or(ConfigError::StorageNotSet)?;

    let storage_root = parse_storage_root(&storage)?;

    let source_path = args
        .source_path
        .clone()
        .or_else(|| config.source_path.clone())
        .unwrap_or_else(|| DEFAULT_SOURCE_PATH.to_string());

    let source_url = storage_root
        .join(&source_path)
        .map_err(|e| ConfigError::InvalidValue {
            key: "sourcePath",
            message: e.to_string(),
        })?;

    let table_name = match args.table.clone().or_else(|| config.table.clone()) {
        Some(t) => t,
        None => DEFAULT_TABLE.parse().int_err()?,
    };

    let export_path = args
        .export_path
        .clone()
        .or_else(|| config.export_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

    let read = config.read.clone().unwrap_or_else(default_read_step);

    Ok(ResolvedBootstrap {
        storage_root,
        warehouse_path: resolve_warehouse(config),
        plan: BootstrapPlan {
            source_url,
            read,
            table_name,
            export_path,
            export_format: args.export_format.into(),
        },
    })
}

pub fn resolve_warehouse(config: &CLIConfig) -> PathBuf {
    config
        .warehouse_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WAREHOUSE_PATH))
}

fn default_read_step() -> ReadStepCsv {
    ReadStepCsv {
        schema: None,
        header: Some(true),
        separator: Some(",".to_string()),
        null_value: Some("NA".to_string()),
    }
}

/// Accepts both URLs (`s3a://lake`) and plain local paths, rejects schemes
/// the engine has no object store for, and normalizes to a URL with a
/// trailing slash so that joining relative source paths resolves below the
/// root
fn parse_storage_root(value: &str) -> Result<Url, ConfigError> {
    let mut url = if value.contains("://") {
        Url::parse(value).map_err(|e| ConfigError::InvalidValue {
            key: "storage",
            message: e.to_string(),
        })?
    } else {
        let path = Path::new(value);
        let abs = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().int_err()?.join(path)
        };
        Url::from_directory_path(&abs).map_err(|()| ConfigError::InvalidValue {
            key: "storage",
            message: format!("Not a valid directory path: {value}"),
        })?
    };

    match url.scheme() {
        "file" | "s3" | "s3a" => {}
        scheme => {
            return Err(ConfigError::InvalidValue {
                key: "storage",
                message: format!(
                    "Unsupported storage scheme {scheme:?}, expected file://, s3:// or s3a://"
                ),
            });
        }
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Storage root is not configured - pass --storage, set the STORAGE environment variable, \
         or add `storage` to the config file"
    )]
    StorageNotSet,

    #[error("Configuration file {path} does not exist")]
    NotFound { path: String },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
