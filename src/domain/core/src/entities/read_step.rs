// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Describes how the source file is deserialized into a tabular form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ReadStep {
    Csv(ReadStepCsv),
}

impl Default for ReadStep {
    fn default() -> Self {
        Self::Csv(ReadStepCsv::default())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReadStepCsv {
    /// Column definitions in DDL form, e.g. `["id BIGINT", "name STRING"]`.
    /// When absent the schema is inferred from the data, which requires an
    /// extra scan of the input.
    pub schema: Option<Vec<String>>,
    /// Whether the first row contains column names
    pub header: Option<bool>,
    /// Single-character field separator
    pub separator: Option<String>,
    /// Literal token that should be loaded as a null value, e.g. `NA`
    pub null_value: Option<String>,
}

impl ReadStepCsv {
    pub fn has_header(&self) -> bool {
        self.header.unwrap_or(false)
    }

    pub fn delimiter(&self) -> Result<u8, InvalidReadStepError> {
        match &self.separator {
            None => Ok(b','),
            Some(s) => {
                let mut bytes = s.bytes();
                match (bytes.next(), bytes.next()) {
                    (Some(b), None) => Ok(b),
                    _ => Err(InvalidReadStepError {
                        reason: format!("Separator must be a single character, got: {s:?}"),
                    }),
                }
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
#[error("Invalid read step: {reason}")]
pub struct InvalidReadStepError {
    pub reason: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
