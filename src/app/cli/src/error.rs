// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::{BoxedError, InternalError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Top-level error of a CLI run. Usage errors are the operator's to fix and
/// exit with a distinct code; failures carry the underlying error chain.
#[derive(Debug, Error)]
pub enum CLIError {
    #[error("{0}")]
    UsageError(String),

    #[error(transparent)]
    Failure(BoxedError),
}

impl CLIError {
    pub fn usage_error(msg: impl Into<String>) -> Self {
        Self::UsageError(msg.into())
    }

    pub fn usage_error_from(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UsageError(e.to_string())
    }

    pub fn failure(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failure(Box::new(e))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UsageError(_) => 2,
            Self::Failure(_) => 1,
        }
    }
}

impl From<InternalError> for CLIError {
    fn from(e: InternalError) -> Self {
        Self::Failure(e.into())
    }
}
