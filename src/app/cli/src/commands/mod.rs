// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod completions_command;
mod ingest_command;
mod tables_list_command;

pub use completions_command::*;
pub use ingest_command::*;
pub use tables_list_command::*;

pub use crate::error::CLIError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait(?Send)]
pub trait Command {
    async fn run(&mut self) -> Result<(), CLIError>;
}
