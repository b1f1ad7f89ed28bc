// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use clap::Parser;
use lakeboot_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    match lakeboot_cli::run(args).await {
        Ok(()) => (),
        Err(err) => std::process::exit(err.exit_code()),
    }
}
