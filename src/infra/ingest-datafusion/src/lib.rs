// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(clippy::wildcard_imports)]

pub mod schema;

mod bootstrap;
mod export;
mod reader;
mod readers;
mod session;

pub use bootstrap::*;
pub use export::*;
pub use reader::*;
pub use readers::*;
pub use session::*;
