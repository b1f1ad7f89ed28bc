// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Local file system implementation of the [`lakeboot_core::Metastore`]
//! interface. Tables live under a warehouse directory as
//! `<root>/<namespace>/<table>/` with Parquet data files and a JSON manifest.

mod metastore_lfs;

pub use metastore_lfs::*;
