// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod bootstrap_plan;
pub mod read_step;
pub mod table_entry;
pub mod table_name;

pub use bootstrap_plan::*;
pub use read_step::*;
pub use table_entry::*;
pub use table_name::*;
