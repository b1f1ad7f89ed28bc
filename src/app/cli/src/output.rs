// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub verbosity_level: u8,
    pub quiet: bool,
    pub is_tty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity_level: 0,
            quiet: false,
            is_tty: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Box-drawing table format shared by all tabular terminal output
pub fn table_format() -> prettytable::format::TableFormat {
    use prettytable::format::*;

    FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(&[LinePosition::Top], LineSeparator::new('─', '┬', '┌', '┐'))
        .separators(
            &[LinePosition::Title],
            LineSeparator::new('─', '┼', '├', '┤'),
        )
        .separators(
            &[LinePosition::Bottom],
            LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
}
