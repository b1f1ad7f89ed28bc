// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::str::FromStr;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_NAMESPACE: &str = "default";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A fully-qualified table name in the metastore, e.g.
/// `default.hollow_processed`. An unqualified name resolves to the `default`
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    namespace: String,
    table: String,
}

impl TableName {
    pub fn new(namespace: impl Into<String>, table: impl Into<String>) -> Result<Self, InvalidTableNameError> {
        let namespace = namespace.into();
        let table = table.into();

        if !Self::is_valid_ident(&namespace) || !Self::is_valid_ident(&table) {
            return Err(InvalidTableNameError {
                value: format!("{namespace}.{table}"),
            });
        }

        Ok(Self { namespace, table })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Grammar of a single name component: `[A-Za-z_][A-Za-z0-9_]*`. Callers
    /// that accept bare namespace strings use this to validate them.
    pub fn is_valid_ident(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl FromStr for TableName {
    type Err = InvalidTableNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTableNameError {
            value: s.to_string(),
        };

        match s.split_once('.') {
            None => Self::new(DEFAULT_NAMESPACE, s).map_err(|_| invalid()),
            Some((ns, table)) if !table.contains('.') => {
                Self::new(ns, table).map_err(|_| invalid())
            }
            Some(_) => Err(invalid()),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.table)
    }
}

impl serde::Serialize for TableName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TableName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
#[error("Invalid table name: {value}")]
pub struct InvalidTableNameError {
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
