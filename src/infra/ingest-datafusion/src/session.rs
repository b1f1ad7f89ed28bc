// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use datafusion::prelude::*;
use internal_error::{InternalError, *};
use lakeboot_core::BootstrapError;
use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Creates engine sessions pre-configured with access to the storage root.
///
/// Local (`file://`) roots are served by the engine's built-in object store.
/// For `s3://` and `s3a://` roots a store is built from ambient credentials
/// (`AWS_ACCESS_KEY_ID` and friends) and registered under the root's scheme
/// and authority, so reads of any path below the root resolve to it.
pub struct SessionFactory {
    storage_root: Url,
}

impl SessionFactory {
    pub fn new(storage_root: Url) -> Self {
        Self { storage_root }
    }

    pub fn storage_root(&self) -> &Url {
        &self.storage_root
    }

    #[tracing::instrument(level = "info", skip_all, fields(storage_root = %self.storage_root))]
    pub fn session_context(&self) -> Result<SessionContext, CreateSessionError> {
        let cfg = SessionConfig::new()
            .with_information_schema(true)
            .with_default_catalog_and_schema("lakeboot", "default");

        let ctx = SessionContext::new_with_config(cfg);

        match self.storage_root.scheme() {
            "file" => {}
            "s3" | "s3a" => {
                let store = self.build_s3_store()?;
                // Register under the original URL so that `s3a://` paths
                // resolve without rewriting
                ctx.runtime_env()
                    .register_object_store(&self.storage_root, store);
            }
            scheme => {
                return Err(UnsupportedStorageSchemeError {
                    scheme: scheme.to_string(),
                }
                .into());
            }
        }

        Ok(ctx)
    }

    fn build_s3_store(
        &self,
    ) -> Result<Arc<dyn object_store::ObjectStore>, CreateSessionError> {
        // The AWS builder only understands the canonical `s3` scheme
        let mut url = self.storage_root.clone();
        if url.scheme() == "s3a" {
            url.set_scheme("s3")
                .map_err(|()| "Failed to normalize s3a URL scheme".int_err())?;
        }

        let store = object_store::aws::AmazonS3Builder::from_env()
            .with_url(url.as_str())
            .build()
            .int_err()?;

        Ok(Arc::new(store))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(thiserror::Error, Debug)]
pub enum CreateSessionError {
    #[error(transparent)]
    UnsupportedScheme(#[from] UnsupportedStorageSchemeError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
#[error("Unsupported storage root scheme: {scheme}")]
pub struct UnsupportedStorageSchemeError {
    pub scheme: String,
}

impl From<CreateSessionError> for BootstrapError {
    fn from(v: CreateSessionError) -> Self {
        match v {
            CreateSessionError::UnsupportedScheme(e) => Self::Internal(e.int_err()),
            CreateSessionError::Internal(e) => Self::Internal(e),
        }
    }
}
