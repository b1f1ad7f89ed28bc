// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use datafusion::datasource::file_format::csv::CsvFormat;
use datafusion::datasource::listing::{
    ListingOptions,
    ListingTable,
    ListingTableConfig,
    ListingTableUrl,
};
use datafusion::prelude::*;
use internal_error::*;
use lakeboot_core::*;
use url::Url;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ReaderCsv {}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl Reader for ReaderCsv {
    #[tracing::instrument(level = "info", name = "read_csv", skip_all, fields(%url))]
    async fn read(
        &self,
        ctx: &SessionContext,
        url: &Url,
        conf: &ReadStep,
    ) -> Result<DataFrame, ReadError> {
        let ReadStep::Csv(csv) = conf;

        let schema = self.output_schema(ctx, conf).await?;

        // The `NA` token (or whatever the source declares) is matched in full
        // against the field value
        let null_regex = csv
            .null_value
            .as_ref()
            .map(|v| format!("^{}$", regex::escape(v)));

        let format = CsvFormat::default()
            .with_has_header(csv.has_header())
            .with_delimiter(csv.delimiter().int_err()?)
            .with_null_regex(null_regex);

        let file_extension = std::path::Path::new(url.path())
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| format!(".{s}"))
            .unwrap_or_default();

        let listing_options =
            ListingOptions::new(Arc::new(format)).with_file_extension(file_extension);

        let table_url = ListingTableUrl::parse(url.as_str()).int_err()?;

        let mut config =
            ListingTableConfig::new(table_url).with_listing_options(listing_options);

        config = match schema {
            Some(schema) => config.with_schema(Arc::new(schema)),
            None => config.infer_schema(&ctx.state()).await.int_err()?,
        };

        let table = ListingTable::try_new(config).int_err()?;
        let df = ctx.read_table(Arc::new(table)).int_err()?;

        Ok(df)
    }
}
