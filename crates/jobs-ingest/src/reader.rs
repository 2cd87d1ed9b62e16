//! Decoding raw source bytes into Polars frames.

use std::io::Cursor;

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};
use tracing::{debug, warn};

use jobs_model::{SourceConfig, SourceFormat};

use crate::error::{IngestError, Result};
use crate::fetch::SourceFetcher;

/// Decodes a CSV or Parquet payload.
///
/// CSV columns are all read as text; typing happens during normalization.
pub fn read_table(bytes: Vec<u8>, format: SourceFormat, source_name: &str) -> Result<DataFrame> {
    let parse_error = |e: polars::prelude::PolarsError| IngestError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    };

    let bytes = strip_utf8_bom(bytes);
    let df = match format {
        SourceFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(parse_error)?,
        SourceFormat::Parquet => ParquetReader::new(Cursor::new(bytes))
            .finish()
            .map_err(parse_error)?,
    };

    validate_frame_shape(&df, source_name);
    debug!(
        source = source_name,
        rows = df.height(),
        columns = df.width(),
        "decoded source table"
    );
    Ok(df)
}

/// Fetches and decodes one configured source.
pub fn load_source(fetcher: &dyn SourceFetcher, source: &SourceConfig) -> Result<DataFrame> {
    let bytes = fetcher.fetch(&source.location)?;
    read_table(bytes, source.resolved_format(), &source.name)
}

fn strip_utf8_bom(bytes: Vec<u8>) -> Vec<u8> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes[3..].to_vec()
    } else {
        bytes
    }
}

/// Logs shape anomalies that are worth a warning but not a failure.
fn validate_frame_shape(df: &DataFrame, source_name: &str) {
    if df.height() == 0 {
        warn!(source = source_name, "source table has no rows");
    }
    if df.width() > 200 {
        warn!(
            source = source_name,
            columns = df.width(),
            "source table is unusually wide"
        );
    }
}
