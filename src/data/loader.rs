use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::Tweet;

const MONTH: &str = "Month";
const SENTIMENT: &str = "Sentiment";
const SUBJECTIVITY: &str = "Subjectivity";
const RAW_TWEET: &str = "RawTweet";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load tweets from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Month": "Jan", "Sentiment": 0.3, "Subjectivity": 0.5, "RawTweet": "..." }, ...]`
/// * `.csv`     – header row with the same column names
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<Vec<Tweet>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let tweets = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    };

    log::info!("Read {} tweets from {}", tweets.len(), path.display());
    Ok(tweets)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array (`df.to_json(orient='records')`).
pub fn parse_json(text: &str) -> Result<Vec<Tweet>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().ok_or(DataError::NotAnArray)?;

    records
        .iter()
        .enumerate()
        .map(|(row, rec)| {
            if !rec.is_object() {
                return Err(DataError::NotAnObject { row }.into());
            }
            Tweet::deserialize(rec).with_context(|| format!("Row {row}: invalid record"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV table with a header row; unknown columns are ignored.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<Tweet>> {
    let mut reader = csv::Reader::from_reader(input);
    reader
        .deserialize::<Tweet>()
        .enumerate()
        .map(|(row, result)| result.with_context(|| format!("CSV row {row}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat `Month`, `Sentiment`, `Subjectivity` and
/// `RawTweet` columns. Works with files written by Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Vec<Tweet>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut tweets = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        tweets.extend(tweets_from_batch(&batch)?);
    }
    Ok(tweets)
}

fn tweets_from_batch(batch: &RecordBatch) -> Result<Vec<Tweet>> {
    let n_rows = batch.num_rows();
    let month = text_column(batch, MONTH, n_rows)?;
    let raw_tweet = text_column(batch, RAW_TWEET, n_rows)?;
    let sentiment = numeric_column(batch, SENTIMENT, n_rows)?;
    let subjectivity = numeric_column(batch, SUBJECTIVITY, n_rows)?;

    Ok(month
        .into_iter()
        .zip(raw_tweet)
        .zip(sentiment.into_iter().zip(subjectivity))
        .map(|((month, raw_tweet), (sentiment, subjectivity))| Tweet {
            month,
            sentiment,
            subjectivity,
            raw_tweet,
        })
        .collect())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Arc<dyn Array>> {
    let idx = batch.schema().index_of(name).ok()?;
    Some(batch.column(idx))
}

/// Render every cell as text; missing column or null cells become "".
fn text_column(batch: &RecordBatch, name: &str, n_rows: usize) -> Result<Vec<String>> {
    let Some(col) = column(batch, name) else {
        log::warn!("Parquet file has no '{name}' column");
        return Ok(vec![String::new(); n_rows]);
    };

    (0..n_rows)
        .map(|row| {
            if col.is_null(row) {
                return Ok(String::new());
            }
            array_value_to_string(col, row).with_context(|| format!("Row {row}: '{name}'"))
        })
        .collect()
}

/// Cast the column to Float64; missing column, nulls and unparsable text become NaN.
fn numeric_column(batch: &RecordBatch, name: &str, n_rows: usize) -> Result<Vec<f64>> {
    let Some(col) = column(batch, name) else {
        log::warn!("Parquet file has no '{name}' column");
        return Ok(vec![f64::NAN; n_rows]);
    };

    let casted = cast(col, &DataType::Float64).map_err(|_| DataError::UnsupportedColumn {
        column: name.to_string(),
        data_type: col.data_type().to_string(),
    })?;
    let values = casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .context("expected Float64Array after cast")?;

    Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
