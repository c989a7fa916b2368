use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::profile::{ValidProfile, flatten};

pub const HEADER: [&str; 7] = [
    "id",
    "email",
    "tags",
    "profiles.facebook.id",
    "profiles.facebook.picture",
    "profiles.twitter.id",
    "profiles.twitter.picture",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub rows_written: usize,
    pub records_skipped: usize,
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses `raw` and checks the top-level value is an array.
fn parse_profiles(raw: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => Ok(items),
        other => Err(ConvertError::UnexpectedTopLevelShape {
            found: type_name(&other),
        }),
    }
}

fn write_rows<W: Write>(profiles: &[Value], sink: W) -> Result<ConversionSummary> {
    let mut wtr = Writer::from_writer(sink);
    let mut summary = ConversionSummary::default();

    // Header goes out even when every element ends up skipped
    wtr.write_record(HEADER)?;

    for value in profiles {
        let Some(profile) = ValidProfile::from_value(value) else {
            summary.records_skipped += 1;
            continue;
        };
        wtr.write_record(flatten(&profile).to_record())?;
        summary.rows_written += 1;
    }

    wtr.flush()?;
    Ok(summary)
}

/// Converts `raw` into CSV on `sink`. Nothing reaches `sink` unless the input
/// parses and its top-level value is an array.
pub fn try_convert_to_writer<W: Write>(raw: &str, sink: W) -> Result<ConversionSummary> {
    let profiles = parse_profiles(raw)?;
    write_rows(&profiles, sink)
}

/// Converts `raw` into a CSV file at `output`. The file is only created once
/// the input has been parsed and shape-checked, so failures leave it untouched.
pub fn try_convert(raw: &str, output: &Path) -> Result<ConversionSummary> {
    let profiles = parse_profiles(raw)?;
    let file = File::create(output)?;
    write_rows(&profiles, file)
}

fn report(outcome: Result<ConversionSummary>) -> bool {
    match outcome {
        Ok(summary) => {
            tracing::debug!(rows = summary.rows_written, "conversion finished");
            true
        }
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}

pub fn convert(raw: &str, output: &Path) -> bool {
    report(try_convert(raw, output))
}

pub fn convert_to_writer<W: Write>(raw: &str, sink: W) -> bool {
    report(try_convert_to_writer(raw, sink))
}
