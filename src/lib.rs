//! Convert folders of JSON profile arrays into flat CSV files.
//!
//! Each input holds an array of profile records. Records carrying both an
//! `id` and an `email` key are flattened into a fixed seven-column row;
//! anything else in the array is skipped.

pub mod batch;
pub mod convert;
pub mod error;
pub mod logger;
pub mod profile;

pub use convert::{
    ConversionSummary, HEADER, convert, convert_to_writer, try_convert, try_convert_to_writer,
};
pub use error::{ConvertError, Result};
pub use profile::{Cell, FlatRow, ValidProfile, dig, flatten, is_valid_record};
