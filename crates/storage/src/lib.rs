#![forbid(unsafe_code)]

pub mod dataset;
pub mod report;

pub use dataset::{
    DatasetError, LoadOptions, load, load_csv_reader, load_json_reader, validate_records,
};
pub use report::PhraseLengthReport;
