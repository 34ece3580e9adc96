use std::fs::File;

use ::csv::Reader;
use anyhow::{Context as _, Result};
use serde_json::Value;

const DATA_TYPE_INDEX: usize = 0;
const DEVICE_NAME_INDEX: usize = 1;
const TIMESTAMP_INDEX: usize = 2;
const DATA_INDEX: usize = 3;

#[derive(Debug)]
pub struct ImportRecord {
    pub data_type: String,
    pub device_name: String,
    pub timestamp: String,
    pub data: Value,
}

#[derive(Debug)]
pub struct CsvValsIter {
    reader: Reader<File>,
}

impl CsvValsIter {
    pub fn new(file: File) -> Self {
        Self {
            reader: Reader::from_reader(file),
        }
    }
}

impl Iterator for CsvValsIter {
    type Item = Result<ImportRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.reader.records().next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };

        let record = (|| -> Result<ImportRecord> {
            let data: Value = serde_json::from_str(&row[DATA_INDEX])
                .with_context(|| format!("failed to parse data payload: {}", &row[DATA_INDEX]))?;

            Ok(ImportRecord {
                data_type: row[DATA_TYPE_INDEX].to_string(),
                device_name: row[DEVICE_NAME_INDEX].to_string(),
                timestamp: row[TIMESTAMP_INDEX].to_string(),
                data,
            })
        })();

        Some(record)
    }
}
