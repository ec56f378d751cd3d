//! CSV reading for the exchange-rate table.
//!
//! Locates the date and rate columns by header name and hands the rows to
//! [`SeriesLoader`]. A missing column makes the whole table unusable; a bad
//! row is only dropped.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use fxrate_core::{config::SourceConfig, Error, Result, Series};
use tracing::{debug, trace};

use crate::loader::{LoadReport, RawRow, SeriesLoader};

/// Reader for a headed CSV with a date column and a rate column.
#[derive(Debug, Clone)]
pub struct CsvSource {
    config: SourceConfig,
    loader: SeriesLoader,
}

impl CsvSource {
    /// Create a CSV source from configuration.
    pub fn new(config: SourceConfig) -> Self {
        let loader = SeriesLoader::from_config(&config);
        Self { config, loader }
    }

    /// Find column index by header name (case-insensitive).
    fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::data(format!("Column '{}' not found", name)))
    }

    /// Read all rows of the date and rate columns.
    ///
    /// Returns the rows plus the number of records that could not be decoded.
    pub fn read_rows<R: Read>(&self, reader: R) -> Result<(Vec<RawRow>, usize)> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.config.delimiter)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let date_idx = Self::find_column(&headers, &self.config.date_column)?;
        let rate_idx = Self::find_column(&headers, &self.config.value_column)?;

        let mut rows = Vec::new();
        let mut malformed = 0usize;

        for (idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    // +2: header line, then 1-based numbering
                    trace!(line = idx + 2, error = %err, "skipping undecodable record");
                    malformed += 1;
                    continue;
                }
            };

            // Short records read as empty fields and get dropped by the loader
            rows.push(RawRow::new(
                record.get(date_idx).unwrap_or_default(),
                record.get(rate_idx).unwrap_or_default(),
            ));
        }

        debug!(rows = rows.len(), malformed, "csv read");
        Ok((rows, malformed))
    }

    /// Read and load a CSV from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<(Series, LoadReport)> {
        let (rows, malformed) = self.read_rows(reader)?;
        let (series, mut report) = self.loader.load_with_report(rows);
        report.malformed_records = malformed;
        report.rows_read += malformed;
        Ok((series, report))
    }

    /// Read and load a CSV file, blocking the calling thread.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<(Series, LoadReport)> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::data(format!("Failed to open '{}': {e}", path.display())))?;
        self.load_reader(std::io::BufReader::new(file))
    }

    /// One-shot asynchronous fetch of a CSV file.
    ///
    /// Only the file read is awaited; parsing runs to completion afterwards.
    pub async fn fetch(&self, path: impl AsRef<Path>) -> Result<(Series, LoadReport)> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::data(format!("Failed to read '{}': {e}", path.display())))?;
        self.load_reader(bytes.as_slice())
    }
}

impl Default for CsvSource {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "date,rate\n\
        2024-01-03,3.0\n\
        2024-01-01,1.0\n\
        2024-01-02,bad\n";

    #[test]
    fn test_load_reader() {
        let source = CsvSource::default();
        let (series, report) = source.load_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(series.values(), vec![1.0, 3.0]);
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(report.bad_value, 1);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive_and_ordered_freely() {
        let csv = "Rate , Currency, DATE\n1.25,USD,2024-05-01\n";
        let (series, _) = CsvSource::default().load_reader(csv.as_bytes()).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, 1.25);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "date,price\n2024-01-01,1.0\n";
        let err = CsvSource::default().load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_short_records_are_dropped() {
        let csv = "date,rate\n2024-01-01\n2024-01-02,2.0\n";
        let (series, report) = CsvSource::default().load_reader(csv.as_bytes()).unwrap();

        assert_eq!(series.values(), vec![2.0]);
        assert_eq!(report.bad_value, 1);
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let config = SourceConfig {
            date_column: "day".to_string(),
            value_column: "usd_eur".to_string(),
            delimiter: b';',
            ..SourceConfig::default()
        };
        let csv = "day;usd_eur\n2024-01-01;0.91\n";
        let (series, _) = CsvSource::new(config).load_reader(csv.as_bytes()).unwrap();
        assert_eq!(series.values(), vec![0.91]);
    }

    #[test]
    fn test_load_path_missing_file() {
        let err = CsvSource::default()
            .load_path("/definitely/not/here.csv")
            .unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[tokio::test]
    async fn test_fetch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let (series, report) = CsvSource::default().fetch(file.path()).await.unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(report.dropped(), 1);
    }
}
