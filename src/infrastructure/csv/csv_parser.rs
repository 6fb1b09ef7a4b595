// ============================================================
// CSV PARSER
// ============================================================
// Decode an upload and parse it into a typed dataset

use std::borrow::Cow;

use csv::{ReaderBuilder, Trim};
use encoding_rs::{Encoding, UTF_8};

use super::TypeInferrer;
use crate::domain::config::AppConfig;
use crate::domain::dataset::Dataset;
use crate::domain::error::ParseError;
use crate::domain::upload::UploadedFile;

/// CSV parser using the default comma dialect
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from fields and headers
    trim: bool,

    /// Encoding used when the upload has no byte-order mark
    encoding: &'static Encoding,

    inferrer: TypeInferrer,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
            encoding: UTF_8,
            inferrer: TypeInferrer::new(),
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let encoding = Encoding::for_label(config.encoding.as_bytes()).unwrap_or(UTF_8);

        Self::default()
            .with_trim(config.trim_whitespace)
            .with_encoding(encoding)
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Parse an uploaded file into a dataset
    pub fn parse(&self, file: &UploadedFile) -> Result<Dataset, ParseError> {
        let content = self.decode(&file.bytes)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Dataset, ParseError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(false)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ParseError::new(e.to_string()))?
            .clone();

        if headers.is_empty() {
            return Err(ParseError::new("No columns to parse from file"));
        }

        let mut values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in reader.records() {
            let record = result.map_err(|e| ParseError::new(e.to_string()))?;
            for (column, field) in values.iter_mut().zip(record.iter()) {
                column.push(field.to_string());
            }
        }

        let columns = headers
            .iter()
            .zip(values)
            .map(|(name, column_values)| self.inferrer.build_column(name, column_values))
            .collect();

        Ok(Dataset::new(columns))
    }

    /// Decode bytes, letting a byte-order mark override the configured encoding
    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ParseError> {
        let (encoding, payload) = match Encoding::for_bom(bytes) {
            Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
            None => (self.encoding, bytes),
        };

        encoding
            .decode_without_bom_handling_and_without_replacement(payload)
            .ok_or_else(|| {
                ParseError::new(format!(
                    "'{}' codec can't decode the uploaded bytes",
                    encoding.name().to_lowercase()
                ))
            })
    }
}
