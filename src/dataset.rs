//! Dataset loading and column projection.
//!
//! The loader reads the whole file, normalizes line endings, discards the
//! header row and parses every remaining row into a [`Record`]. Any row that
//! fails to parse aborts the load, so a [`Dataset`] is either complete or
//! never observed.

use crate::error::{OlsError, Result};
use crate::types::{Feature, N_FEATURES, Record};
use csv::{ReaderBuilder, StringRecord};
use ndarray::{Array1, ArrayView1};
use std::fs;
use std::path::Path;

/// Number of fields per row: the identifier followed by the numeric features.
pub const FIELDS_PER_ROW: usize = N_FEATURES + 1;

/// An immutable, ordered collection of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Read and parse the CSV file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| OlsError::IoError(format!("{}: {}", path.display(), e)))?;
        let dataset = Self::from_bytes(&bytes)?;
        log::debug!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse CSV content held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| OlsError::parse(0, format!("input is not valid UTF-8: {}", e)))?;
        let normalized = normalize_line_endings(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(normalized.as_bytes());

        let mut rows = reader.records();

        let header = match rows.next() {
            Some(Ok(header)) => header,
            Some(Err(e)) => return Err(OlsError::parse(1, format!("unreadable header: {}", e))),
            None => return Err(OlsError::parse(1, "missing header row")),
        };
        let expected = header.len();

        let mut records = Vec::new();
        for row in rows {
            let row = row.map_err(|e| {
                let line = e.position().map_or(0, |p| p.line() as usize);
                OlsError::parse(line, e.to_string())
            })?;
            let line = row.position().map_or(records.len() + 2, |p| p.line() as usize);

            if row.len() != expected {
                return Err(OlsError::parse(
                    line,
                    format!("expected {} fields, found {}", expected, row.len()),
                ));
            }
            records.push(parse_record(&row, line)?);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Project one feature across all records, in row order.
    pub fn column(&self, feature: Feature) -> Array1<f64> {
        self.records.iter().map(|r| r.get(feature)).collect()
    }

    /// Project the two predictors and the response into aligned columns.
    pub fn columns(
        &self,
        predictor_a: Feature,
        predictor_b: Feature,
        response: Feature,
    ) -> Columns {
        Columns {
            predictor_a: (predictor_a, self.column(predictor_a)),
            predictor_b: (predictor_b, self.column(predictor_b)),
            response: (response, self.column(response)),
        }
    }
}

/// Three index-aligned column sequences: two predictors and the response.
///
/// Every column has the same length and index `i` refers to the same record
/// in each of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    predictor_a: (Feature, Array1<f64>),
    predictor_b: (Feature, Array1<f64>),
    response: (Feature, Array1<f64>),
}

impl Columns {
    /// Build columns from raw sequences, rejecting unequal lengths.
    pub fn new(
        predictor_a: (Feature, Array1<f64>),
        predictor_b: (Feature, Array1<f64>),
        response: (Feature, Array1<f64>),
    ) -> Result<Self> {
        let n = response.1.len();
        if predictor_a.1.len() != n || predictor_b.1.len() != n {
            return Err(OlsError::InvalidParameter(format!(
                "column lengths differ: {}, {}, {}",
                predictor_a.1.len(),
                predictor_b.1.len(),
                n
            )));
        }
        Ok(Self {
            predictor_a,
            predictor_b,
            response,
        })
    }

    pub fn len(&self) -> usize {
        self.response.1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn predictor_a(&self) -> ArrayView1<'_, f64> {
        self.predictor_a.1.view()
    }

    pub fn predictor_b(&self) -> ArrayView1<'_, f64> {
        self.predictor_b.1.view()
    }

    pub fn response(&self) -> ArrayView1<'_, f64> {
        self.response.1.view()
    }

    pub fn predictor_a_feature(&self) -> Feature {
        self.predictor_a.0
    }

    pub fn predictor_b_feature(&self) -> Feature {
        self.predictor_b.0
    }

    pub fn response_feature(&self) -> Feature {
        self.response.0
    }
}

/// Load the file at `path` and project the selected columns.
pub fn load_columns(
    path: impl AsRef<Path>,
    predictor_a: Feature,
    predictor_b: Feature,
    response: Feature,
) -> Result<Columns> {
    let dataset = Dataset::from_path(path)?;
    Ok(dataset.columns(predictor_a, predictor_b, response))
}

/// Convert CRLF and lone CR line breaks to LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Trim leading whitespace, then drop one pair of enclosing quotes.
///
/// The csv reader only recognizes a quote at the very start of a field, so
/// `, "0.1"` arrives here with its quotes intact.
fn clean_field(field: &str) -> &str {
    let field = field.trim_start();
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}

fn parse_record(row: &StringRecord, line: usize) -> Result<Record> {
    if row.len() != FIELDS_PER_ROW {
        return Err(OlsError::parse(
            line,
            format!("expected {} fields, found {}", FIELDS_PER_ROW, row.len()),
        ));
    }

    let neighborhood = clean_field(&row[0]).to_string();
    let mut values = [0.0; N_FEATURES];
    for (feature, value) in Feature::ALL.iter().zip(values.iter_mut()) {
        let raw = clean_field(&row[feature.index() + 1]);
        *value = raw.parse::<f64>().map_err(|_| {
            OlsError::parse(
                line,
                format!("field '{}' is not a number: {:?}", feature.name(), raw),
            )
        })?;
    }

    Ok(Record::new(neighborhood, values))
}
