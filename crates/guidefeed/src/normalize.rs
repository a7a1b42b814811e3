//! Table normalization: canonical headers, "no data" cells, resolved fields.

use chrono::NaiveDate;

use crate::dates::parse_loose_date;
use crate::input::DataTable;
use crate::schema::{ColumnMap, SemanticField};

/// What an empty or placeholder cell becomes after normalization.
pub const NO_DATA: &str = "-";

/// Header used when a sheet has no observations column at all.
pub const SYNTHETIC_OBSERVATION_HEADER: &str = "OBSERVACOES_TEMP";

/// One guide: cells in normalized column order.
pub type Row = Vec<String>;

/// A sheet after normalization.
///
/// Headers are trimmed and upper-cased, placeholder cells hold [`NO_DATA`],
/// and an observations column always exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideTable {
    headers: Vec<String>,
    rows: Vec<Row>,
    columns: ColumnMap,
}

impl GuideTable {
    /// Normalize a raw sheet.
    ///
    /// When two headers normalize to the same name the later column's values
    /// are kept, at the earlier column's position.
    pub fn normalize(raw: &DataTable) -> Self {
        let mut headers: Vec<String> = Vec::with_capacity(raw.column_count() + 1);
        let mut sources: Vec<usize> = Vec::with_capacity(raw.column_count());

        for (index, header) in raw.headers.iter().enumerate() {
            let name = normalize_header(header);
            match headers.iter().position(|h| *h == name) {
                Some(existing) => sources[existing] = index,
                None => {
                    headers.push(name);
                    sources.push(index);
                }
            }
        }

        let mut rows: Vec<Row> = raw
            .rows
            .iter()
            .map(|row| {
                sources
                    .iter()
                    .map(|&src| normalize_cell(row.get(src).map(String::as_str)))
                    .collect()
            })
            .collect();

        if !headers.iter().any(|h| SemanticField::Observation.matches(h)) {
            headers.push(SYNTHETIC_OBSERVATION_HEADER.to_string());
            for row in &mut rows {
                row.push(NO_DATA.to_string());
            }
        }

        let columns = ColumnMap::resolve(&headers);
        Self {
            headers,
            rows,
            columns,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Borrowed view of every row, the starting point for aggregation.
    pub fn all_rows(&self) -> Vec<&Row> {
        self.rows.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Whether the sheet carries `field`.
    pub fn has(&self, field: SemanticField) -> bool {
        self.columns.contains(field)
    }

    /// Header the observations were resolved from.
    pub fn observation_header(&self) -> &str {
        self.columns
            .get(SemanticField::Observation)
            .and_then(|i| self.headers.get(i))
            .map(String::as_str)
            .unwrap_or(SYNTHETIC_OBSERVATION_HEADER)
    }

    /// The cell for `field` in `row`, or [`NO_DATA`] when the sheet lacks it.
    pub fn value<'a>(&self, row: &'a Row, field: SemanticField) -> &'a str {
        self.columns
            .get(field)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or(NO_DATA)
    }

    /// Keep the rows matching `keep`, with the same columns.
    pub fn filter<F>(&self, keep: F) -> Self
    where
        F: Fn(&Row) -> bool,
    {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
            columns: self.columns.clone(),
        }
    }

    /// Keep the rows whose `field` parses to `date`.
    ///
    /// Unparseable cells never match.
    pub fn filter_by_date(&self, field: SemanticField, date: NaiveDate) -> Self {
        self.filter(|row| parse_loose_date(self.value(row, field)) == Some(date))
    }
}

/// Trim and upper-case a header.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_uppercase()
}

fn normalize_cell(cell: Option<&str>) -> String {
    match cell {
        Some(value) if !DataTable::is_null_value(value) => value.to_string(),
        _ => NO_DATA.to_string(),
    }
}
