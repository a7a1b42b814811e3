//! Row sources: where sheet snapshots come from.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use super::parser::Parser;
use super::source::DataTable;
use crate::error::{FeedbackError, Result};

/// Something that can deliver the current contents of a named sheet.
///
/// Implementations may block and may fail; callers are expected to sit
/// behind a [`crate::TableCache`].
pub trait TableSource: Send + Sync {
    /// Fetch the full contents of `sheet`.
    fn fetch(&self, sheet: &str) -> Result<DataTable>;

    /// Short name for log lines.
    fn name(&self) -> &str;
}

/// Reads `<root>/<SHEET>.csv` or `<root>/<SHEET>.tsv` from disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    parser: Parser,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: Parser::new(),
        }
    }

    fn path_for(&self, sheet: &str) -> Option<PathBuf> {
        ["csv", "tsv"]
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", sheet, ext)))
            .find(|p| p.exists())
    }
}

impl TableSource for DirectorySource {
    fn fetch(&self, sheet: &str) -> Result<DataTable> {
        let path = self.path_for(sheet).ok_or_else(|| FeedbackError::Fetch {
            sheet: sheet.to_string(),
            message: format!("no {}.csv or {}.tsv in {}", sheet, sheet, self.root.display()),
        })?;

        let (table, meta) = self.parser.parse_file(&path)?;
        debug!(sheet, hash = %meta.hash, rows = meta.row_count, "read sheet from disk");
        Ok(table)
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// Spreadsheet export URL; `{key}` is substituted and the sheet name is
/// appended as the `sheet` query parameter.
pub const DEFAULT_EXPORT_URL: &str =
    "https://docs.google.com/spreadsheets/d/{key}/gviz/tq?tqx=out:csv";

/// Downloads a sheet as CSV from a spreadsheet export endpoint.
pub struct SheetExportSource {
    key: String,
    url_template: String,
    client: reqwest::blocking::Client,
    parser: Parser,
}

impl SheetExportSource {
    /// Create a source for the spreadsheet identified by `key`.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(key, Duration::from_secs(30))
    }

    /// Create a source with a custom request timeout.
    pub fn with_timeout(key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(FeedbackError::Config("spreadsheet key is empty".to_string()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            key,
            url_template: DEFAULT_EXPORT_URL.to_string(),
            client,
            parser: Parser::with_config(super::ParserConfig {
                delimiter: Some(b','),
                ..Default::default()
            }),
        })
    }

    /// Point the source at a different export endpoint.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    /// The URL a sheet is downloaded from.
    pub fn url_for(&self, sheet: &str) -> Result<reqwest::Url> {
        let base = self.url_template.replace("{key}", &self.key);
        let mut url = reqwest::Url::parse(&base)
            .map_err(|e| FeedbackError::Config(format!("invalid export URL '{}': {}", base, e)))?;
        url.query_pairs_mut().append_pair("sheet", sheet);
        Ok(url)
    }
}

impl TableSource for SheetExportSource {
    fn fetch(&self, sheet: &str) -> Result<DataTable> {
        let url = self.url_for(sheet)?;
        info!(sheet, "downloading sheet");

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedbackError::Fetch {
                sheet: sheet.to_string(),
                message: format!("export endpoint answered {}", status),
            });
        }

        let body = response.bytes()?;
        let (table, meta) = self.parser.parse_bytes(&body, url.as_str())?;
        info!(sheet, rows = meta.row_count, hash = %meta.hash, "sheet downloaded");
        Ok(table)
    }

    fn name(&self) -> &str {
        "sheet-export"
    }
}

/// Serves fixed tables from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    sheets: HashMap<String, DataTable>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet.
    pub fn with_sheet(mut self, sheet: impl Into<String>, table: DataTable) -> Self {
        self.sheets.insert(sheet.into(), table);
        self
    }
}

impl TableSource for StaticSource {
    fn fetch(&self, sheet: &str) -> Result<DataTable> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| FeedbackError::Fetch {
                sheet: sheet.to_string(),
                message: "unknown sheet".to_string(),
            })
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_directory_source_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("DEP.csv"), "VOO,DESTINO\nG3100,GIG\n").unwrap();

        let source = DirectorySource::new(dir.path());
        let table = source.fetch("DEP").unwrap();
        assert_eq!(table.headers, vec!["VOO", "DESTINO"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_directory_source_falls_back_to_tsv() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TMA.tsv"), "INICIO\tTURNO\n10/11/2025\tTARDE\n").unwrap();

        let source = DirectorySource::new(dir.path());
        let table = source.fetch("TMA").unwrap();
        assert_eq!(table.rows[0][1], "TARDE");
    }

    #[test]
    fn test_directory_source_missing_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(source.fetch("RCF"), Err(FeedbackError::Fetch { .. })));
    }

    #[test]
    fn test_export_url() {
        let source = SheetExportSource::new("abc123").unwrap();
        assert_eq!(
            source.url_for("DEP").unwrap().as_str(),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv&sheet=DEP"
        );
        let custom = source.with_url_template("http://localhost/{key}/export");
        assert_eq!(
            custom.url_for("TMA").unwrap().as_str(),
            "http://localhost/abc123/export?sheet=TMA"
        );
    }

    #[test]
    fn test_export_url_encodes_sheet_name() {
        let source = SheetExportSource::new("abc123").unwrap();
        let url = source.url_for("RCF & DEP #2").unwrap();

        assert!(url.fragment().is_none());
        let sheets: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k == "sheet")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(sheets, vec![("sheet".to_string(), "RCF & DEP #2".to_string())]);
        assert!(url.query_pairs().any(|(k, v)| k == "tqx" && v == "out:csv"));
    }

    #[test]
    fn test_export_url_rejects_bad_template() {
        let source = SheetExportSource::new("abc123").unwrap().with_url_template("not a url {key}");
        assert!(matches!(source.url_for("DEP"), Err(FeedbackError::Config(_))));
    }

    #[test]
    fn test_export_source_rejects_empty_key() {
        assert!(matches!(
            SheetExportSource::new("  "),
            Err(FeedbackError::Config(_))
        ));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new().with_sheet("DEP", DataTable::from_rows(["VOO"], [["G3100"]]));
        assert_eq!(source.fetch("DEP").unwrap().row_count(), 1);
        assert!(source.fetch("TMA").is_err());
    }
}
