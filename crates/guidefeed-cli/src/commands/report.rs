//! Report command - print a report for a local sheet export.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use guidefeed::{
    parse_request_date, CacheConfig, FeedbackService, Parser, SheetNames, StaticSource, TableCache,
};

use crate::cli::{ReportKind, ReportOptions};

pub fn run(
    file: PathBuf,
    kind: ReportKind,
    date: Option<String>,
    options: ReportOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let date = date.as_deref().map(parse_request_date).transpose()?;
    let (table, meta) = Parser::new().parse_file(&file)?;

    if verbose {
        eprintln!(
            "{} {} ({} rows, {} columns, {})",
            "Loaded".cyan().bold(),
            file.display().to_string().white(),
            meta.row_count,
            meta.column_count,
            meta.hash
        );
    }

    // The file stands in for whichever sheet the report reads
    let sheets = SheetNames::default();
    let source = StaticSource::new()
        .with_sheet(sheets.dep.clone(), table.clone())
        .with_sheet(sheets.tma.clone(), table.clone())
        .with_sheet(sheets.rcf.clone(), table);
    let cache = TableCache::new(Arc::new(source), CacheConfig::default());
    let service = FeedbackService::new(cache, options.to_config()).with_sheets(sheets);

    let text = match kind {
        ReportKind::Dep => service.dep_feedback(date)?,
        ReportKind::Tma => service.tma_analysis(date)?,
        ReportKind::Rcf => service.rcf_analysis(date)?,
    };

    println!("{}", text);
    Ok(())
}
