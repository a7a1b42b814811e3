//! Serve command - expose the reports over HTTP.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use guidefeed::{
    CacheConfig, DirectorySource, FeedbackService, SheetExportSource, TableCache, TableSource,
};

use crate::cli::{ReportOptions, SourceArgs};
use crate::server::{app, state::AppState};

pub fn run(
    source: SourceArgs,
    bind: IpAddr,
    port: u16,
    cache_ttl: u64,
    allow_origins: Vec<String>,
    options: ReportOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (table_source, origin): (Arc<dyn TableSource>, String) = match (source.data_dir, source.sheet_key) {
        (Some(dir), _) => {
            if !dir.is_dir() {
                return Err(format!("Not a directory: {}", dir.display()).into());
            }
            let origin = dir.display().to_string();
            (Arc::new(DirectorySource::new(dir)), origin)
        }
        (None, Some(key)) => {
            let origin = format!("spreadsheet {}", key);
            (Arc::new(SheetExportSource::new(key)?), origin)
        }
        (None, None) => return Err("Either --data-dir or --sheet-key is required".into()),
    };

    let cache = TableCache::new(table_source, CacheConfig::with_ttl(Duration::from_secs(cache_ttl)));
    let service = FeedbackService::new(cache, options.to_config());
    let state = AppState::new(service);
    let addr = SocketAddr::new(bind, port);

    println!();
    println!(
        "{} {}",
        "Serving feedback reports at".cyan().bold(),
        format!("http://{}", addr).white().bold()
    );
    println!();
    println!("  Source: {}", origin);
    println!("  Cache TTL: {}s", cache_ttl);
    if verbose {
        let origins = if allow_origins.is_empty() {
            "any".to_string()
        } else {
            allow_origins.join(", ")
        };
        println!("  CORS origins: {}", origins);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    // The blocking HTTP client inside the source must be dropped outside the runtime
    let keep_alive = state.clone();
    let runtime = tokio::runtime::Runtime::new()?;
    let served = runtime.block_on(app::run_server(state, addr, allow_origins));
    drop(runtime);
    drop(keep_alive);
    served?;

    println!("{}", "Server stopped".yellow());
    Ok(())
}
