//! Basic report example
//!
//! Generates one report with curated news, prints the key takeaways and
//! writes both output forms into a directory.
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_report -- /tmp/reports
//! ```

use market_report::analysis::ReportAnalysis;
use market_report::{ReportApp, ReportConfig};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    report_utils::init_tracing("info", report_utils::LogFormat::Pretty);

    let out_dir = env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    let config = ReportConfig::builder()
        .output_dir(out_dir.clone())
        .seed(2024)
        .build()?;

    println!("=== Daily Market Report ===\n");
    println!("Configuration:");
    println!("  - Cache TTL: {:?}", config.cache_ttl);
    println!("  - Output dir: {}\n", config.output_dir.display());

    let app = ReportApp::simulated(Arc::new(config));
    let snapshot = app.refresh(true).await?;

    for item in ReportAnalysis::derive(&snapshot).summary {
        println!("- {}", item.plain());
    }

    let markdown = app.export_to_output_dir().await?;
    let html = out_dir.join("report.html");
    tokio::fs::write(&html, app.render_html().await?).await?;

    println!("\nWrote {} and {}", markdown.display(), html.display());
    Ok(())
}
