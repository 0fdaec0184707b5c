//! Daily market report
//!
//! This crate assembles a point-in-time market snapshot and renders it twice:
//! as an HTML page and as a Markdown export. It includes:
//!
//! - Simulated quote, sentiment and news sources with time-bounded memoization
//! - A report assembler fanning out to every source and failing as a whole
//! - Derived figures (sector averages, best/worst movers, RSI trend labels)
//!   and narrative text for the key takeaways
//! - A shared view layer so both output forms agree on every figure
//!
//! # Example
//!
//! ```rust,ignore
//! use market_report::{ReportApp, ReportConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(ReportConfig::default().with_env_overrides()?);
//!     let app = ReportApp::simulated(config);
//!
//!     app.refresh(false).await?;
//!     let path = app.export_to_output_dir().await?;
//!     println!("exported {}", path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod app;
pub mod assembler;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod random;
pub mod render;
pub mod sources;
pub mod universe;

// Re-export main types for convenience
pub use analysis::{ReportAnalysis, TrendLabel};
pub use app::ReportApp;
pub use assembler::ReportAssembler;
pub use config::{ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result};
pub use model::{
    NewsArticle, NewsCategory, Quote, QuoteMap, SentimentLevel, SentimentReading, Snapshot,
};
pub use render::{ReportView, export_filename, render_html, render_markdown};
pub use sources::{NewsSource, QuoteSource, SentimentSource, is_market_open};
pub use universe::{MarketIndex, SectorGroup};
