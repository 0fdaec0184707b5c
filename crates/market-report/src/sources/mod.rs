//! Data sources feeding the report assembler
//!
//! Each source is a service object behind an async trait so the assembler
//! can be wired with simulated sources in production and stubs in tests.

pub mod news;
pub mod quotes;
pub mod sentiment;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::model::{NewsFeed, Quote, QuoteMap, SentimentReading};

pub use news::NewsDesk;
pub use quotes::{SimulatedQuoteSource, is_market_open, is_market_open_on};
pub use sentiment::SimulatedSentimentSource;

/// Per-symbol quotes for stocks and indices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Quote for a stock ticker
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Quote for an index symbol
    async fn get_index(&self, symbol: &str) -> Result<Quote>;

    /// Quotes for several stock tickers, keyed and ordered by input
    async fn batch_get_quotes(&self, symbols: &[String]) -> Result<QuoteMap>;
}

/// Market mood and volatility readings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn get_sentiment_score(&self) -> Result<SentimentReading>;

    async fn get_volatility_index(&self) -> Result<Quote>;
}

/// Categorized news articles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// The fixed editorial pool
    async fn fetch_curated_news(&self) -> Result<NewsFeed>;

    /// A freshly sampled pool
    async fn fetch_random_news(&self) -> Result<NewsFeed>;
}

/// Sleep for a simulated I/O delay; zero returns immediately
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
