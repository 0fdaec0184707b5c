//! Simulated quote source with per-key memoization

use async_trait::async_trait;
use chrono::{Datelike, Local, Utc, Weekday};
use std::sync::Arc;

use super::{QuoteSource, simulate_latency};
use crate::cache::{CacheKey, MemoCache};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::model::{Quote, QuoteMap};
use crate::random::RandomSource;
use crate::universe;

/// RSI draws land in `[RSI_FLOOR, RSI_FLOOR + RSI_SPAN]`
const RSI_FLOOR: f64 = 20.0;
const RSI_SPAN: f64 = 60.0;

const MIN_VOLUME: u64 = 10_000_000;
const VOLUME_SPAN: f64 = 50_000_000.0;
const MIN_MARKET_CAP: u64 = 100_000_000_000;
const MARKET_CAP_SPAN: f64 = 2_000_000_000_000.0;

/// True on Monday through Friday. No holiday calendar, no session hours.
pub fn is_market_open_on<D: Datelike>(date: &D) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Market status for the current local date
pub fn is_market_open() -> bool {
    is_market_open_on(&Local::now())
}

/// Quote source generating random figures around fixed reference values
pub struct SimulatedQuoteSource {
    cache: MemoCache<Quote>,
    rng: Arc<dyn RandomSource>,
    config: Arc<ReportConfig>,
}

impl SimulatedQuoteSource {
    /// Create a new source; the memo lives as long as the instance
    pub fn new(config: Arc<ReportConfig>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            cache: MemoCache::new(config.cache_ttl),
            rng,
            config,
        }
    }

    /// Generate a fresh stock quote, bypassing the memo
    pub fn generate_stock_quote(&self, ticker: &str) -> Quote {
        let change_pct = self.rng.symmetric(universe::STOCK_CHANGE_RANGE_PCT);
        let rsi = ((self.rng.unit() * RSI_SPAN + RSI_FLOOR) * 10.0).round() / 10.0;
        let volume = MIN_VOLUME + (self.rng.unit() * VOLUME_SPAN) as u64;
        let market_cap = MIN_MARKET_CAP + (self.rng.unit() * MARKET_CAP_SPAN) as u64;

        Quote::from_change_pct(
            ticker,
            universe::stock_name(ticker),
            universe::stock_base_price(ticker),
            change_pct,
            Utc::now(),
        )
        .with_rsi(rsi)
        .with_volume(volume, market_cap)
    }

    /// Generate a fresh index quote, bypassing the memo
    pub fn generate_index_quote(&self, symbol: &str) -> Quote {
        let change_pct = self.rng.symmetric(universe::index_change_range(symbol));

        Quote::from_change_pct(
            symbol,
            universe::index_name(symbol),
            universe::index_base_level(symbol),
            change_pct,
            Utc::now(),
        )
    }
}

fn validate_symbol(symbol: &str) -> Result<&str> {
    let symbol = symbol.trim();
    if symbol.is_empty() || symbol.chars().any(char::is_whitespace) {
        return Err(ReportError::InvalidSymbol(symbol.to_string()));
    }
    Ok(symbol)
}

#[async_trait]
impl QuoteSource for SimulatedQuoteSource {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let ticker = validate_symbol(symbol)?;

        self.cache
            .get_or_fetch(CacheKey::stock(ticker), move || async move {
                simulate_latency(self.config.stock_latency).await;
                Ok(self.generate_stock_quote(ticker))
            })
            .await
    }

    async fn get_index(&self, symbol: &str) -> Result<Quote> {
        let symbol = validate_symbol(symbol)?;

        self.cache
            .get_or_fetch(CacheKey::index(symbol), move || async move {
                simulate_latency(self.config.index_latency).await;
                Ok(self.generate_index_quote(symbol))
            })
            .await
    }

    /// Sequential lookups in input order. The batch pause is skipped after the last item.
    async fn batch_get_quotes(&self, symbols: &[String]) -> Result<QuoteMap> {
        let mut quotes = QuoteMap::new();

        for (i, symbol) in symbols.iter().enumerate() {
            quotes.insert(self.get_quote(symbol).await?);
            if i + 1 < symbols.len() {
                simulate_latency(self.config.batch_pause).await;
            }
        }

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, SeededRandom};
    use chrono::NaiveDate;
    use std::time::Duration;

    fn source(ttl: Duration) -> SimulatedQuoteSource {
        let config = ReportConfig::builder()
            .cache_ttl(ttl)
            .no_latency()
            .build()
            .unwrap();
        SimulatedQuoteSource::new(Arc::new(config), Arc::new(SeededRandom::new(7)))
    }

    fn relative_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
    }

    #[test]
    fn test_market_open_weekdays() {
        // 2026-10-12 is a Monday
        for day in 12..=16 {
            let date = NaiveDate::from_ymd_opt(2026, 10, day).unwrap();
            assert!(is_market_open_on(&date), "{date} should be open");
        }
        let saturday = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(!is_market_open_on(&saturday));
        assert!(!is_market_open_on(&sunday));
    }

    #[test]
    fn test_stock_quote_ranges() {
        let source = source(Duration::from_secs(60));
        for _ in 0..200 {
            let quote = source.generate_stock_quote("NVDA");
            let pct = quote.change_pct.unwrap();
            assert!((-3.0..=3.0).contains(&pct));
            let rsi = quote.rsi.unwrap();
            assert!((20.0..=80.0).contains(&rsi));
            assert_eq!((rsi * 10.0).round() / 10.0, rsi);
            assert!(quote.volume.unwrap() >= 10_000_000);
            assert!(quote.market_cap.unwrap() >= 100_000_000_000);
            assert_eq!(quote.name, "NVIDIA");
            assert!(relative_eq(quote.change, quote.current - quote.previous_close));
            assert!(relative_eq(pct, quote.change / quote.previous_close * 100.0));
        }
    }

    #[test]
    fn test_index_quote_ranges() {
        let source = source(Duration::from_secs(60));
        for _ in 0..200 {
            let spx = source.generate_index_quote("^GSPC");
            assert!(spx.change_pct.unwrap().abs() <= 1.0);
            assert_eq!(spx.previous_close, 5800.0);
            assert!(spx.rsi.is_none());
            assert!(spx.volume.is_none());

            let vix = source.generate_index_quote("^VIX");
            assert!(vix.change_pct.unwrap().abs() <= 5.0);
        }
    }

    #[test]
    fn test_unknown_symbols_use_fallback_base() {
        let config = Arc::new(ReportConfig::default().without_latency());
        let source = SimulatedQuoteSource::new(config, Arc::new(FixedRandom(0.5)));

        let stock = source.generate_stock_quote("ZZZZ");
        assert_eq!(stock.previous_close, 100.0);
        assert_eq!(stock.current, 100.0);
        assert_eq!(stock.name, "ZZZZ");

        let index = source.generate_index_quote("^FTSE");
        assert_eq!(index.previous_close, 1000.0);
    }

    #[tokio::test]
    async fn test_quote_is_memoized_within_window() {
        let source = source(Duration::from_secs(300));

        let first = source.get_quote("MSFT").await.unwrap();
        let second = source.get_quote("MSFT").await.unwrap();

        assert_eq!(first.timestamp, second.timestamp);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_quote_refreshes_after_window() {
        let source = source(Duration::from_millis(30));

        let first = source.get_index("^DJI").await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let second = source.get_index("^DJI").await.unwrap();

        assert!(second.timestamp > first.timestamp);
    }

    #[tokio::test]
    async fn test_stock_and_index_namespaces_are_separate() {
        let source = source(Duration::from_secs(300));

        let index = source.get_index("VIX").await.unwrap();
        let stock = source.get_quote("VIX").await.unwrap();

        assert_eq!(index.previous_close, 1000.0);
        assert_eq!(stock.previous_close, 100.0);
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let source = source(Duration::from_secs(300));
        let symbols: Vec<String> = ["TSM", "NVDA", "AMD"]
            .iter()
            .map(ToString::to_string)
            .collect();

        let quotes = source.batch_get_quotes(&symbols).await.unwrap();

        let order: Vec<_> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(order, vec!["TSM", "NVDA", "AMD"]);

        // Batch goes through the same memo as single lookups
        let nvda = source.get_quote("NVDA").await.unwrap();
        assert_eq!(quotes.get("NVDA"), Some(&nvda));
    }

    #[tokio::test]
    async fn test_invalid_symbol_is_rejected() {
        let source = source(Duration::from_secs(300));

        assert!(matches!(
            source.get_quote("  ").await,
            Err(ReportError::InvalidSymbol(_))
        ));
        assert!(matches!(
            source.get_index("BAD SYMBOL").await,
            Err(ReportError::InvalidSymbol(_))
        ));
    }
}
