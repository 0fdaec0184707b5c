//! Simulated fear & greed score and volatility reading

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use super::{QuoteSource, SentimentSource, simulate_latency};
use crate::cache::{CacheKey, CacheNamespace, MemoCache};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::model::{Quote, SentimentReading};
use crate::random::RandomSource;
use crate::universe::MarketIndex;

const FEAR_GREED_KEY: &str = "fear_greed";

/// Sentiment source drawing a uniform 0-100 score
pub struct SimulatedSentimentSource {
    quotes: Arc<dyn QuoteSource>,
    cache: MemoCache<SentimentReading>,
    rng: Arc<dyn RandomSource>,
    config: Arc<ReportConfig>,
}

impl SimulatedSentimentSource {
    /// Volatility readings are delegated to `quotes`
    pub fn new(
        config: Arc<ReportConfig>,
        quotes: Arc<dyn QuoteSource>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            quotes,
            cache: MemoCache::new(config.cache_ttl),
            rng,
            config,
        }
    }

    fn generate_reading(&self) -> SentimentReading {
        let score = self.rng.index(101) as u8;
        SentimentReading::new(score, Utc::now())
    }
}

#[async_trait]
impl SentimentSource for SimulatedSentimentSource {
    async fn get_sentiment_score(&self) -> Result<SentimentReading> {
        let key = CacheKey::new(CacheNamespace::Sentiment, FEAR_GREED_KEY);

        self.cache
            .get_or_fetch(key, move || async move {
                simulate_latency(self.config.sentiment_latency).await;
                Ok(self.generate_reading())
            })
            .await
    }

    async fn get_volatility_index(&self) -> Result<Quote> {
        self.quotes.get_index(MarketIndex::Vix.symbol()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SentimentLevel;
    use crate::random::{FixedRandom, SeededRandom};
    use crate::sources::SimulatedQuoteSource;
    use std::time::Duration;

    fn build(ttl: Duration, rng: Arc<dyn RandomSource>) -> SimulatedSentimentSource {
        let config = Arc::new(
            ReportConfig::builder()
                .cache_ttl(ttl)
                .no_latency()
                .build()
                .unwrap(),
        );
        let quotes = Arc::new(SimulatedQuoteSource::new(config.clone(), rng.clone()));
        SimulatedSentimentSource::new(config, quotes, rng)
    }

    #[tokio::test]
    async fn test_score_in_range_with_matching_level() {
        for seed in 0..50 {
            let source = build(Duration::from_secs(300), Arc::new(SeededRandom::new(seed)));
            let reading = source.get_sentiment_score().await.unwrap();
            assert!(reading.score <= 100);
            assert_eq!(reading.level, SentimentLevel::from_score(reading.score));
        }
    }

    #[tokio::test]
    async fn test_fixed_draw_maps_to_extreme_greed() {
        let source = build(Duration::from_secs(300), Arc::new(FixedRandom(0.8)));
        let reading = source.get_sentiment_score().await.unwrap();
        assert_eq!(reading.score, 80);
        assert_eq!(reading.level, SentimentLevel::ExtremeGreed);
    }

    #[tokio::test]
    async fn test_score_is_memoized() {
        let source = build(Duration::from_secs(300), Arc::new(SeededRandom::new(3)));
        let first = source.get_sentiment_score().await.unwrap();
        let second = source.get_sentiment_score().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_score_refreshes_after_window() {
        let source = build(Duration::from_millis(30), Arc::new(SeededRandom::new(3)));
        let first = source.get_sentiment_score().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let second = source.get_sentiment_score().await.unwrap();
        assert!(second.timestamp > first.timestamp);
    }

    #[tokio::test]
    async fn test_volatility_delegates_to_quotes() {
        let source = build(Duration::from_secs(300), Arc::new(SeededRandom::new(9)));
        let vix = source.get_volatility_index().await.unwrap();
        assert_eq!(vix.symbol, "^VIX");
        assert_eq!(vix.name, "VIX");
        assert_eq!(vix.previous_close, 18.5);

        let again = source.quotes.get_index("^VIX").await.unwrap();
        assert_eq!(vix, again);
    }
}
