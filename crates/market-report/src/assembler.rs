//! Fan-out over all data sources into one snapshot

use chrono::Local;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::model::{NewsFeed, QuoteMap, Snapshot};
use crate::random;
use crate::sources::{
    NewsDesk, NewsSource, QuoteSource, SentimentSource, SimulatedQuoteSource,
    SimulatedSentimentSource,
};
use crate::universe::{MarketIndex, SectorGroup};

/// Builds snapshots from injected sources
pub struct ReportAssembler {
    quotes: Arc<dyn QuoteSource>,
    sentiment: Arc<dyn SentimentSource>,
    news: Arc<dyn NewsSource>,
}

impl ReportAssembler {
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        sentiment: Arc<dyn SentimentSource>,
        news: Arc<dyn NewsSource>,
    ) -> Self {
        Self {
            quotes,
            sentiment,
            news,
        }
    }

    /// Wire the simulated sources sharing one random source
    pub fn simulated(config: Arc<ReportConfig>) -> Self {
        let rng = random::from_seed(config.seed);
        let quotes: Arc<dyn QuoteSource> =
            Arc::new(SimulatedQuoteSource::new(config.clone(), rng.clone()));
        let sentiment = Arc::new(SimulatedSentimentSource::new(
            config.clone(),
            quotes.clone(),
            rng.clone(),
        ));
        let news = Arc::new(NewsDesk::new(config, rng));

        Self::new(quotes, sentiment, news)
    }

    /// Collect every source and bundle the results.
    ///
    /// `use_mock` selects the curated news pool; otherwise news is sampled
    /// fresh. The first failing source aborts the whole report.
    pub async fn generate_report(&self, use_mock: bool) -> Result<Snapshot> {
        let started = Instant::now();
        tracing::info!(curated_news = use_mock, "generating report");

        let (indices, ai, power, sentiment, volatility, news) = tokio::try_join!(
            self.fetch_indices(),
            self.fetch_group(SectorGroup::Ai),
            self.fetch_group(SectorGroup::Power),
            async {
                self.sentiment
                    .get_sentiment_score()
                    .await
                    .map_err(|e| ReportError::source_failed("sentiment", e))
            },
            async {
                self.sentiment
                    .get_volatility_index()
                    .await
                    .map_err(|e| ReportError::source_failed("volatility", e))
            },
            self.fetch_news(use_mock),
        )
        .inspect_err(|e| tracing::error!(error = %e, "report generation failed"))?;

        let snapshot = Snapshot {
            indices,
            sectors: [(SectorGroup::Ai, ai), (SectorGroup::Power, power)]
                .into_iter()
                .collect(),
            sentiment,
            volatility,
            news,
            captured_at: Local::now(),
        };

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            sentiment = snapshot.sentiment.score,
            "report generated"
        );

        Ok(snapshot)
    }

    async fn fetch_indices(&self) -> Result<QuoteMap> {
        let quotes = try_join_all(
            MarketIndex::all()
                .into_iter()
                .map(|index| self.quotes.get_index(index.symbol())),
        )
        .await
        .map_err(|e| ReportError::source_failed("indices", e))?;

        Ok(quotes.into_iter().collect())
    }

    async fn fetch_group(&self, group: SectorGroup) -> Result<QuoteMap> {
        let tickers: Vec<String> = group.tickers().iter().map(ToString::to_string).collect();

        self.quotes
            .batch_get_quotes(&tickers)
            .await
            .map_err(|e| ReportError::source_failed(format!("{} sector", group.name()), e))
    }

    async fn fetch_news(&self, curated: bool) -> Result<NewsFeed> {
        let feed = if curated {
            self.news.fetch_curated_news().await
        } else {
            self.news.fetch_random_news().await
        };
        feed.map_err(|e| ReportError::source_failed("news", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Quote, SentimentReading};
    use crate::sources::{MockNewsSource, MockQuoteSource, MockSentimentSource};
    use chrono::Utc;

    fn flat_index(symbol: &str) -> Quote {
        Quote::from_change_pct(symbol, symbol, 1000.0, 0.5, Utc::now())
    }

    fn vix() -> Quote {
        Quote::from_change_pct("^VIX", "VIX", 18.5, 1.0, Utc::now())
    }

    fn simulated() -> ReportAssembler {
        let config = ReportConfig::builder()
            .no_latency()
            .seed(42)
            .build()
            .unwrap();
        ReportAssembler::simulated(Arc::new(config))
    }

    fn working_quotes() -> MockQuoteSource {
        let mut quotes = MockQuoteSource::new();
        quotes
            .expect_get_index()
            .returning(|symbol| Ok(flat_index(symbol)));
        quotes.expect_batch_get_quotes().returning(|symbols| {
            Ok(symbols
                .iter()
                .map(|s| Quote::from_change_pct(s.as_str(), s.as_str(), 100.0, 1.0, Utc::now()))
                .collect())
        });
        quotes
    }

    fn working_sentiment() -> MockSentimentSource {
        let mut sentiment = MockSentimentSource::new();
        sentiment
            .expect_get_sentiment_score()
            .returning(|| Ok(SentimentReading::new(50, Utc::now())));
        sentiment
            .expect_get_volatility_index()
            .returning(|| Ok(vix()));
        sentiment
    }

    #[tokio::test]
    async fn test_simulated_report_is_complete() {
        let snapshot = simulated().generate_report(true).await.unwrap();

        let indices: Vec<_> = snapshot.indices.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(indices, vec!["^GSPC", "^IXIC", "^DJI", "^VIX"]);
        assert_eq!(snapshot.sector(SectorGroup::Ai).unwrap().len(), 6);
        assert_eq!(snapshot.sector(SectorGroup::Power).unwrap().len(), 2);
        assert_eq!(snapshot.volatility.symbol, "^VIX");
        assert_eq!(snapshot.news, NewsDesk::curated_feed());
    }

    #[tokio::test]
    async fn test_random_news_report() {
        let snapshot = simulated().generate_report(false).await.unwrap();
        assert_eq!(snapshot.news.values().map(Vec::len).sum::<usize>(), 7);
        assert!(snapshot.sentiment.score <= 100);
    }

    #[tokio::test]
    async fn test_vix_is_consistent_under_latency() {
        for seed in 0..3 {
            let config = ReportConfig::builder().seed(seed).build().unwrap();
            let snapshot = ReportAssembler::simulated(Arc::new(config))
                .generate_report(true)
                .await
                .unwrap();

            assert_eq!(
                snapshot.indices.get("^VIX"),
                Some(&snapshot.volatility),
                "seed {seed}: index table and volatility reading disagree"
            );
        }
    }

    #[tokio::test]
    async fn test_mock_flag_selects_curated_pool() {
        let mut news = MockNewsSource::new();
        news.expect_fetch_curated_news().never();
        news.expect_fetch_random_news()
            .times(1)
            .returning(|| Ok(NewsFeed::new()));

        let assembler = ReportAssembler::new(
            Arc::new(working_quotes()),
            Arc::new(working_sentiment()),
            Arc::new(news),
        );

        let snapshot = assembler.generate_report(false).await.unwrap();
        assert!(snapshot.news.is_empty());
    }

    #[tokio::test]
    async fn test_any_source_failure_aborts_report() {
        let mut sentiment = MockSentimentSource::new();
        sentiment
            .expect_get_sentiment_score()
            .returning(|| Err(ReportError::Config("upstream down".into())));
        sentiment
            .expect_get_volatility_index()
            .returning(|| Ok(vix()));

        let mut news = MockNewsSource::new();
        news.expect_fetch_curated_news()
            .returning(|| Ok(NewsFeed::new()));

        let assembler = ReportAssembler::new(
            Arc::new(working_quotes()),
            Arc::new(sentiment),
            Arc::new(news),
        );

        match assembler.generate_report(true).await {
            Err(ReportError::SourceFailed { source_name, reason }) => {
                assert_eq!(source_name, "sentiment");
                assert!(reason.contains("upstream down"));
            }
            other => panic!("Expected SourceFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_failure_names_the_group() {
        let mut quotes = MockQuoteSource::new();
        quotes
            .expect_get_index()
            .returning(|symbol| Ok(flat_index(symbol)));
        quotes.expect_batch_get_quotes().returning(|symbols| {
            if symbols.iter().any(|s| s == "CEG") {
                Err(ReportError::InvalidSymbol("CEG".into()))
            } else {
                Ok(QuoteMap::new())
            }
        });

        let mut news = MockNewsSource::new();
        news.expect_fetch_random_news()
            .returning(|| Ok(NewsFeed::new()));

        let assembler = ReportAssembler::new(
            Arc::new(quotes),
            Arc::new(working_sentiment()),
            Arc::new(news),
        );

        let err = assembler.generate_report(false).await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::SourceFailed { ref source_name, .. } if source_name == "Power sector"
        ));
    }
}
