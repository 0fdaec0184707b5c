//! Snapshot data model: quotes, sentiment readings and news

use crate::universe::{MarketIndex, SectorGroup};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time figures for a stock or an index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    /// Current price or level
    pub current: f64,
    /// Previous reference value
    pub previous_close: f64,
    /// `current - previous_close`
    pub change: f64,
    /// `change / previous_close * 100`
    pub change_pct: Option<f64>,
    pub rsi: Option<f64>,
    pub volume: Option<u64>,
    pub market_cap: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Build a quote by applying `change_pct` to `previous_close`.
    ///
    /// `change` is taken as the exact difference of the two levels and the
    /// stored percentage is recomputed from it.
    pub fn from_change_pct(
        symbol: impl Into<String>,
        name: impl Into<String>,
        previous_close: f64,
        change_pct: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let current = previous_close * (1.0 + change_pct / 100.0);
        let change = current - previous_close;
        let change_pct = if previous_close == 0.0 {
            None
        } else {
            Some(change / previous_close * 100.0)
        };

        Self {
            symbol: symbol.into(),
            name: name.into(),
            current,
            previous_close,
            change,
            change_pct,
            rsi: None,
            volume: None,
            market_cap: None,
            timestamp,
        }
    }

    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_volume(mut self, volume: u64, market_cap: u64) -> Self {
        self.volume = Some(volume);
        self.market_cap = Some(market_cap);
        self
    }
}

/// Insertion-ordered `symbol -> Quote` map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteMap {
    quotes: Vec<Quote>,
}

impl QuoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quote, replacing any quote with the same symbol in place
    pub fn insert(&mut self, quote: Quote) {
        match self.quotes.iter_mut().find(|q| q.symbol == quote.symbol) {
            Some(existing) => *existing = quote,
            None => self.quotes.push(quote),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.symbol == symbol)
    }

    /// Quotes in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<Quote> for QuoteMap {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let mut map = QuoteMap::new();
        for quote in iter {
            map.insert(quote);
        }
        map
    }
}

impl<'a> IntoIterator for &'a QuoteMap {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Qualitative market mood derived from a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentLevel {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentLevel {
    /// Bucket a score: <25, <45, <=55, <=75, above
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=24 => SentimentLevel::ExtremeFear,
            25..=44 => SentimentLevel::Fear,
            45..=55 => SentimentLevel::Neutral,
            56..=75 => SentimentLevel::Greed,
            _ => SentimentLevel::ExtremeGreed,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLevel::ExtremeFear => "Extreme Fear",
            SentimentLevel::Fear => "Fear",
            SentimentLevel::Neutral => "Neutral",
            SentimentLevel::Greed => "Greed",
            SentimentLevel::ExtremeGreed => "Extreme Greed",
        }
    }

    /// Machine identifier, e.g. `extreme-greed`
    pub fn slug(&self) -> &'static str {
        match self {
            SentimentLevel::ExtremeFear => "extreme-fear",
            SentimentLevel::Fear => "fear",
            SentimentLevel::Neutral => "neutral",
            SentimentLevel::Greed => "greed",
            SentimentLevel::ExtremeGreed => "extreme-greed",
        }
    }
}

/// Sentiment score with its derived level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub score: u8,
    pub level: SentimentLevel,
    pub timestamp: DateTime<Utc>,
}

impl SentimentReading {
    /// Create a reading; scores above 100 are clamped
    pub fn new(score: u8, timestamp: DateTime<Utc>) -> Self {
        let score = score.min(100);
        Self {
            score,
            level: SentimentLevel::from_score(score),
            timestamp,
        }
    }
}

/// Sector tag of a news article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Ai,
    Power,
    Market,
}

impl NewsCategory {
    pub fn key(&self) -> &'static str {
        match self {
            NewsCategory::Ai => "ai",
            NewsCategory::Power => "power",
            NewsCategory::Market => "market",
        }
    }

    /// Section heading
    pub fn title(&self) -> &'static str {
        match self {
            NewsCategory::Ai => "AI Sector",
            NewsCategory::Power => "Power Sector",
            NewsCategory::Market => "Broad Market",
        }
    }

    pub fn all() -> [NewsCategory; 3] {
        [NewsCategory::Ai, NewsCategory::Power, NewsCategory::Market]
    }
}

/// Short categorized article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub summary: Option<String>,
    pub source: String,
    pub category: NewsCategory,
}

impl NewsArticle {
    pub fn new(
        category: NewsCategory,
        title: impl Into<String>,
        summary: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: Some(summary.into()),
            source: source.into(),
            category,
        }
    }

    /// Summary text, falling back to the title when absent or blank
    pub fn summary_or_title(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.trim().is_empty() => summary,
            _ => &self.title,
        }
    }
}

/// Articles grouped by category, each list in display order
pub type NewsFeed = BTreeMap<NewsCategory, Vec<NewsArticle>>;

/// Immutable bundle of everything one report renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub indices: QuoteMap,
    pub sectors: BTreeMap<SectorGroup, QuoteMap>,
    pub sentiment: SentimentReading,
    pub volatility: Quote,
    pub news: NewsFeed,
    pub captured_at: DateTime<Local>,
}

impl Snapshot {
    pub fn index(&self, index: MarketIndex) -> Option<&Quote> {
        self.indices.get(index.symbol())
    }

    pub fn sector(&self, group: SectorGroup) -> Option<&QuoteMap> {
        self.sectors.get(&group)
    }

    /// Articles of a category, empty when the category is missing
    pub fn news_for(&self, category: NewsCategory) -> &[NewsArticle] {
        self.news.get(&category).map_or(&[], Vec::as_slice)
    }
}
