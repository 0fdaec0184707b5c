//! News source: a fixed editorial pool and a randomly assembled one

use async_trait::async_trait;
use std::sync::Arc;

use super::{NewsSource, simulate_latency};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::model::{NewsArticle, NewsCategory, NewsFeed};
use crate::random::RandomSource;

/// `(title, summary, source)`
type CuratedItem = (&'static str, &'static str, &'static str);

const CURATED_AI: [CuratedItem; 3] = [
    (
        "NVIDIA hits a record high as AI chip demand stays strong",
        "NVIDIA's fourth-quarter revenue beat expectations on strong data center growth. \
         Analysts broadly raised price targets, arguing AI infrastructure build-out is still early. \
         The CEO said generative AI is driving a structural shift in compute demand.",
        "Yahoo Finance",
    ),
    (
        "Microsoft AI business grows quickly as Copilot users reach a new high",
        "Microsoft's latest results show AI revenue has become the main growth driver. \
         Copilot for Microsoft 365 subscriptions keep climbing and Azure AI usage doubled year over year. \
         The company expects AI to keep growing fast next quarter.",
        "Seeking Alpha",
    ),
    (
        "Google launches a new Gemini model to challenge OpenAI's lead",
        "Google DeepMind released Gemini Ultra, beating GPT-4 on several benchmarks. \
         Analysts see it as a milestone in the AI race that strengthens Google's cloud business. \
         Shares rose 2% after hours.",
        "CNBC",
    ),
];

const CURATED_POWER: [CuratedItem; 2] = [
    (
        "Data center power demand surges, nuclear stocks in favor",
        "As AI data center construction accelerates, power demand forecasts were raised sharply. \
         Nuclear and power suppliers such as Constellation Energy and Vistra have rallied recently. \
         Analysts expect the trend to last through 2030.",
        "MarketWatch",
    ),
    (
        "CEG wins large data center supply contract, backlog at record",
        "Constellation Energy signed long-term supply agreements with several tech giants, \
         securing steady revenue for its nuclear fleet. The CEO called it the largest order growth \
         in company history and plans more investment in nuclear restarts.",
        "Bloomberg",
    ),
];

const CURATED_MARKET: [CuratedItem; 2] = [
    (
        "Fed hints at a rate cut this year, sentiment improves",
        "Minutes of the latest Fed meeting show most members see a cut this year as appropriate \
         if inflation keeps easing. Markets reacted positively, tech led gains and the S&P 500 \
         approached its record high.",
        "Financial Times",
    ),
    (
        "Nasdaq breaks key resistance, technicians turn bullish",
        "The Nasdaq cleared the 17,000 mark on rising volume. Technical analysts credit the AI boom \
         and improving liquidity, and suggest watching semiconductors and software.",
        "Barron's",
    ),
];

const AI_TITLES: [&str; 5] = [
    "AI chip shipments beat expectations as supply stays tight",
    "Big tech steps up AI infrastructure spending",
    "Generative AI use cases expand rapidly",
    "AI training costs fall sharply as efficiency improves",
    "Edge AI chip market enters a boom",
];

const POWER_TITLES: [&str; 5] = [
    "Renewable grid connections accelerate",
    "Grid upgrade investment plan approved",
    "Energy storage costs keep falling",
    "Smart grid construction picks up pace",
    "Power market reform deepens",
];

const MARKET_TITLES: [&str; 5] = [
    "Inflation data in line, muted market reaction",
    "Strong jobs data lifts soft-landing hopes",
    "Corporate earnings broadly beat expectations",
    "Global equities rally in sync",
    "Bond yield curve steepens",
];

const AI_SUMMARIES: [&str; 3] = [
    "The AI industry keeps growing fast, with leading companies reporting a rising AI contribution.",
    "Technical breakthroughs speed up AI adoption as digital transformation demand stays strong.",
    "Capital keeps pouring into AI and startup valuations keep setting records.",
];

const POWER_SUMMARIES: [&str; 3] = [
    "Policy support for the energy transition keeps lifting the share of clean power.",
    "Power demand is shifting as data centers take a fast-growing share of consumption.",
    "Traditional energy companies are pivoting and investing more in renewables.",
];

const MARKET_SUMMARIES: [&str; 3] = [
    "Macro data sends positive signals and risk appetite recovers.",
    "Monetary policy expectations are stabilizing and liquidity remains supportive.",
    "Geopolitical risks ease and global trade activity picks up.",
];

const SOURCES: [&str; 6] = [
    "Yahoo Finance",
    "Bloomberg",
    "Reuters",
    "CNBC",
    "MarketWatch",
    "Financial Times",
];

fn titles(category: NewsCategory) -> &'static [&'static str] {
    match category {
        NewsCategory::Ai => &AI_TITLES,
        NewsCategory::Power => &POWER_TITLES,
        NewsCategory::Market => &MARKET_TITLES,
    }
}

fn summaries(category: NewsCategory) -> &'static [&'static str] {
    match category {
        NewsCategory::Ai => &AI_SUMMARIES,
        NewsCategory::Power => &POWER_SUMMARIES,
        NewsCategory::Market => &MARKET_SUMMARIES,
    }
}

fn curated(category: NewsCategory) -> &'static [CuratedItem] {
    match category {
        NewsCategory::Ai => &CURATED_AI,
        NewsCategory::Power => &CURATED_POWER,
        NewsCategory::Market => &CURATED_MARKET,
    }
}

/// Number of articles drawn per category for a randomized feed
pub fn random_article_count(category: NewsCategory) -> usize {
    match category {
        NewsCategory::Ai => 3,
        NewsCategory::Power | NewsCategory::Market => 2,
    }
}

/// News service backed by compiled-in pools
pub struct NewsDesk {
    rng: Arc<dyn RandomSource>,
    config: Arc<ReportConfig>,
}

impl NewsDesk {
    pub fn new(config: Arc<ReportConfig>, rng: Arc<dyn RandomSource>) -> Self {
        Self { rng, config }
    }

    /// The fixed editorial pool
    pub fn curated_feed() -> NewsFeed {
        NewsCategory::all()
            .into_iter()
            .map(|category| {
                let articles = curated(category)
                    .iter()
                    .map(|(title, summary, source)| {
                        NewsArticle::new(category, *title, *summary, *source)
                    })
                    .collect();
                (category, articles)
            })
            .collect()
    }

    /// Title, summary and source are independent uniform draws
    fn random_article(&self, category: NewsCategory) -> NewsArticle {
        let titles = titles(category);
        let summaries = summaries(category);

        let title = titles[self.rng.index(titles.len())];
        let summary = summaries[self.rng.index(summaries.len())];
        let source = SOURCES[self.rng.index(SOURCES.len())];

        NewsArticle::new(category, title, summary, source)
    }

    fn random_feed(&self) -> NewsFeed {
        NewsCategory::all()
            .into_iter()
            .map(|category| {
                let articles = (0..random_article_count(category))
                    .map(|_| self.random_article(category))
                    .collect();
                (category, articles)
            })
            .collect()
    }
}

#[async_trait]
impl NewsSource for NewsDesk {
    async fn fetch_curated_news(&self) -> Result<NewsFeed> {
        simulate_latency(self.config.news_latency).await;
        Ok(Self::curated_feed())
    }

    async fn fetch_random_news(&self) -> Result<NewsFeed> {
        simulate_latency(self.config.news_latency).await;
        let feed = self.random_feed();
        tracing::debug!(
            articles = feed.values().map(Vec::len).sum::<usize>(),
            "sampled random news"
        );
        Ok(feed)
    }
}
