//! Report rendering
//!
//! Both output forms are projections of a single [`ReportView`]. The view
//! holds every figure already formatted, so the HTML page and the Markdown
//! export cannot disagree on rounding or ordering.

pub mod html;
pub mod markdown;

pub use html::render_html;
pub use markdown::{export_filename, render_markdown};

use serde::Serialize;

use crate::analysis::{Mover, ReportAnalysis, SummaryItem, TrendLabel};
use crate::format;
use crate::model::{NewsCategory, Quote, Snapshot};
use crate::sources::is_market_open_on;
use crate::universe::{MarketIndex, SectorGroup};

pub const REPORT_TITLE: &str = "Daily Market Report";

/// One row of the index table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexRow {
    pub name: String,
    pub current: String,
    pub emoji: &'static str,
    pub change: String,
    pub change_pct: String,
    pub class: &'static str,
}

impl IndexRow {
    fn from_quote(quote: &Quote) -> Self {
        Self {
            name: quote.name.clone(),
            current: format::number(quote.current),
            emoji: format::change_emoji(quote.change),
            change: format::signed(quote.change),
            change_pct: format::opt_signed_pct(quote.change_pct),
            class: format::change_class(Some(quote.change)),
        }
    }
}

/// One row of a sector stock table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    pub ticker: String,
    pub name: String,
    pub price: String,
    pub change_pct: String,
    pub class: &'static str,
    pub rsi: String,
    pub trend: &'static str,
}

impl StockRow {
    fn from_quote(ticker: &str, quote: &Quote) -> Option<Self> {
        let change_pct = quote.change_pct?;
        let (rsi, trend) = match quote.rsi {
            Some(rsi) => (format::rsi(rsi), TrendLabel::from_rsi(rsi).label()),
            None => (format::NOT_AVAILABLE.to_string(), format::NOT_AVAILABLE),
        };

        Some(Self {
            ticker: ticker.to_string(),
            name: quote.name.clone(),
            price: format::price(quote.current),
            change_pct: format::signed_pct(change_pct),
            class: format::change_class(Some(change_pct)),
            rsi,
            trend,
        })
    }
}

/// `label: value` line of a sector analysis list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisLine {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorView {
    pub key: &'static str,
    pub heading: String,
    pub icon: &'static str,
    pub rows: Vec<StockRow>,
    pub analysis: Vec<AnalysisLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentView {
    pub score: u8,
    pub label: &'static str,
    pub css_class: String,
    pub volatility: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    pub number: usize,
    pub title: String,
    pub summary: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsSection {
    pub key: &'static str,
    pub title: &'static str,
    pub articles: Vec<ArticleView>,
}

/// Fully formatted, render-ready projection of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub title: &'static str,
    pub date: String,
    pub time: String,
    pub generated_at: String,
    pub market_open: bool,
    pub market_status: &'static str,
    pub indices: Vec<IndexRow>,
    pub sentiment: SentimentView,
    pub sectors: Vec<SectorView>,
    pub news: Vec<NewsSection>,
    pub summary: Vec<SummaryItem>,
}

impl ReportView {
    pub fn build(snapshot: &Snapshot) -> Self {
        let analysis = ReportAnalysis::derive(snapshot);
        let market_open = is_market_open_on(&snapshot.captured_at);

        let indices = MarketIndex::all()
            .into_iter()
            .filter_map(|index| snapshot.index(index))
            .map(IndexRow::from_quote)
            .collect();

        let sentiment = SentimentView {
            score: snapshot.sentiment.score,
            label: snapshot.sentiment.level.label(),
            css_class: format!("level-{}", snapshot.sentiment.level.slug()),
            volatility: format::number(snapshot.volatility.current),
        };

        let sectors = SectorGroup::all()
            .into_iter()
            .map(|group| sector_view(snapshot, &analysis, group))
            .collect();

        let news = NewsCategory::all()
            .into_iter()
            .map(|category| NewsSection {
                key: category.key(),
                title: category.title(),
                articles: snapshot
                    .news_for(category)
                    .iter()
                    .enumerate()
                    .map(|(i, article)| ArticleView {
                        number: i + 1,
                        title: article.title.clone(),
                        summary: article.summary_or_title().to_string(),
                        source: article.source.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: REPORT_TITLE,
            date: format::report_date(&snapshot.captured_at),
            time: format::clock_time(&snapshot.captured_at),
            generated_at: format::timestamp(&snapshot.captured_at),
            market_open,
            market_status: if market_open { "🟢 Open" } else { "⚪ Closed" },
            indices,
            sentiment,
            sectors,
            news,
            summary: analysis.summary,
        }
    }

    pub fn sector(&self, key: &str) -> Option<&SectorView> {
        self.sectors.iter().find(|s| s.key == key)
    }

    pub fn news_section(&self, category: NewsCategory) -> Option<&NewsSection> {
        self.news.iter().find(|s| s.key == category.key())
    }
}

fn mover_line(mover: &Mover) -> String {
    format!("{} ({})", mover.symbol, format::signed_pct(mover.change_pct))
}

fn sector_view(snapshot: &Snapshot, analysis: &ReportAnalysis, group: SectorGroup) -> SectorView {
    // Row order follows the fixed ticker list, not the map
    let rows: Vec<StockRow> = snapshot
        .sector(group)
        .map(|quotes| {
            group
                .tickers()
                .iter()
                .filter_map(|ticker| {
                    let quote = quotes.get(ticker)?;
                    StockRow::from_quote(ticker, quote)
                })
                .collect()
        })
        .unwrap_or_default();

    let mut lines = Vec::new();
    if let Some(sector) = analysis.sector(group) {
        if let Some(average) = sector.average {
            lines.push(AnalysisLine {
                label: "Average change",
                value: format::signed_pct(average),
            });
        }
        if let Some(extremes) = &sector.extremes {
            lines.push(AnalysisLine {
                label: "Strongest",
                value: mover_line(&extremes.best),
            });
            lines.push(AnalysisLine {
                label: "Weakest",
                value: mover_line(&extremes.worst),
            });
        }
    }

    let icon = match group {
        SectorGroup::Ai => "🤖",
        SectorGroup::Power => "⚡",
    };

    SectorView {
        key: group.key(),
        heading: format!("{} Sector Analysis", group.name()),
        icon,
        rows,
        analysis: lines,
    }
}
