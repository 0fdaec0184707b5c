//! Derived figures and narrative text computed from a snapshot
//!
//! Everything here is a pure function of its inputs. Rendering code calls
//! [`ReportAnalysis::derive`] once per snapshot and shares the result between
//! the HTML and Markdown outputs.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::format::signed_pct;
use crate::model::{QuoteMap, SentimentLevel, Snapshot};
use crate::universe::{MarketIndex, SectorGroup};

/// RSI above this is overbought
pub const OVERBOUGHT_RSI: f64 = 70.0;
/// RSI below this is oversold
pub const OVERSOLD_RSI: f64 = 30.0;
/// Average change beyond +/- this many percent is a strong or weak sector day
pub const SECTOR_MOVE_THRESHOLD_PCT: f64 = 1.0;

/// Mean change percent over quotes that carry one
pub fn sector_average(quotes: &QuoteMap) -> Option<f64> {
    let changes: Vec<f64> = quotes.iter().filter_map(|q| q.change_pct).collect();
    if changes.is_empty() {
        return None;
    }
    Some(changes.iter().sum::<f64>() / changes.len() as f64)
}

/// A ticker with its change percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mover {
    pub symbol: String,
    pub change_pct: f64,
}

/// Strongest and weakest members of a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorExtremes {
    pub best: Mover,
    pub worst: Mover,
}

/// Best and worst performers by change percent.
///
/// Ties keep the first maximal (or minimal) element under entry order.
pub fn sector_extremes(quotes: &QuoteMap) -> Option<SectorExtremes> {
    let mut valid = quotes
        .iter()
        .filter_map(|q| q.change_pct.map(|pct| (q.symbol.as_str(), pct)));

    let (symbol, pct) = valid.next()?;
    let mut best = (symbol, pct);
    let mut worst = (symbol, pct);

    for (symbol, pct) in valid {
        if pct > best.1 {
            best = (symbol, pct);
        }
        if pct < worst.1 {
            worst = (symbol, pct);
        }
    }

    Some(SectorExtremes {
        best: Mover {
            symbol: best.0.to_string(),
            change_pct: best.1,
        },
        worst: Mover {
            symbol: worst.0.to_string(),
            change_pct: worst.1,
        },
    })
}

/// RSI-based trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Overbought,
    Oversold,
    Neutral,
}

impl TrendLabel {
    pub fn from_rsi(rsi: f64) -> Self {
        if rsi > OVERBOUGHT_RSI {
            TrendLabel::Overbought
        } else if rsi < OVERSOLD_RSI {
            TrendLabel::Oversold
        } else {
            TrendLabel::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendLabel::Overbought => "Overbought",
            TrendLabel::Oversold => "Oversold",
            TrendLabel::Neutral => "Neutral",
        }
    }
}

/// Human readable reading of a sentiment score
pub fn sentiment_narrative(score: u8) -> String {
    let level = SentimentLevel::from_score(score);
    let comment = match level {
        SentimentLevel::ExtremeGreed => "beware of short-term pullback risk",
        SentimentLevel::Greed => "optimism is running high",
        SentimentLevel::Neutral => "consider waiting or buying on dips",
        SentimentLevel::Fear => "oversold opportunities may exist",
        SentimentLevel::ExtremeFear => "a contrarian window may be opening",
    };
    format!("{} ({score}), {comment}", level.label())
}

/// Joint direction of the two headline indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketDirection {
    UpTogether,
    DownTogether,
    Diverging,
}

impl MarketDirection {
    pub fn classify(primary_change: f64, secondary_change: f64) -> Self {
        if primary_change > 0.0 && secondary_change > 0.0 {
            MarketDirection::UpTogether
        } else if primary_change < 0.0 && secondary_change < 0.0 {
            MarketDirection::DownTogether
        } else {
            MarketDirection::Diverging
        }
    }
}

fn index_move(index: MarketIndex, change: f64) -> String {
    format!("{} ({})", index.name(), signed_pct(change))
}

/// Narrative over the S&P 500 and Nasdaq change percents
pub fn market_direction_narrative(primary_change: f64, secondary_change: f64) -> String {
    let primary = index_move(MarketIndex::Sp500, primary_change);
    let secondary = index_move(MarketIndex::Nasdaq, secondary_change);

    match MarketDirection::classify(primary_change, secondary_change) {
        MarketDirection::UpTogether => {
            format!("Broad rally, {primary} and {secondary} moved up together")
        }
        MarketDirection::DownTogether => {
            format!("Broad sell-off, {primary} and {secondary} moved down together")
        }
        MarketDirection::Diverging => format!("Indices diverging, {primary} vs {secondary}"),
    }
}

/// Strength of a sector day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorTrend {
    Strong,
    Weak,
    Flat,
}

impl SectorTrend {
    pub fn classify(average_change: f64) -> Self {
        if average_change > SECTOR_MOVE_THRESHOLD_PCT {
            SectorTrend::Strong
        } else if average_change < -SECTOR_MOVE_THRESHOLD_PCT {
            SectorTrend::Weak
        } else {
            SectorTrend::Flat
        }
    }
}

/// Narrative over a group's average change; wording differs per group
pub fn sector_narrative(group: SectorGroup, average_change: f64) -> String {
    let avg = signed_pct(average_change);

    match (group, SectorTrend::classify(average_change)) {
        (SectorGroup::Ai, SectorTrend::Strong) => {
            format!("strong session, average gain {avg}, AI infrastructure demand drives the group")
        }
        (SectorGroup::Ai, SectorTrend::Weak) => {
            format!("pulling back, average change {avg}, watch how support levels hold")
        }
        (SectorGroup::Ai, SectorTrend::Flat) => {
            format!("range-bound, average change {avg}, waiting for a direction")
        }
        (SectorGroup::Power, SectorTrend::Strong) => {
            format!("active session, average gain {avg}, lifted by data center power demand")
        }
        (SectorGroup::Power, SectorTrend::Weak) => format!("retreating, average change {avg}"),
        (SectorGroup::Power, SectorTrend::Flat) => format!("steady, average change {avg}"),
    }
}

/// Aggregates for one sector group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAnalysis {
    pub average: Option<f64>,
    pub extremes: Option<SectorExtremes>,
}

impl SectorAnalysis {
    pub fn of(quotes: &QuoteMap) -> Self {
        Self {
            average: sector_average(quotes),
            extremes: sector_extremes(quotes),
        }
    }
}

/// One line of the closing summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub heading: String,
    pub text: String,
}

impl SummaryItem {
    fn new(heading: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            text: text.into(),
        }
    }

    /// `heading: text`
    pub fn plain(&self) -> String {
        format!("{}: {}", self.heading, self.text)
    }
}

/// All derived values of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportAnalysis {
    pub sectors: BTreeMap<SectorGroup, SectorAnalysis>,
    pub summary: Vec<SummaryItem>,
}

impl ReportAnalysis {
    pub fn derive(snapshot: &Snapshot) -> Self {
        let empty = QuoteMap::new();
        let sectors: BTreeMap<_, _> = SectorGroup::all()
            .into_iter()
            .map(|group| {
                let quotes = snapshot.sector(group).unwrap_or(&empty);
                (group, SectorAnalysis::of(quotes))
            })
            .collect();

        let mut summary = vec![SummaryItem::new(
            "Market Sentiment",
            sentiment_narrative(snapshot.sentiment.score),
        )];

        let change_of = |index| snapshot.index(index).and_then(|q| q.change_pct);
        let spx = change_of(MarketIndex::Sp500);
        let nasdaq = change_of(MarketIndex::Nasdaq);
        if let (Some(spx), Some(nasdaq)) = (spx, nasdaq) {
            summary.push(SummaryItem::new(
                "Market Direction",
                market_direction_narrative(spx, nasdaq),
            ));
        }

        for (group, analysis) in &sectors {
            if let Some(average) = analysis.average {
                summary.push(SummaryItem::new(
                    format!("{} Sector", group.name()),
                    sector_narrative(*group, average),
                ));
            }
        }

        Self { sectors, summary }
    }

    pub fn sector(&self, group: SectorGroup) -> Option<&SectorAnalysis> {
        self.sectors.get(&group)
    }
}
