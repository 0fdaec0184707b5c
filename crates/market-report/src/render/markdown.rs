//! Markdown export

use crate::format;
use crate::model::{NewsCategory, Snapshot};

use super::{ReportView, SectorView};

const DISCLAIMER: &str =
    "*Disclaimer: this report is for reference only and is not investment advice.*";
const DATA_SOURCES: &str =
    "*Data sources: Yahoo Finance, CNN Fear & Greed Index, major financial media*";

const INDEX_HEADERS: [&str; 4] = ["Index", "Level", "Change", "Change %"];
const STOCK_HEADERS: [&str; 6] = ["Ticker", "Company", "Price", "Change", "RSI", "Trend"];

/// News category included in the export
const EXPORTED_NEWS: NewsCategory = NewsCategory::Ai;

/// `daily_report_YYYYMMDD.md` for the snapshot's capture date
pub fn export_filename(snapshot: &Snapshot) -> String {
    format!("daily_report_{}.md", format::file_date(&snapshot.captured_at))
}

/// Render a snapshot as a Markdown document
pub fn render_markdown(snapshot: &Snapshot) -> String {
    render_view(&ReportView::build(snapshot))
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut output = format!("| {} |\n", headers.join(" | "));
    let separator: Vec<String> = headers
        .iter()
        .map(|h| "-".repeat(h.chars().count().max(3)))
        .collect();
    output.push_str(&format!("|{}|\n", separator.join("|")));
    for row in rows {
        output.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    output
}

fn sector_section(sector: &SectorView) -> String {
    let mut md = format!("\n---\n\n## {} {}\n\n", sector.icon, sector.heading);
    md.push_str("### Key Stocks\n\n");

    let rows: Vec<Vec<String>> = sector
        .rows
        .iter()
        .map(|r| {
            vec![
                r.ticker.clone(),
                r.name.clone(),
                r.price.clone(),
                r.change_pct.clone(),
                r.rsi.clone(),
                r.trend.to_string(),
            ]
        })
        .collect();
    md.push_str(&table(&STOCK_HEADERS, &rows));

    if !sector.analysis.is_empty() {
        md.push('\n');
        for line in &sector.analysis {
            md.push_str(&format!("- **{}**: {}\n", line.label, line.value));
        }
    }

    md
}

pub(crate) fn render_view(view: &ReportView) -> String {
    let mut md = format!("# 📊 {}\n\n", view.title);
    md.push_str(&format!("**Report date**: {}  \n", view.date));
    md.push_str(&format!("**Generated at**: {}  \n", view.time));
    md.push_str(&format!("**Market status**: {}\n\n", view.market_status));
    md.push_str("---\n\n");

    md.push_str("## 📈 Market Overview\n\n");
    md.push_str("### Major Indices\n\n");
    let rows: Vec<Vec<String>> = view
        .indices
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.current.clone(),
                format!("{} {}", r.emoji, r.change),
                r.change_pct.clone(),
            ]
        })
        .collect();
    md.push_str(&table(&INDEX_HEADERS, &rows));

    md.push_str("\n### Sentiment Indicators\n\n");
    md.push_str(&format!(
        "- **CNN Fear & Greed Index**: {} ({})\n",
        view.sentiment.score, view.sentiment.label
    ));
    md.push_str(&format!(
        "- **VIX Volatility Index**: {}\n",
        view.sentiment.volatility
    ));

    for sector in &view.sectors {
        md.push_str(&sector_section(sector));
    }

    md.push_str("\n---\n\n## 📰 News Highlights\n\n");
    let exported = view.news_section(EXPORTED_NEWS);
    if let Some(section) = exported.filter(|s| !s.articles.is_empty()) {
        md.push_str(&format!("### {}\n\n", section.title));
        for article in &section.articles {
            md.push_str(&format!("**{}. {}**\n\n", article.number, article.title));
            md.push_str(&format!("> {}\n", article.summary));
            md.push_str(">\n");
            md.push_str(&format!("> *Source: {}*\n\n", article.source));
        }
    }

    md.push_str("---\n\n## 💡 Key Takeaways\n\n");
    for item in &view.summary {
        md.push_str(&format!("- {}\n", item.plain()));
    }

    md.push_str("\n---\n\n");
    md.push_str(DISCLAIMER);
    md.push('\n');
    md.push_str(DATA_SOURCES);
    md.push('\n');
    md.push_str(&format!("*Report generated at: {}*\n", view.generated_at));

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::fixture_snapshot;
    use crate::universe::SectorGroup;

    #[test]
    fn test_export_filename_uses_capture_date() {
        let name = export_filename(&fixture_snapshot());
        assert_eq!(name, "daily_report_20261016.md");
    }

    #[test]
    fn test_document_structure() {
        let md = render_markdown(&fixture_snapshot());

        let headings = [
            "# 📊 Daily Market Report",
            "**Report date**: 2026-10-16 Friday",
            "**Market status**: 🟢 Open",
            "## 📈 Market Overview",
            "### Major Indices",
            "### Sentiment Indicators",
            "## 🤖 AI Sector Analysis",
            "## ⚡ Power Sector Analysis",
            "## 📰 News Highlights",
            "## 💡 Key Takeaways",
            "*Disclaimer:",
            "*Report generated at: 2026-10-16 09:30:00*",
        ];
        let mut cursor = 0;
        for heading in headings {
            let offset = md[cursor..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing {heading}"));
            cursor += offset + heading.len();
        }
    }

    #[test]
    fn test_index_table_rows() {
        let md = render_markdown(&fixture_snapshot());
        assert!(md.contains("| Index | Level | Change | Change % |"));
        assert!(md.contains("| S&P 500 | 5,869.60 | 🟢 +69.60 | +1.20% |"));
        assert!(md.contains("- **CNN Fear & Greed Index**: 80 (Extreme Greed)"));
    }

    #[test]
    fn test_only_ai_news_is_exported() {
        let md = render_markdown(&fixture_snapshot());
        assert!(md.contains("### AI Sector"));
        assert!(md.contains("**1. Chip demand climbs**"));
        assert!(md.contains("> Orders rose sharply"));
        assert!(md.contains("> *Source: Reuters*"));
        assert!(md.contains("**2. Cloud spending grows**"));
        assert!(!md.contains("Yields steady"));
    }

    #[test]
    fn test_summary_is_plain_text() {
        let md = render_markdown(&fixture_snapshot());
        let sentiment = md
            .lines()
            .find(|l| l.starts_with("- Market Sentiment: "))
            .unwrap();
        assert!(sentiment.ends_with("Extreme Greed (80), beware of short-term pullback risk"));

        let direction = md
            .lines()
            .find(|l| l.starts_with("- Market Direction: "))
            .unwrap();
        assert!(direction.contains("Broad rally, S&P 500 (+1.20%) and Nasdaq (+0.80%)"));
        assert!(direction.ends_with("moved up together"));
        assert!(!md.contains("<strong>"));
    }

    #[test]
    fn test_empty_sector_renders_header_only() {
        let mut snapshot = fixture_snapshot();
        snapshot.sectors.remove(&SectorGroup::Power);

        let md = render_markdown(&snapshot);
        assert!(md.contains("## ⚡ Power Sector Analysis"));
        assert!(!md.contains("| CEG |"));
        assert!(!md.contains("- Power Sector:"));
    }
}
