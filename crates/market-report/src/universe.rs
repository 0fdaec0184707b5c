//! Compiled-in market universe: tracked indices, sector groups and base values

use serde::{Deserialize, Serialize};

/// Base price for stocks missing from the universe
pub const DEFAULT_STOCK_BASE: f64 = 100.0;

/// Base level for indices missing from the universe
pub const DEFAULT_INDEX_BASE: f64 = 1000.0;

/// Half-width of the daily change range for stocks, in percent
pub const STOCK_CHANGE_RANGE_PCT: f64 = 3.0;

/// Half-width of the daily change range for equity indices, in percent
pub const INDEX_CHANGE_RANGE_PCT: f64 = 1.0;

/// Half-width of the daily change range for the volatility index, in percent
pub const VOLATILITY_CHANGE_RANGE_PCT: f64 = 5.0;

/// Market indices tracked by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketIndex {
    Sp500,
    Nasdaq,
    DowJones,
    Vix,
}

impl MarketIndex {
    /// Yahoo-style symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            MarketIndex::Sp500 => "^GSPC",
            MarketIndex::Nasdaq => "^IXIC",
            MarketIndex::DowJones => "^DJI",
            MarketIndex::Vix => "^VIX",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            MarketIndex::Sp500 => "S&P 500",
            MarketIndex::Nasdaq => "Nasdaq",
            MarketIndex::DowJones => "Dow Jones",
            MarketIndex::Vix => "VIX",
        }
    }

    /// Reference level the simulated change is applied to
    pub fn base_level(&self) -> f64 {
        match self {
            MarketIndex::Sp500 => 5800.0,
            MarketIndex::Nasdaq => 17500.0,
            MarketIndex::DowJones => 42000.0,
            MarketIndex::Vix => 18.5,
        }
    }

    /// Half-width of the simulated daily change, in percent
    pub fn change_range_pct(&self) -> f64 {
        match self {
            MarketIndex::Vix => VOLATILITY_CHANGE_RANGE_PCT,
            _ => INDEX_CHANGE_RANGE_PCT,
        }
    }

    /// All indices in display order: primary, tech, industrial, volatility
    pub fn all() -> [MarketIndex; 4] {
        [
            MarketIndex::Sp500,
            MarketIndex::Nasdaq,
            MarketIndex::DowJones,
            MarketIndex::Vix,
        ]
    }

    /// Look an index up by symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|index| index.symbol() == symbol)
    }
}

/// Named groups of tickers analyzed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorGroup {
    Ai,
    Power,
}

impl SectorGroup {
    pub fn key(&self) -> &'static str {
        match self {
            SectorGroup::Ai => "ai",
            SectorGroup::Power => "power",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SectorGroup::Ai => "AI",
            SectorGroup::Power => "Power",
        }
    }

    /// Tickers in table order
    pub fn tickers(&self) -> &'static [&'static str] {
        match self {
            SectorGroup::Ai => &["NVDA", "MSFT", "GOOGL", "AMD", "TSLA", "TSM"],
            SectorGroup::Power => &["CEG", "VST"],
        }
    }

    /// All groups in report order
    pub fn all() -> [SectorGroup; 2] {
        [SectorGroup::Ai, SectorGroup::Power]
    }
}

/// Static description of a tracked stock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockInfo {
    pub ticker: &'static str,
    pub name: &'static str,
    pub base_price: f64,
}

const fn stock(ticker: &'static str, name: &'static str, base_price: f64) -> StockInfo {
    StockInfo {
        ticker,
        name,
        base_price,
    }
}

const STOCKS: [StockInfo; 8] = [
    stock("NVDA", "NVIDIA", 140.50),
    stock("MSFT", "Microsoft", 420.80),
    stock("GOOGL", "Alphabet", 175.30),
    stock("AMD", "AMD", 165.20),
    stock("TSLA", "Tesla", 250.60),
    stock("TSM", "TSMC", 145.90),
    stock("CEG", "Constellation Energy", 185.40),
    stock("VST", "Vistra", 95.30),
];

/// Look up a tracked stock
pub fn stock_info(ticker: &str) -> Option<&'static StockInfo> {
    STOCKS.iter().find(|s| s.ticker == ticker)
}

/// Display name for a stock, the ticker itself when unknown
pub fn stock_name(ticker: &str) -> String {
    stock_info(ticker).map_or(ticker, |s| s.name).to_string()
}

/// Reference price for a stock
pub fn stock_base_price(ticker: &str) -> f64 {
    stock_info(ticker).map_or(DEFAULT_STOCK_BASE, |s| s.base_price)
}

/// Display name for an index, the symbol itself when unknown
pub fn index_name(symbol: &str) -> String {
    MarketIndex::from_symbol(symbol)
        .map_or(symbol, |i| i.name())
        .to_string()
}

/// Reference level for an index
pub fn index_base_level(symbol: &str) -> f64 {
    MarketIndex::from_symbol(symbol)
        .map_or(DEFAULT_INDEX_BASE, |i| i.base_level())
}

/// Half-width of the simulated daily change for an index symbol
pub fn index_change_range(symbol: &str) -> f64 {
    MarketIndex::from_symbol(symbol)
        .map_or(INDEX_CHANGE_RANGE_PCT, |i| i.change_range_pct())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_symbols() {
        assert_eq!(MarketIndex::Sp500.symbol(), "^GSPC");
        assert_eq!(MarketIndex::from_symbol("^VIX"), Some(MarketIndex::Vix));
        assert_eq!(MarketIndex::from_symbol("^FTSE"), None);
    }

    #[test]
    fn test_index_display_order() {
        let order: Vec<_> = MarketIndex::all().iter().map(|i| i.symbol()).collect();
        assert_eq!(order, vec!["^GSPC", "^IXIC", "^DJI", "^VIX"]);
    }

    #[test]
    fn test_unknown_symbols_fall_back() {
        assert_eq!(stock_base_price("ZZZZ"), DEFAULT_STOCK_BASE);
        assert_eq!(stock_name("ZZZZ"), "ZZZZ");
        assert_eq!(index_base_level("^FTSE"), DEFAULT_INDEX_BASE);
        assert_eq!(index_change_range("^FTSE"), INDEX_CHANGE_RANGE_PCT);
    }

    #[test]
    fn test_volatility_range_is_wider() {
        assert_eq!(index_change_range("^VIX"), 5.0);
        assert_eq!(index_change_range("^GSPC"), 1.0);
    }

    #[test]
    fn test_every_group_ticker_is_known() {
        for group in SectorGroup::all() {
            for ticker in group.tickers() {
                assert!(stock_info(ticker).is_some(), "{ticker} missing");
            }
        }
    }
}
