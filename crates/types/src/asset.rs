use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ThorError;

/// Historical RUNE tickers. `RUNE` is the current native ticker; the
/// `-SUFFIX` forms are migration artifacts from earlier chains that
/// `is_rune` must still recognize.
const RUNE_TICKERS: &[&str] = &["RUNE", "RUNE-A1F", "RUNE-B1A"];

pub const THOR_CHAIN: &str = "THOR";
pub const BNB_CHAIN: &str = "BNB";
pub const BTC_CHAIN: &str = "BTC";
pub const ETH_CHAIN: &str = "ETH";

/// An external (or native) chain identifier. Free-form but normalized to
/// uppercase; the network only needs to compare these for equality and
/// format them, never to interpret chain-specific semantics (that lives
/// in out-of-scope client shims).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chain(String);

impl Chain {
    pub fn new(s: impl AsRef<str>) -> Self {
        Chain(s.as_ref().to_uppercase())
    }

    pub fn thor() -> Self {
        Chain::new(THOR_CHAIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `Asset` is a triple of (chain, symbol, ticker). `ticker` is always
/// derived from `symbol` by stripping a trailing `-SUFFIX`; it is never
/// set independently.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub chain: Chain,
    pub symbol: String,
    pub ticker: String
}

impl Asset {
    /// Parse `CHAIN.SYMBOL` or bare `SYMBOL` (chain defaults to the native
    /// chain). Case-insensitive; canonical form is always uppercase.
    pub fn parse(s: &str) -> Result<Asset, ThorError> {
        if s.trim().is_empty() {
            return Err(ThorError::InvalidMemo("empty asset".into()));
        }
        let upper = s.to_uppercase();
        let (chain, symbol) = match upper.split_once('.') {
            Some((chain, symbol)) if !chain.is_empty() && !symbol.is_empty() => {
                (Chain::new(chain), symbol.to_string())
            }
            _ => (Chain::thor(), upper)
        };
        let ticker = symbol
            .split_once('-')
            .map(|(t, _)| t.to_string())
            .unwrap_or_else(|| symbol.clone());
        Ok(Asset { chain, symbol, ticker })
    }

    pub fn rune() -> Asset {
        Asset { chain: Chain::thor(), symbol: "RUNE".into(), ticker: "RUNE".into() }
    }

    /// `IsRune` - true for the native ticker and every historical alias.
    pub fn is_rune(&self) -> bool {
        RUNE_TICKERS.iter().any(|t| *t == self.ticker)
    }

    pub fn is_bnb(&self) -> bool {
        self.chain.as_str() == BNB_CHAIN
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chain, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chain_dot_symbol() {
        let a = Asset::parse("bnb.rune-a1f").unwrap();
        assert!(a.is_rune());
        assert_eq!(a.to_string(), "BNB.RUNE-A1F");
        assert_eq!(a.chain, Chain::new("BNB"));
        assert_eq!(a.ticker, "RUNE");
    }

    #[test]
    fn parses_bare_symbol_as_native_chain() {
        let a = Asset::parse("rune").unwrap();
        assert_eq!(a, Asset::rune());
    }

    #[test]
    fn strips_trailing_suffix_for_ticker() {
        let a = Asset::parse("eth.knc").unwrap();
        assert_eq!(a.chain, Chain::new("ETH"));
        assert_eq!(a.ticker, "KNC");
        assert!(!a.is_rune());
    }

    #[test]
    fn rejects_empty_asset() {
        assert!(Asset::parse("").is_err());
    }
}
