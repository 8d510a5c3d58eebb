//! Parses the free-text memo of an inbound transaction into a tagged
//! intent. Parsing is string-only, deterministic, and deliberately
//! strict: anything that doesn't match the closed grammar is an
//! `invalid memo` error, which the caller turns into a refund.

use std::str::FromStr;

use thorcore_types::{Address, Asset, ThorError, TxId, Uint};

/// One parsed memo variant, tagged by the action it names (colon-separated,
/// case-insensitive prefix grammar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memo {
    Create { asset: Asset },
    Stake { asset: Asset, dest: Option<Address> },
    Withdraw { asset: Asset, basis_points: u64 },
    Swap { asset: Asset, dest: Option<Address>, limit: Option<Uint> },
    Add { asset: Asset },
    Gas,
    Refund { tx_id: TxId },
    Outbound { tx_id: TxId },
    Bond { node_address: Address },
    Leave,
    YggdrasilFund,
    YggdrasilReturn,
    Reserve
}

const DEFAULT_WITHDRAW_BASIS_POINTS: u64 = 10_000;

pub fn parse_memo(memo: &str) -> Result<Memo, ThorError> {
    let parts: Vec<&str> = memo.split(':').collect();
    let head = parts.first().copied().unwrap_or("").to_uppercase();

    match head.as_str() {
        "CREATE" => {
            let asset = parse_asset_field(&parts, 1)?;
            Ok(Memo::Create { asset })
        }
        "STAKE" => {
            let asset = parse_asset_field(&parts, 1)?;
            let dest = parts.get(2).filter(|s| !s.is_empty()).map(|s| Address::new(*s));
            Ok(Memo::Stake { asset, dest })
        }
        "WITHDRAW" => {
            let asset = parse_asset_field(&parts, 1)?;
            let basis_points = match parts.get(2).filter(|s| !s.is_empty()) {
                Some(s) => s
                    .parse::<u64>()
                    .map_err(|_| ThorError::InvalidMemo(format!("bad withdraw basis points: {s}")))?,
                None => DEFAULT_WITHDRAW_BASIS_POINTS
            };
            if basis_points == 0 || basis_points > 10_000 {
                return Err(ThorError::InvalidMemo(format!("withdraw basis points out of range: {basis_points}")));
            }
            Ok(Memo::Withdraw { asset, basis_points })
        }
        "SWAP" => {
            let asset = parse_asset_field(&parts, 1)?;
            let dest = parts.get(2).filter(|s| !s.is_empty()).map(|s| Address::new(*s));
            let limit = match parts.get(3).filter(|s| !s.is_empty()) {
                Some(s) => Some(Uint::from_str(s).map_err(|_| ThorError::InvalidMemo(format!("bad trade limit: {s}")))?),
                None => None
            };
            Ok(Memo::Swap { asset, dest, limit })
        }
        "ADD" => {
            let asset = parse_asset_field(&parts, 1)?;
            Ok(Memo::Add { asset })
        }
        "GAS" => Ok(Memo::Gas),
        "REFUND" => {
            let tx_id = parts.get(1).filter(|s| !s.is_empty()).map(|s| TxId::new(*s));
            tx_id.map(|tx_id| Memo::Refund { tx_id }).ok_or_else(|| ThorError::InvalidMemo("refund memo missing tx id".into()))
        }
        "OUTBOUND" => {
            let tx_id = parts.get(1).filter(|s| !s.is_empty()).map(|s| TxId::new(*s));
            tx_id.map(|tx_id| Memo::Outbound { tx_id }).ok_or_else(|| ThorError::InvalidMemo("outbound memo missing tx id".into()))
        }
        "BOND" => {
            let node_address = parts
                .get(1)
                .filter(|s| !s.is_empty())
                .map(|s| Address::new(*s))
                .ok_or_else(|| ThorError::InvalidMemo("bond memo missing node address".into()))?;
            Ok(Memo::Bond { node_address })
        }
        "LEAVE" => Ok(Memo::Leave),
        "YGGDRASIL+" => Ok(Memo::YggdrasilFund),
        "YGGDRASIL-" => Ok(Memo::YggdrasilReturn),
        "RESERVE" => Ok(Memo::Reserve),
        _ => Err(ThorError::InvalidMemo(format!("unrecognized memo: {memo}")))
    }
}

fn parse_asset_field(parts: &[&str], idx: usize) -> Result<Asset, ThorError> {
    let raw = parts
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ThorError::InvalidMemo("memo missing asset".into()))?;
    Asset::parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_swap_with_dest_and_limit() {
        let memo = parse_memo("SWAP:BNB.RUNE:bnb1abc:100").unwrap();
        assert_eq!(
            memo,
            Memo::Swap {
                asset: Asset::parse("BNB.RUNE").unwrap(),
                dest: Some(Address::new("bnb1abc")),
                limit: Some(Uint::new(100))
            }
        );
    }

    #[test]
    fn swap_is_case_insensitive_on_keyword() {
        assert!(matches!(parse_memo("swap:bnb.bnb").unwrap(), Memo::Swap { .. }));
    }

    #[test]
    fn withdraw_defaults_basis_points_to_full() {
        let memo = parse_memo("WITHDRAW:BNB.BNB").unwrap();
        assert_eq!(memo, Memo::Withdraw { asset: Asset::parse("BNB.BNB").unwrap(), basis_points: 10_000 });
    }

    #[test]
    fn withdraw_rejects_out_of_range_basis_points() {
        assert!(parse_memo("WITHDRAW:BNB.BNB:20000").is_err());
        assert!(parse_memo("WITHDRAW:BNB.BNB:0").is_err());
    }

    #[test]
    fn gas_leave_and_yggdrasil_take_no_arguments() {
        assert_eq!(parse_memo("GAS").unwrap(), Memo::Gas);
        assert_eq!(parse_memo("LEAVE").unwrap(), Memo::Leave);
        assert_eq!(parse_memo("YGGDRASIL+").unwrap(), Memo::YggdrasilFund);
        assert_eq!(parse_memo("YGGDRASIL-").unwrap(), Memo::YggdrasilReturn);
    }

    #[test]
    fn unrecognized_memo_is_rejected() {
        assert!(parse_memo("SWAPZ").is_err());
        assert!(parse_memo("").is_err());
    }

    #[test]
    fn refund_and_outbound_require_tx_id() {
        assert!(parse_memo("REFUND").is_err());
        assert_eq!(parse_memo("REFUND:ABC123").unwrap(), Memo::Refund { tx_id: TxId::new("ABC123") });
        assert_eq!(parse_memo("OUTBOUND:ABC123").unwrap(), Memo::Outbound { tx_id: TxId::new("ABC123") });
    }
}
