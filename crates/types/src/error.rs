use thiserror::Error;

/// Stable error codespace, starting at 101. Codes are part of the
/// external interface: indexers and front-ends match on them, so they
/// must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    pub const BAD_VERSION: ErrorCode = ErrorCode(101);
    pub const INVALID_MESSAGE: ErrorCode = ErrorCode(102);
    pub const CONSTANTS_NOT_AVAILABLE: ErrorCode = ErrorCode(103);
    pub const INVALID_VAULT: ErrorCode = ErrorCode(104);
    pub const INVALID_MEMO: ErrorCode = ErrorCode(105);
    pub const VALIDATION_ERROR: ErrorCode = ErrorCode(106);
    pub const INVALID_POOL_STATUS: ErrorCode = ErrorCode(107);

    pub const SWAP_FAIL: ErrorCode = ErrorCode(108);
    pub const SWAP_FAIL_TRADE_TARGET: ErrorCode = ErrorCode(109);
    pub const SWAP_FAIL_NOT_ENOUGH_FEE: ErrorCode = ErrorCode(110);
    pub const SWAP_FAIL_ZERO_EMIT_ASSET: ErrorCode = ErrorCode(111);
    pub const SWAP_FAIL_POOL_NOT_EXIST: ErrorCode = ErrorCode(112);
    pub const SWAP_FAIL_INVALID_AMOUNT: ErrorCode = ErrorCode(113);
    pub const SWAP_FAIL_INVALID_BALANCE: ErrorCode = ErrorCode(114);
    pub const SWAP_FAIL_NOT_ENOUGH_BALANCE: ErrorCode = ErrorCode(115);

    pub const STAKE_FAIL_VALIDATION: ErrorCode = ErrorCode(120);
    pub const STAKE_FAIL_GET_POOL_STAKER: ErrorCode = ErrorCode(122);
    pub const STAKE_MISMATCH_ASSET_ADDR: ErrorCode = ErrorCode(123);
    pub const STAKE_INVALID_POOL_ASSET: ErrorCode = ErrorCode(124);
    pub const STAKE_RUNE_OVER_LIMIT: ErrorCode = ErrorCode(125);
    pub const STAKE_RUNE_MORE_THAN_BOND: ErrorCode = ErrorCode(126);

    pub const UNSTAKE_FAIL_VALIDATION: ErrorCode = ErrorCode(130);
    pub const FAIL_ADD_OUTBOUND_TX: ErrorCode = ErrorCode(131);
    pub const FAIL_SAVE_EVENT: ErrorCode = ErrorCode(132);
    pub const POOL_STAKER_NOT_EXIST: ErrorCode = ErrorCode(133);
    pub const STAKER_POOL_NOT_EXIST: ErrorCode = ErrorCode(134);
    pub const NO_STAKE_UNIT_LEFT: ErrorCode = ErrorCode(135);
    pub const WITHDRAW_WITHIN_24_HOURS: ErrorCode = ErrorCode(136);
    pub const UNSTAKE_FAIL: ErrorCode = ErrorCode(137);
    pub const EMPTY_CHAIN: ErrorCode = ErrorCode(138);
}

/// Errors surfaced by the core. Every internal/kv error is wrapped with
/// store-key context at the point it's raised - none of these ever
/// unwind as a panic.
#[derive(Debug, Error)]
pub enum ThorError {
    #[error("bad version")]
    BadVersion,
    #[error("invalid message: {0}")]
    InvalidMessage(String),
    #[error("constant values not available for this version")]
    ConstantsNotAvailable,
    #[error("invalid vault: {0}")]
    InvalidVault(String),
    #[error("invalid memo: {0}")]
    InvalidMemo(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("pool {0} is in an invalid status for this operation")]
    InvalidPoolStatus(String),

    #[error("swap failed: {0}")]
    SwapFail(String),
    #[error("emitted amount less than trade target")]
    SwapFailTradeTarget,
    #[error("pool {0} doesn't exist")]
    SwapFailPoolNotExist(String),
    #[error("swap amount is invalid")]
    SwapFailInvalidAmount,
    #[error("invalid pool balance")]
    SwapFailInvalidBalance,
    #[error("not enough balance to emit swap output")]
    SwapFailNotEnoughBalance,
    #[error("emitted zero asset")]
    SwapFailZeroEmitAsset,

    #[error("stake validation failed: {0}")]
    StakeFailValidation(String),
    #[error("unable to determine the intended pool for this stake")]
    StakeInvalidPoolAsset,
    #[error("stake asset address mismatch")]
    StakeMismatchAssetAddr,

    #[error("unstake validation failed: {0}")]
    UnstakeFailValidation(String),
    #[error("staker has no units left in pool {0}")]
    NoStakeUnitLeft(String),

    #[error("kv-store error at key {key}: {source}")]
    KvStore { key: String, #[source] source: Box<ThorError> },
    #[error("decode failure at key {0}")]
    Decode(String),
}

impl ThorError {
    pub fn code(&self) -> ErrorCode {
        use ThorError::*;
        match self {
            BadVersion => ErrorCode::BAD_VERSION,
            InvalidMessage(_) => ErrorCode::INVALID_MESSAGE,
            ConstantsNotAvailable => ErrorCode::CONSTANTS_NOT_AVAILABLE,
            InvalidVault(_) => ErrorCode::INVALID_VAULT,
            InvalidMemo(_) => ErrorCode::INVALID_MEMO,
            Validation(_) => ErrorCode::VALIDATION_ERROR,
            InvalidPoolStatus(_) => ErrorCode::INVALID_POOL_STATUS,
            SwapFail(_) => ErrorCode::SWAP_FAIL,
            SwapFailTradeTarget => ErrorCode::SWAP_FAIL_TRADE_TARGET,
            SwapFailPoolNotExist(_) => ErrorCode::SWAP_FAIL_POOL_NOT_EXIST,
            SwapFailInvalidAmount => ErrorCode::SWAP_FAIL_INVALID_AMOUNT,
            SwapFailInvalidBalance => ErrorCode::SWAP_FAIL_INVALID_BALANCE,
            SwapFailNotEnoughBalance => ErrorCode::SWAP_FAIL_NOT_ENOUGH_BALANCE,
            SwapFailZeroEmitAsset => ErrorCode::SWAP_FAIL_ZERO_EMIT_ASSET,
            StakeFailValidation(_) => ErrorCode::STAKE_FAIL_VALIDATION,
            StakeInvalidPoolAsset => ErrorCode::STAKE_INVALID_POOL_ASSET,
            StakeMismatchAssetAddr => ErrorCode::STAKE_MISMATCH_ASSET_ADDR,
            UnstakeFailValidation(_) => ErrorCode::UNSTAKE_FAIL_VALIDATION,
            NoStakeUnitLeft(_) => ErrorCode::NO_STAKE_UNIT_LEFT,
            KvStore { .. } => ErrorCode::VALIDATION_ERROR,
            Decode(_) => ErrorCode::VALIDATION_ERROR
        }
    }

    pub fn kv(key: impl Into<String>, source: ThorError) -> ThorError {
        ThorError::KvStore { key: key.into(), source: Box::new(source) }
    }

    /// Strip internal wrapping down to the message a front-end would want
    /// to display.
    pub fn human_message(&self) -> String {
        self.to_string()
    }
}
