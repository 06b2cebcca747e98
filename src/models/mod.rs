pub mod trade;

pub use trade::{parse_trades_json, TradeOutcome, TradeRecord, Verdict};
