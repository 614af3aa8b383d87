//! 广义井字棋 AI 引擎
//!
//! 包含:
//! - Minimax + Alpha-Beta 搜索
//! - 随深度衰减的终局分值
//! - 深度上限处的评估器
//! - 置换表

mod evaluate;
mod search;
mod transposition;

pub use evaluate::{DrawEvaluator, Evaluator, ThreatEvaluator};
pub use search::{MinimaxEngine, SearchConfig, SearchOutcome};
pub use transposition::{CacheEntry, CacheStats, TranspositionCache};
