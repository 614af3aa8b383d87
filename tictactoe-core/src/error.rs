//! 错误类型定义

use thiserror::Error;

/// 规则配置错误（构造时立即失败，不可恢复）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 棋盘太小
    #[error("Invalid board size: {size} (min: {min})")]
    InvalidSize { size: usize, min: usize },

    /// 连子数超出范围
    #[error("Invalid win length: {win_length} (must be between {min} and {size})")]
    InvalidWinLength {
        win_length: usize,
        min: usize,
        size: usize,
    },

    /// 符号不能为 0（0 表示空格）
    #[error("Player symbol cannot be 0")]
    ZeroSymbol,

    /// 双方符号相同
    #[error("Player symbols must differ, both are {symbol}")]
    SameSymbols { symbol: i32 },

    /// 搜索深度上限必须至少为 1
    #[error("Invalid max depth: {depth} (must be at least 1)")]
    InvalidMaxDepth { depth: u32 },
}

/// 对局与搜索错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 目标格子已被占用
    #[error("Invalid action: cell {action} is already occupied")]
    InvalidAction { action: usize },

    /// 动作超出棋盘范围
    #[error("Action {action} is out of range (board has {cells} cells)")]
    ActionOutOfRange { action: usize, cells: usize },

    /// 终局或满盘时请求搜索
    #[error("No legal move: the board is already terminal")]
    NoLegalMove,

    /// 初始棋盘不合法
    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// 无效的棋盘记谱
    #[error("Invalid notation: {reason}")]
    InvalidNotation { reason: String },

    /// 棋盘规则与引擎配置不一致
    #[error("Board rules do not match the engine configuration")]
    RulesMismatch,

    /// 规则配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// 对局操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
