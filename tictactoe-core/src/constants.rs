//! 规则常量定义

/// 空格子
pub const EMPTY: i32 = 0;

/// 棋盘最小边长
pub const MIN_SIZE: usize = 3;

/// 获胜所需最少连子数
pub const MIN_WIN_LENGTH: usize = 3;

/// 默认棋盘边长
pub const DEFAULT_SIZE: usize = 3;

/// 默认获胜连子数
pub const DEFAULT_WIN_LENGTH: usize = 3;

/// 默认己方符号
pub const DEFAULT_MINE_SYMBOL: i32 = 1;

/// 默认对方符号
pub const DEFAULT_OPPONENT_SYMBOL: i32 = -1;

/// 编码键中空格子的字节
pub const KEY_EMPTY: u8 = 0;

/// 编码键中己方棋子的字节
pub const KEY_MINE: u8 = 1;

/// 编码键中对方棋子的字节
pub const KEY_OPPONENT: u8 = 2;
