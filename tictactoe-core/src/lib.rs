//! 广义 N×N 井字棋核心库
//!
//! 包含:
//! - 规则配置与校验
//! - 棋盘状态、胜负判定、合法动作与后继局面
//! - 局面键（用于置换表）
//! - 棋盘记谱

mod board;
mod constants;
mod error;
mod notation;
mod player;
mod rules;

pub use board::{Board, PositionKey};
pub use constants::*;
pub use error::{ConfigError, GameError, Result};
pub use notation::Notation;
pub use player::Player;
pub use rules::Rules;
