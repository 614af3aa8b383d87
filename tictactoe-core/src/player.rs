//! 玩家定义

use serde::{Deserialize, Serialize};

/// 对局双方
///
/// `Mine` 是引擎所代表的一方，`Opponent` 是对手。具体落在棋盘上的整数符号由
/// [`Rules`](crate::Rules) 决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 己方
    Mine,
    /// 对方
    Opponent,
}

impl Player {
    /// 获取对方
    pub fn opponent(&self) -> Player {
        match self {
            Player::Mine => Player::Opponent,
            Player::Opponent => Player::Mine,
        }
    }

    /// 获取记谱字符
    pub fn to_notation_char(&self) -> char {
        match self {
            Player::Mine => 'x',
            Player::Opponent => 'o',
        }
    }

    /// 从记谱字符解析
    pub fn from_notation_char(c: char) -> Option<Player> {
        match c {
            'x' | 'X' => Some(Player::Mine),
            'o' | 'O' => Some(Player::Opponent),
            _ => None,
        }
    }
}
