//! 对局规则
//!
//! 棋盘边长、获胜连子数和双方符号在构造时一次性校验，之后 [`Board`](crate::Board)
//! 与搜索引擎都信任这份配置。

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MINE_SYMBOL, DEFAULT_OPPONENT_SYMBOL, DEFAULT_SIZE, DEFAULT_WIN_LENGTH, EMPTY,
    MIN_SIZE, MIN_WIN_LENGTH,
};
use crate::error::ConfigError;
use crate::player::Player;

/// 规则配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRules")]
pub struct Rules {
    size: usize,
    win_length: usize,
    mine_symbol: i32,
    opponent_symbol: i32,
}

/// 反序列化时的未校验形式
#[derive(Deserialize)]
struct RawRules {
    #[serde(default = "default_size")]
    size: usize,
    #[serde(default = "default_win_length")]
    win_length: usize,
    #[serde(default = "default_mine_symbol")]
    mine_symbol: i32,
    #[serde(default = "default_opponent_symbol")]
    opponent_symbol: i32,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

fn default_win_length() -> usize {
    DEFAULT_WIN_LENGTH
}

fn default_mine_symbol() -> i32 {
    DEFAULT_MINE_SYMBOL
}

fn default_opponent_symbol() -> i32 {
    DEFAULT_OPPONENT_SYMBOL
}

impl TryFrom<RawRules> for Rules {
    type Error = ConfigError;

    fn try_from(raw: RawRules) -> Result<Self, Self::Error> {
        Rules::new(raw.size, raw.win_length, raw.mine_symbol, raw.opponent_symbol)
    }
}

impl Rules {
    /// 创建并校验规则
    pub fn new(
        size: usize,
        win_length: usize,
        mine_symbol: i32,
        opponent_symbol: i32,
    ) -> Result<Self, ConfigError> {
        if size < MIN_SIZE {
            return Err(ConfigError::InvalidSize {
                size,
                min: MIN_SIZE,
            });
        }
        if win_length < MIN_WIN_LENGTH || win_length > size {
            return Err(ConfigError::InvalidWinLength {
                win_length,
                min: MIN_WIN_LENGTH,
                size,
            });
        }
        if mine_symbol == EMPTY || opponent_symbol == EMPTY {
            return Err(ConfigError::ZeroSymbol);
        }
        if mine_symbol == opponent_symbol {
            return Err(ConfigError::SameSymbols {
                symbol: mine_symbol,
            });
        }

        Ok(Self {
            size,
            win_length,
            mine_symbol,
            opponent_symbol,
        })
    }

    /// 使用默认符号（1 / -1）创建
    pub fn with_size(size: usize, win_length: usize) -> Result<Self, ConfigError> {
        Self::new(size, win_length, DEFAULT_MINE_SYMBOL, DEFAULT_OPPONENT_SYMBOL)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// 格子总数
    pub fn cells(&self) -> usize {
        self.size * self.size
    }

    pub fn mine_symbol(&self) -> i32 {
        self.mine_symbol
    }

    pub fn opponent_symbol(&self) -> i32 {
        self.opponent_symbol
    }

    /// 获取玩家的棋盘符号
    pub fn symbol(&self, player: Player) -> i32 {
        match player {
            Player::Mine => self.mine_symbol,
            Player::Opponent => self.opponent_symbol,
        }
    }

    /// 根据符号反查玩家，空格或未知符号返回 None
    pub fn player_of(&self, symbol: i32) -> Option<Player> {
        if symbol == self.mine_symbol {
            Some(Player::Mine)
        } else if symbol == self.opponent_symbol {
            Some(Player::Opponent)
        } else {
            None
        }
    }

    /// 行列编码为动作：`row * N + col`
    #[inline]
    pub fn encode(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// 动作解码为 (row, col)，越界返回 None
    #[inline]
    pub fn decode(&self, action: usize) -> Option<(usize, usize)> {
        if action < self.cells() {
            Some((action / self.size, action % self.size))
        } else {
            None
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
            mine_symbol: DEFAULT_MINE_SYMBOL,
            opponent_symbol: DEFAULT_OPPONENT_SYMBOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default();
        assert_eq!(rules.size(), 3);
        assert_eq!(rules.win_length(), 3);
        assert_eq!(rules.symbol(Player::Mine), 1);
        assert_eq!(rules.symbol(Player::Opponent), -1);
        assert_eq!(Rules::new(3, 3, 1, -1), Ok(rules));
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            Rules::with_size(2, 2),
            Err(ConfigError::InvalidSize { size: 2, min: 3 })
        );
        assert_eq!(
            Rules::with_size(3, 4),
            Err(ConfigError::InvalidWinLength {
                win_length: 4,
                min: 3,
                size: 3
            })
        );
        assert!(matches!(
            Rules::with_size(5, 2),
            Err(ConfigError::InvalidWinLength { .. })
        ));
        assert_eq!(Rules::new(3, 3, 0, -1), Err(ConfigError::ZeroSymbol));
        assert_eq!(Rules::new(3, 3, 1, 0), Err(ConfigError::ZeroSymbol));
        assert_eq!(
            Rules::new(3, 3, 2, 2),
            Err(ConfigError::SameSymbols { symbol: 2 })
        );
    }

    #[test]
    fn test_action_encoding() {
        let rules = Rules::with_size(4, 3).unwrap();
        assert_eq!(rules.encode(2, 1), 9);
        assert_eq!(rules.decode(9), Some((2, 1)));
        assert_eq!(rules.decode(15), Some((3, 3)));
        assert_eq!(rules.decode(16), None);
    }

    #[test]
    fn test_player_of() {
        let rules = Rules::new(3, 3, 7, 9).unwrap();
        assert_eq!(rules.player_of(7), Some(Player::Mine));
        assert_eq!(rules.player_of(9), Some(Player::Opponent));
        assert_eq!(rules.player_of(0), None);
        assert_eq!(rules.player_of(1), None);
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let rules = Rules::with_size(4, 3).unwrap();
        let json = serde_json::to_string(&rules).unwrap();
        let parsed: Rules = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rules);

        let defaulted: Rules = serde_json::from_str(r#"{"size": 5, "win_length": 4}"#).unwrap();
        assert_eq!(defaulted, Rules::with_size(5, 4).unwrap());

        let invalid = serde_json::from_str::<Rules>(r#"{"size": 3, "win_length": 5}"#);
        assert!(invalid.is_err());
    }
}
