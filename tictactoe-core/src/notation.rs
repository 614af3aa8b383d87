//! 棋盘记谱
//!
//! 格式：`<棋盘> [走子方]`
//!
//! - 棋盘从上到下逐行书写，行之间用 `/` 分隔
//! - `x` 为己方，`o` 为对方，`.` 为空格；数字表示连续空格数
//! - 走子方为 `x` 或 `o`，省略时为 `x`
//!
//! 示例：`o.x/..o/x.x x`

use crate::board::Board;
use crate::constants::EMPTY;
use crate::error::{GameError, Result};
use crate::player::Player;
use crate::rules::Rules;

/// 记谱处理
pub struct Notation;

impl Notation {
    /// 解析记谱为棋盘
    pub fn parse(text: &str, rules: Rules) -> Result<Board> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let Some(board_str) = parts.first() else {
            return Err(GameError::InvalidNotation {
                reason: "Empty notation".to_string(),
            });
        };

        let cells = Self::parse_cells(board_str, &rules)?;

        let first = match parts.get(1) {
            None => Player::Mine,
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Player::from_notation_char), chars.next()) {
                    (Some(player), None) => player,
                    _ => {
                        return Err(GameError::InvalidNotation {
                            reason: format!("Invalid side to move: {}", side),
                        })
                    }
                }
            }
        };

        if parts.len() > 2 {
            return Err(GameError::InvalidNotation {
                reason: format!("Unexpected trailing fields: {}", parts[2..].join(" ")),
            });
        }

        Board::new(rules, cells, first)
    }

    /// 记谱中的棋盘边长（行数）
    pub fn dimension(text: &str) -> Result<usize> {
        text.split_whitespace()
            .next()
            .map(|board_str| board_str.split('/').count())
            .ok_or_else(|| GameError::InvalidNotation {
                reason: "Empty notation".to_string(),
            })
    }

    /// 解析棋盘部分
    fn parse_cells(board_str: &str, rules: &Rules) -> Result<Vec<i32>> {
        let size = rules.size();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != size {
            return Err(GameError::InvalidNotation {
                reason: format!("Expected {} rows, got {}", size, rows.len()),
            });
        }

        let mut cells = Vec::with_capacity(rules.cells());
        for (row_idx, row) in rows.iter().enumerate() {
            let mut width = 0;

            for c in row.chars() {
                if let Some(empty_count) = c.to_digit(10) {
                    width += empty_count as usize;
                    cells.extend(std::iter::repeat(EMPTY).take(empty_count as usize));
                } else if c == '.' {
                    width += 1;
                    cells.push(EMPTY);
                } else if let Some(player) = Player::from_notation_char(c) {
                    width += 1;
                    cells.push(rules.symbol(player));
                } else {
                    return Err(GameError::InvalidNotation {
                        reason: format!("Invalid cell character: {}", c),
                    });
                }
            }

            if width != size {
                return Err(GameError::InvalidNotation {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, width, size),
                });
            }
        }

        Ok(cells)
    }

    /// 将棋盘转换为记谱
    pub fn to_string(board: &Board) -> String {
        format!(
            "{} {}",
            Self::board_to_string(board),
            board.current_player().to_notation_char()
        )
    }

    /// 将棋盘转换为记谱的棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let rules = board.rules();
        board
            .cells()
            .chunks(board.size())
            .map(|row| {
                row.iter()
                    .map(|&symbol| {
                        rules
                            .player_of(symbol)
                            .map(|player| player.to_notation_char())
                            .unwrap_or('.')
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
