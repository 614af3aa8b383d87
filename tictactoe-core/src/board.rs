//! 棋盘状态
//!
//! N×N 棋盘，格子按行优先存储，动作编码为 `row * N + col`。

use std::fmt;

use tracing::trace;

use crate::constants::{EMPTY, KEY_EMPTY, KEY_MINE, KEY_OPPONENT};
use crate::error::{GameError, Result};
use crate::notation::Notation;
use crate::player::Player;
use crate::rules::Rules;

/// 过一个格子的四个方向：横、竖、主对角、反对角
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 局面键
///
/// 行优先的格子字节编码（0 空，1 己方，2 对方）加上当前走子方。
/// 同样的格子内容、不同的走子方是两个不同的局面。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    cells: Box<[u8]>,
    to_move: Player,
}

impl PositionKey {
    /// 格子编码
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// 当前走子方
    pub fn to_move(&self) -> Player {
        self.to_move
    }
}

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rules: Rules,
    /// N×N 格子，索引为 row * N + col
    cells: Vec<i32>,
    /// 当前走子方
    current_player: Player,
    /// 每步之后的格子快照（含初始局面，最早的在前）
    history: Vec<Vec<i32>>,
}

impl Board {
    /// 从行优先的格子创建棋盘
    ///
    /// 格子数必须为 N×N，且每个值只能是 0 或双方符号之一。
    pub fn new(rules: Rules, cells: Vec<i32>, first: Player) -> Result<Self> {
        if cells.len() != rules.cells() {
            return Err(GameError::InvalidGrid {
                reason: format!("expected {} cells, got {}", rules.cells(), cells.len()),
            });
        }
        if let Some((index, symbol)) = cells
            .iter()
            .enumerate()
            .find(|(_, &symbol)| symbol != EMPTY && rules.player_of(symbol).is_none())
        {
            return Err(GameError::InvalidGrid {
                reason: format!("unknown symbol {} at cell {}", symbol, index),
            });
        }

        Ok(Self {
            rules,
            history: vec![cells.clone()],
            cells,
            current_player: first,
        })
    }

    /// 创建空棋盘
    pub fn empty(rules: Rules, first: Player) -> Self {
        let cells = vec![EMPTY; rules.cells()];
        Self {
            rules,
            history: vec![cells.clone()],
            cells,
            current_player: first,
        }
    }

    /// 从二维数组创建棋盘
    pub fn from_rows(rules: Rules, rows: &[Vec<i32>], first: Player) -> Result<Self> {
        let size = rules.size();
        if rows.len() != size {
            return Err(GameError::InvalidGrid {
                reason: format!("expected {} rows, got {}", size, rows.len()),
            });
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(GameError::InvalidGrid {
                reason: format!("row {} has {} columns, expected {}", index, row.len(), size),
            });
        }

        Self::new(rules, rows.concat(), first)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// 棋盘边长
    pub fn size(&self) -> usize {
        self.rules.size()
    }

    /// 获取指定位置的符号
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.size() && col < self.size() {
            Some(self.cells[self.rules.encode(row, col)])
        } else {
            None
        }
    }

    /// 获取动作对应格子的符号
    pub fn cell(&self, action: usize) -> Option<i32> {
        self.cells.get(action).copied()
    }

    /// 行优先的全部格子
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// 二维数组形式的格子
    pub fn rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.size()).map(<[i32]>::to_vec).collect()
    }

    /// 当前走子方
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// 历史快照，长度为已走步数 + 1
    pub fn history(&self) -> &[Vec<i32>] {
        &self.history
    }

    /// 已走步数
    pub fn move_count(&self) -> usize {
        self.history.len() - 1
    }

    /// 所有空格的动作，按行优先顺序
    pub fn actions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &symbol)| symbol == EMPTY)
            .map(|(action, _)| action)
            .collect()
    }

    /// 有胜者或无空格即为终局
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.cells.contains(&EMPTY)
    }

    /// 查找胜者
    ///
    /// 依次扫描所有行、所有列、所有主对角线（偏移 -(N-1)..=N-1）、所有反对角线
    /// （棋盘逆时针旋转 90° 后的主对角线），返回第一个连续 K 子的一方。
    pub fn winner(&self) -> Option<Player> {
        let n = self.size();
        let k = self.rules.win_length();

        for row in 0..n {
            if let Some(player) = self.scan_line((0..n).map(|col| (row, col))) {
                return Some(player);
            }
        }

        for col in 0..n {
            if let Some(player) = self.scan_line((0..n).map(|row| (row, col))) {
                return Some(player);
            }
        }

        // 长度不足 K 的对角线不可能获胜，跳过
        let reach = (n - k) as isize;

        for offset in -reach..=reach {
            if let Some(player) = self.scan_line(diagonal(n, offset)) {
                return Some(player);
            }
        }

        for offset in -reach..=reach {
            if let Some(player) = self.scan_line(anti_diagonal(n, offset)) {
                return Some(player);
            }
        }

        None
    }

    /// 扫描一条线，返回第一个达到 K 连的一方
    fn scan_line(&self, line: impl Iterator<Item = (usize, usize)>) -> Option<Player> {
        let win_length = self.rules.win_length();
        let mut run_symbol = EMPTY;
        let mut run_len = 0;

        for (row, col) in line {
            let symbol = self.cells[self.rules.encode(row, col)];
            if symbol == EMPTY {
                run_symbol = EMPTY;
                run_len = 0;
                continue;
            }

            if symbol == run_symbol {
                run_len += 1;
            } else {
                run_symbol = symbol;
                run_len = 1;
            }

            if run_len >= win_length {
                return self.rules.player_of(symbol);
            }
        }

        None
    }

    /// 所有后继局面，与 [`actions`](Self::actions) 一一对应
    ///
    /// 每个后继都是独立副本，不修改当前棋盘。
    pub fn successors(&self) -> Vec<Board> {
        self.actions()
            .into_iter()
            .map(|action| {
                let mut next = self.clone();
                next.place(action);
                next
            })
            .collect()
    }

    /// 走一步，返回新棋盘，当前棋盘不变
    pub fn apply(&self, action: usize) -> Result<Board> {
        let mut next = self.clone();
        next.set(action)?;
        Ok(next)
    }

    /// 当前走子方在指定格子落子
    ///
    /// 越界或格子已被占用时返回错误，棋盘保持不变。
    pub fn set(&mut self, action: usize) -> Result<()> {
        let Some(&symbol) = self.cells.get(action) else {
            return Err(GameError::ActionOutOfRange {
                action,
                cells: self.cells.len(),
            });
        };
        if symbol != EMPTY {
            return Err(GameError::InvalidAction { action });
        }

        self.place(action);
        trace!(action, moves = self.move_count(), "tile placed");
        Ok(())
    }

    /// 落子（不检查合法性）
    fn place(&mut self, action: usize) {
        self.cells[action] = self.rules.symbol(self.current_player);
        self.current_player = self.current_player.opponent();
        self.history.push(self.cells.clone());
    }

    /// 终局奖励：视角方获胜 +1.0，对方获胜 -1.0，和棋 0.0
    ///
    /// 只在 [`is_terminal`](Self::is_terminal) 为真时有意义；未终局且无胜者时返回 0.0。
    pub fn reward(&self, perspective: Player) -> f64 {
        match self.winner() {
            Some(winner) if winner == perspective => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        }
    }

    /// 指定一方落子即可立即获胜的空格
    pub fn winning_actions(&self, player: Player) -> Vec<usize> {
        self.actions()
            .into_iter()
            .filter(|&action| self.completes_run(action, player))
            .collect()
    }

    /// 己方一步即胜的空格数
    pub fn immediate_winning_moves(&self) -> usize {
        self.winning_actions(Player::Mine).len()
    }

    /// 需要己方立即封堵（对方一步即胜）的空格数
    pub fn immediate_blocking_moves(&self) -> usize {
        self.winning_actions(Player::Opponent).len()
    }

    /// 假设 `player` 在空格 `action` 落子，是否形成过该格的 K 连
    fn completes_run(&self, action: usize, player: Player) -> bool {
        let Some((row, col)) = self.rules.decode(action) else {
            return false;
        };
        let symbol = self.rules.symbol(player);

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let run = 1
                + self.count_direction(row, col, dr, dc, symbol)
                + self.count_direction(row, col, -dr, -dc, symbol);
            run >= self.rules.win_length()
        })
    }

    /// 从 (row, col) 出发沿方向连续为 `symbol` 的格子数（不含起点）
    fn count_direction(&self, row: usize, col: usize, dr: isize, dc: isize, symbol: i32) -> usize {
        let n = self.size() as isize;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        let mut count = 0;

        while r >= 0 && r < n && c >= 0 && c < n {
            if self.cells[(r * n + c) as usize] != symbol {
                break;
            }
            count += 1;
            r += dr;
            c += dc;
        }

        count
    }

    /// 计算局面键
    pub fn key(&self) -> PositionKey {
        let cells = self
            .cells
            .iter()
            .map(|&symbol| match self.rules.player_of(symbol) {
                Some(Player::Mine) => KEY_MINE,
                Some(Player::Opponent) => KEY_OPPONENT,
                None => KEY_EMPTY,
            })
            .collect();

        PositionKey {
            cells,
            to_move: self.current_player,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Notation::to_string(self))
    }
}

/// 主对角线上的格子，`offset` 与 numpy 的 `diagonal(offset)` 含义相同
fn diagonal(n: usize, offset: isize) -> impl Iterator<Item = (usize, usize)> {
    let shift = offset.unsigned_abs();
    let (row0, col0) = if offset >= 0 { (0, shift) } else { (shift, 0) };
    (0..n - shift).map(move |i| (row0 + i, col0 + i))
}

/// 反对角线上的格子：逆时针旋转 90° 后棋盘 B[i][j] = A[j][n-1-i] 的主对角线
fn anti_diagonal(n: usize, offset: isize) -> impl Iterator<Item = (usize, usize)> {
    let shift = offset.unsigned_abs();
    (0..n - shift).map(move |i| {
        if offset >= 0 {
            (i + shift, n - 1 - i)
        } else {
            (i, n - 1 - i - shift)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[i32; 3]], first: Player) -> Board {
        let rows: Vec<Vec<i32>> = rows.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(Rules::default(), &rows, first).unwrap()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty(Rules::default(), Player::Mine);
        assert_eq!(board.actions(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_terminal());
        assert_eq!(board.winner(), None);
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_actions_row_major() {
        let board = board(&[[1, 0, -1], [0, 1, 0], [-1, 0, 0]], Player::Mine);
        assert_eq!(board.actions(), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_invalid_grid() {
        let rules = Rules::default();
        assert!(matches!(
            Board::new(rules, vec![0; 8], Player::Mine),
            Err(GameError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Board::new(rules, vec![0, 0, 0, 0, 5, 0, 0, 0, 0], Player::Mine),
            Err(GameError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Board::from_rows(rules, &[vec![0; 3], vec![0; 2], vec![0; 3]], Player::Mine),
            Err(GameError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_row_win() {
        let board = board(&[[1, 1, 1], [-1, -1, 0], [0, 0, 0]], Player::Opponent);
        assert_eq!(board.winner(), Some(Player::Mine));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_column_win() {
        let board = board(&[[-1, 1, 0], [-1, 1, 0], [-1, 0, 1]], Player::Mine);
        assert_eq!(board.winner(), Some(Player::Opponent));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_diagonal_win() {
        let board = board(&[[1, -1, 0], [-1, 1, 0], [0, 0, 1]], Player::Opponent);
        assert_eq!(board.winner(), Some(Player::Mine));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = board(&[[1, 1, -1], [0, -1, 0], [-1, 0, 1]], Player::Mine);
        assert_eq!(board.winner(), Some(Player::Opponent));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_off_center_diagonals_on_larger_board() {
        let rules = Rules::with_size(5, 3).unwrap();
        let mut cells = vec![0; 25];
        // 主对角线偏移 +2：(0,2) (1,3) (2,4)
        for (row, col) in [(0, 2), (1, 3), (2, 4)] {
            cells[rules.encode(row, col)] = 1;
        }
        let board = Board::new(rules, cells, Player::Opponent).unwrap();
        assert_eq!(board.winner(), Some(Player::Mine));

        let mut cells = vec![0; 25];
        // 反对角线靠下：(2,4) (3,3) (4,2)
        for (row, col) in [(2, 4), (3, 3), (4, 2)] {
            cells[rules.encode(row, col)] = -1;
        }
        let board = Board::new(rules, cells, Player::Mine).unwrap();
        assert_eq!(board.winner(), Some(Player::Opponent));
    }

    #[test]
    fn test_run_is_contiguous() {
        let rules = Rules::with_size(5, 4).unwrap();
        let rows = vec![
            vec![1, 1, 0, 1, 1],
            vec![0, 0, 0, 0, 0],
            vec![1, 0, 0, 0, 0],
            vec![0, 0, 0, 1, 0],
            vec![0, 0, 0, 0, 1],
        ];
        let board = Board::from_rows(rules, &rows, Player::Opponent).unwrap();
        assert_eq!(board.winner(), None);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_draw_is_terminal() {
        let board = board(&[[1, -1, 1], [1, -1, -1], [-1, 1, 1]], Player::Opponent);
        assert_eq!(board.winner(), None);
        assert!(board.is_terminal());
        assert!(board.actions().is_empty());
        assert_eq!(board.reward(Player::Mine), 0.0);
    }

    #[test]
    fn test_set_flips_player_and_records_history() {
        let mut board = Board::empty(Rules::default(), Player::Mine);
        board.set(4).unwrap();
        assert_eq!(board.cell(4), Some(1));
        assert_eq!(board.current_player(), Player::Opponent);

        board.set(0).unwrap();
        assert_eq!(board.get(0, 0), Some(-1));
        assert_eq!(board.current_player(), Player::Mine);

        assert_eq!(board.history().len(), 3);
        assert_eq!(board.move_count(), 2);
        assert_eq!(board.history()[0], vec![0; 9]);
        assert_eq!(board.history()[2], board.cells().to_vec());
    }

    #[test]
    fn test_set_occupied_is_rejected() {
        let mut board = Board::empty(Rules::default(), Player::Mine);
        board.set(4).unwrap();
        let before = board.clone();

        assert_eq!(board.set(4), Err(GameError::InvalidAction { action: 4 }));
        assert_eq!(board, before);

        assert_eq!(
            board.set(9),
            Err(GameError::ActionOutOfRange { action: 9, cells: 9 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_successors_do_not_mutate() {
        let board = board(&[[1, -1, 0], [0, 0, 0], [0, 0, 0]], Player::Mine);
        let before = board.clone();
        let successors = board.successors();

        assert_eq!(board, before);
        assert_eq!(successors.len(), board.actions().len());
        for (successor, action) in successors.iter().zip(board.actions()) {
            assert_eq!(successor.cell(action), Some(1));
            assert_eq!(successor.current_player(), Player::Opponent);
            assert_eq!(successor.history().len(), board.history().len() + 1);
        }
    }

    #[test]
    fn test_apply() {
        let board = Board::empty(Rules::default(), Player::Opponent);
        let next = board.apply(2).unwrap();
        assert_eq!(next.cell(2), Some(-1));
        assert_eq!(board.cell(2), Some(0));
        assert!(board.apply(10).is_err());
    }

    #[test]
    fn test_reward() {
        let board = board(&[[1, 1, 1], [-1, -1, 0], [0, 0, 0]], Player::Opponent);
        assert_eq!(board.reward(Player::Mine), 1.0);
        assert_eq!(board.reward(Player::Opponent), -1.0);
    }

    #[test]
    fn test_immediate_moves() {
        let board = board(&[[-1, 1, 0], [-1, 1, 0], [0, 0, 0]], Player::Mine);
        assert_eq!(board.winning_actions(Player::Mine), vec![7]);
        assert_eq!(board.immediate_winning_moves(), 1);
        assert_eq!(board.winning_actions(Player::Opponent), vec![6]);
        assert_eq!(board.immediate_blocking_moves(), 1);
    }

    #[test]
    fn test_key_includes_player_to_move() {
        let rules = Rules::default();
        let cells = vec![1, 0, 0, 0, -1, 0, 0, 0, 0];
        let mine = Board::new(rules, cells.clone(), Player::Mine).unwrap();
        let opponent = Board::new(rules, cells, Player::Opponent).unwrap();

        assert_eq!(mine.key().cells(), &[1, 0, 0, 0, 2, 0, 0, 0, 0]);
        assert_eq!(mine.key().cells(), opponent.key().cells());
        assert_ne!(mine.key(), opponent.key());
    }

    #[test]
    fn test_key_independent_of_symbols() {
        let a_rules = Rules::new(3, 3, 1, -1).unwrap();
        let b_rules = Rules::new(3, 3, 5, 7).unwrap();
        let a = Board::new(a_rules, vec![1, -1, 0, 0, 0, 0, 0, 0, 0], Player::Mine).unwrap();
        let b = Board::new(b_rules, vec![5, 7, 0, 0, 0, 0, 0, 0, 0], Player::Mine).unwrap();
        assert_eq!(a.key(), b.key());
    }
}
