//! 深度上限处的局面评估
//!
//! 搜索到达 `max_depth` 仍未终局时，由 [`Evaluator`] 给出分值。默认按和棋处理。

use tictactoe_core::{Board, Player};

/// 评估器
pub trait Evaluator {
    /// 评估非终局局面，`perspective` 为根节点走子方，正值对其有利
    fn evaluate(&self, board: &Board, perspective: Player, depth: u32) -> f64;
}

/// 和棋评估：截断处一律记 0
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawEvaluator;

impl Evaluator for DrawEvaluator {
    fn evaluate(&self, _board: &Board, _perspective: Player, _depth: u32) -> f64 {
        0.0
    }
}

/// 威胁评估：双方“一步即胜”空格数之差
///
/// 结果落在 (-1, 1) 内，低于任何终局分值的绝对值。
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreatEvaluator;

impl Evaluator for ThreatEvaluator {
    fn evaluate(&self, board: &Board, perspective: Player, _depth: u32) -> f64 {
        let own = board.winning_actions(perspective).len() as f64;
        let other = board.winning_actions(perspective.opponent()).len() as f64;
        let scale = (board.rules().cells() + 1) as f64;

        // 轮到己方且有一步即胜，几乎等同胜局
        let tempo = if board.current_player() == perspective && own > 0.0 {
            0.5
        } else if board.current_player() != perspective && other > 0.0 {
            -0.5
        } else {
            0.0
        };

        (own - other) / scale * 0.5 + tempo
    }
}

// 引用与 Box 也可作为评估器
impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, board: &Board, perspective: Player, depth: u32) -> f64 {
        (**self).evaluate(board, perspective, depth)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, board: &Board, perspective: Player, depth: u32) -> f64 {
        (**self).evaluate(board, perspective, depth)
    }
}
