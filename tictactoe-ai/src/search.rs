//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝
//!
//! 根节点走子方为极大方，另一方为极小方。终局分值为
//! `reward × (2·N² − depth)`，同样的胜负结果下更快的胜利、更慢的失败分值更高。
//! alpha / beta / depth 均作为递归参数传递，引擎本身不保存搜索中间状态。

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tictactoe_core::{Board, ConfigError, GameError, Player, Result, Rules};
use tracing::debug;

use crate::evaluate::{DrawEvaluator, Evaluator};
use crate::transposition::TranspositionCache;

/// 搜索配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub rules: Rules,
    /// 最大搜索深度，`None` 表示一直搜到终局
    pub max_depth: Option<u32>,
    /// 是否启用 Alpha-Beta 剪枝（关闭时为完整 Minimax，结果相同）
    pub alpha_beta: bool,
}

impl SearchConfig {
    /// 完美搜索：不限深度
    pub fn perfect(rules: Rules) -> Self {
        Self {
            rules,
            max_depth: None,
            alpha_beta: true,
        }
    }

    /// 限深搜索，截断处交给评估器
    pub fn depth_limited(rules: Rules, max_depth: u32) -> Self {
        Self {
            rules,
            max_depth: Some(max_depth),
            alpha_beta: true,
        }
    }

    /// 校验配置
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        match self.max_depth {
            Some(0) => Err(ConfigError::InvalidMaxDepth { depth: 0 }),
            _ => Ok(()),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::perfect(Rules::default())
    }
}

/// 一次搜索的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// 最佳动作（`row * N + col`）
    pub action: usize,
    /// 根节点走子方视角的分值
    pub score: f64,
    /// 访问的节点数（命中置换表时为 0）
    pub nodes: u64,
    /// 剪枝次数
    pub cutoffs: u64,
    /// 是否直接由置换表给出
    pub cache_hit: bool,
    pub elapsed: Duration,
}

/// 单次搜索的上下文，随递归传递，搜索结束即丢弃
struct SearchContext {
    /// 根节点走子方（极大方）
    root: Player,
    nodes: u64,
    cutoffs: u64,
}

/// Minimax 引擎
pub struct MinimaxEngine<E = DrawEvaluator> {
    config: SearchConfig,
    evaluator: E,
    cache: TranspositionCache,
}

impl MinimaxEngine {
    /// 创建新的引擎（截断处按和棋评估）
    pub fn new(config: SearchConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_evaluator(config, DrawEvaluator)
    }

    /// 使用默认规则的完美搜索引擎
    pub fn perfect(rules: Rules) -> Self {
        Self {
            config: SearchConfig::perfect(rules),
            evaluator: DrawEvaluator,
            cache: TranspositionCache::new(),
        }
    }
}

impl<E: Evaluator> MinimaxEngine<E> {
    /// 使用自定义评估器创建引擎
    pub fn with_evaluator(
        config: SearchConfig,
        evaluator: E,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            cache: TranspositionCache::new(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    /// 清空置换表
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// 搜索当前走子方的最佳动作
    pub fn best_action(&mut self, board: &Board) -> Result<usize> {
        self.analyze(board).map(|outcome| outcome.action)
    }

    /// 以己方先走，从二维格子直接搜索
    pub fn best_action_for_grid(&mut self, rows: &[Vec<i32>]) -> Result<usize> {
        let board = Board::from_rows(self.config.rules, rows, Player::Mine)?;
        self.best_action(&board)
    }

    /// 搜索并返回完整结果
    pub fn analyze(&mut self, board: &Board) -> Result<SearchOutcome> {
        if *board.rules() != self.config.rules {
            return Err(GameError::RulesMismatch);
        }
        if board.is_terminal() {
            return Err(GameError::NoLegalMove);
        }

        let started = Instant::now();
        let key = board.key();

        if let Some(entry) = self.cache.get(&key) {
            if let Some(action) = entry.best_action {
                debug!(action, score = entry.score, "cache hit");
                return Ok(SearchOutcome {
                    action,
                    score: entry.score,
                    nodes: 0,
                    cutoffs: 0,
                    cache_hit: true,
                    elapsed: started.elapsed(),
                });
            }
        }

        let mut ctx = SearchContext {
            root: board.current_player(),
            nodes: 0,
            cutoffs: 0,
        };
        let (score, best) =
            self.minimax(board, &mut ctx, 0, f64::NEG_INFINITY, f64::INFINITY);
        let action = best.ok_or(GameError::NoLegalMove)?;

        self.cache.put(key, score, Some(action));

        let elapsed = started.elapsed();
        debug!(
            action,
            score,
            nodes = ctx.nodes,
            cutoffs = ctx.cutoffs,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchOutcome {
            action,
            score,
            nodes: ctx.nodes,
            cutoffs: ctx.cutoffs,
            cache_hit: false,
            elapsed,
        })
    }

    /// 返回 (分值, 最佳动作)，终局与截断节点没有动作
    fn minimax(
        &self,
        board: &Board,
        ctx: &mut SearchContext,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> (f64, Option<usize>) {
        ctx.nodes += 1;

        if board.is_terminal() {
            let horizon = (2 * board.rules().cells()) as f64;
            return (board.reward(ctx.root) * (horizon - depth as f64), None);
        }

        if self.config.max_depth.is_some_and(|max_depth| depth >= max_depth) {
            return (self.evaluator.evaluate(board, ctx.root, depth), None);
        }

        if board.current_player() == ctx.root {
            self.max_value(board, ctx, depth, alpha, beta)
        } else {
            self.min_value(board, ctx, depth, alpha, beta)
        }
    }

    /// 极大方：取分值最大的动作，分值相同取最先出现的
    fn max_value(
        &self,
        board: &Board,
        ctx: &mut SearchContext,
        depth: u32,
        mut alpha: f64,
        beta: f64,
    ) -> (f64, Option<usize>) {
        let mut best = (f64::NEG_INFINITY, None);

        for (successor, action) in board.successors().iter().zip(board.actions()) {
            let (value, _) = self.minimax(successor, ctx, depth + 1, alpha, beta);
            if value > best.0 {
                best = (value, Some(action));
            }

            if self.config.alpha_beta {
                // Beta 剪枝
                if best.0 >= beta {
                    ctx.cutoffs += 1;
                    return best;
                }
                alpha = alpha.max(best.0);
            }
        }

        best
    }

    /// 极小方：取分值最小的动作，分值相同取最先出现的
    fn min_value(
        &self,
        board: &Board,
        ctx: &mut SearchContext,
        depth: u32,
        alpha: f64,
        mut beta: f64,
    ) -> (f64, Option<usize>) {
        let mut best = (f64::INFINITY, None);

        for (successor, action) in board.successors().iter().zip(board.actions()) {
            let (value, _) = self.minimax(successor, ctx, depth + 1, alpha, beta);
            if value < best.0 {
                best = (value, Some(action));
            }

            if self.config.alpha_beta {
                // Alpha 剪枝
                if best.0 <= alpha {
                    ctx.cutoffs += 1;
                    return best;
                }
                beta = beta.min(best.0);
            }
        }

        best
    }
}
