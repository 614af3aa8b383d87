//! 命令行参数与执行

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tictactoe_ai::{DrawEvaluator, Evaluator, MinimaxEngine, SearchConfig, ThreatEvaluator};
use tictactoe_core::{Notation, Rules, DEFAULT_WIN_LENGTH};
use tracing::info;

/// 广义 N×N 井字棋完美求解器
#[derive(Parser, Debug)]
#[command(name = "tictactoe-cli")]
#[command(version, about = "Perfect-play solver for N×N tic-tac-toe", long_about = None)]
pub struct Cli {
    /// 局面记谱，例如 "o.x/..o/x.x x"
    pub position: String,

    /// 获胜所需连子数
    #[arg(short = 'k', long, default_value_t = DEFAULT_WIN_LENGTH)]
    pub win_length: usize,

    /// 最大搜索深度（默认搜到终局）
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// 深度截断处使用威胁评估而非和棋
    #[arg(long)]
    pub threats: bool,

    /// 从 JSON 文件读取搜索配置（覆盖 --win-length 与 --max-depth）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 由引擎替双方走到终局
    #[arg(long)]
    pub self_play: bool,
}

impl Cli {
    /// 生成搜索配置
    pub fn search_config(&self) -> Result<SearchConfig> {
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {:?}", path))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("解析配置文件失败: {:?}", path));
        }

        let size = Notation::dimension(&self.position)?;
        let rules = Rules::with_size(size, self.win_length)?;
        Ok(match self.max_depth {
            Some(depth) => SearchConfig::depth_limited(rules, depth),
            None => SearchConfig::perfect(rules),
        })
    }
}

/// 执行命令，结果写入 `out`
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.search_config()?;
    let mut board = Notation::parse(&cli.position, config.rules)?;

    let evaluator: Box<dyn Evaluator> = if cli.threats {
        Box::new(ThreatEvaluator)
    } else {
        Box::new(DrawEvaluator)
    };
    let mut engine = MinimaxEngine::with_evaluator(config, evaluator)?;

    if board.is_terminal() {
        bail!("局面已经结束: {}", board);
    }

    info!(
        size = config.rules.size(),
        win_length = config.rules.win_length(),
        max_depth = ?config.max_depth,
        "开始求解"
    );

    loop {
        let outcome = engine.analyze(&board)?;
        let (row, col) = config
            .rules
            .decode(outcome.action)
            .context("引擎返回了越界的动作")?;

        writeln!(
            out,
            "{} -> {} (row {}, col {}) score {} nodes {}",
            board, outcome.action, row, col, outcome.score, outcome.nodes
        )?;

        if !cli.self_play {
            return Ok(());
        }

        board.set(outcome.action)?;
        if board.is_terminal() {
            break;
        }
    }

    let result = match board.winner() {
        Some(player) => format!("{} wins", player.to_notation_char()),
        None => "draw".to_string(),
    };
    writeln!(out, "{} {}", board, result)?;
    info!(moves = board.move_count(), %result, "自对弈结束");

    Ok(())
}
