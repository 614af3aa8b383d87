//! 广义井字棋命令行求解器
//!
//! 包含:
//! - 命令行参数
//! - 搜索配置加载
//! - 求解与自对弈

pub mod cli;

pub use cli::{run, Cli};
