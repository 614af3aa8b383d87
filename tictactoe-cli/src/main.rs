use anyhow::Result;
use clap::Parser;
use tictactoe_cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("tictactoe_cli=info".parse()?))
        .init();

    let cli = Cli::parse();
    run(&cli, &mut std::io::stdout().lock())
}
