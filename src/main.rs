use clap::Parser;
use phpcs_runner::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志系统；写到 stderr，stdout 留给 phpcs 的报告
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // 执行命令
    match cli.execute() {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX)),
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
