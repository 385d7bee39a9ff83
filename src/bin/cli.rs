//! TownGraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use towngraph::cli::{execute_command, CommandResult, PrintMode, Printer};
use towngraph::TownGraphManager;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "towngraph-cli")]
#[command(about = "TownGraph 命令行工具", version)]
struct Args {
    /// 启动时导入的道路文件
    #[arg(short, long, env = "TOWNGRAPH_FILE")]
    file: Option<PathBuf>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 以 JSON 格式输出
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// 只输出错误日志
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let manager = TownGraphManager::new();
    let printer = Printer::new(if args.json {
        PrintMode::Json
    } else {
        PrintMode::Table
    });

    if let Some(path) = &args.file {
        let stats = manager
            .populate_town_graph(path)
            .with_context(|| format!("导入 {} 失败", path.display()))?;
        eprint!("{}", printer.print_import(&stats));
    }

    // 单个命令模式
    if let Some(command) = args.execute {
        return match execute_command(&command, &printer, &manager) {
            CommandResult::Error(e) => anyhow::bail!(e),
            result => {
                show(result);
                Ok(())
            }
        };
    }

    // 交互模式
    println!("TownGraph CLI {}", towngraph::VERSION);
    println!("输入 'help' 查看命令列表，'quit' 退出\n");

    let stdin = io::stdin();
    loop {
        print!("towngraph> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match execute_command(&line, &printer, &manager) {
            CommandResult::Exit => break,
            result => show(result),
        }
    }

    println!("再见！");
    Ok(())
}

fn show(result: CommandResult) {
    match result {
        CommandResult::Message(msg) => print!("{}", msg),
        CommandResult::Error(e) => println!("{} {}", "错误:".red().bold(), e),
        CommandResult::Continue | CommandResult::Exit => {}
    }
}
