//! 控制台命令处理
//!
//! 解析一行输入并在管理器上执行，返回待展示的结果

use crate::algorithm::PathFinder;
use crate::cli::printer::Printer;
use crate::error::{Error, Result};
use crate::import::parse_road_record;
use crate::manager::TownGraphManager;

/// 控制台命令执行结果
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 解析并执行一条命令
pub fn execute_command(
    input: &str,
    printer: &Printer,
    manager: &TownGraphManager,
) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Continue;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd.to_lowercase(), args.trim()),
        None => (input.to_lowercase(), ""),
    };

    match run(&cmd, args, printer, manager) {
        Ok(result) => result,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn run(
    cmd: &str,
    args: &str,
    printer: &Printer,
    manager: &TownGraphManager,
) -> Result<CommandResult> {
    let graph = manager.graph();

    let result = match cmd {
        "quit" | "exit" | "q" => CommandResult::Exit,

        "help" | "h" | "?" => CommandResult::Message(Printer::print_help()),

        "stats" | "info" => {
            CommandResult::Message(printer.print_stats(graph.town_count(), graph.road_count()))
        }

        "towns" => CommandResult::Message(printer.print_names("Town", &manager.all_towns())),

        "roads" => {
            let mut roads = graph.road_set();
            roads.sort_by(|a, b| a.name().cmp(b.name()));
            CommandResult::Message(printer.print_roads(&roads))
        }

        "town" => {
            let name = require(args, "town <名称>")?;
            if !manager.contains_town(name) {
                return Err(Error::TownNotFound(name.to_string()));
            }
            let mut out = printer.print_names("Adjacent Town", &graph.adjacent_towns(name));
            out.push_str(&printer.print_roads(&graph.roads_of(name)));
            CommandResult::Message(out)
        }

        "add-town" => {
            let name = require(args, "add-town <名称>")?;
            if graph.add_town(name)? {
                CommandResult::Message(format!("已添加城镇 {}\n", name))
            } else {
                CommandResult::Message(format!("城镇 {} 已存在\n", name))
            }
        }

        "del-town" => {
            let name = require(args, "del-town <名称>")?;
            if manager.delete_town(name) {
                CommandResult::Message(format!("已删除城镇 {}\n", name))
            } else {
                return Err(Error::TownNotFound(name.to_string()));
            }
        }

        "add-road" => {
            let args = require(args, "add-road <A>, <B>, <距离>, <名称>")?;
            let record = parse_road_record(args, ",")?;
            let road = graph.add_road(
                &record.source,
                &record.destination,
                record.weight,
                &record.name,
            )?;
            CommandResult::Message(format!("已添加道路 {}\n", road))
        }

        "del-road" => {
            let [a, b, name] = split_args::<3>(args, "del-road <A>, <B>, <名称>")?;
            if manager.delete_road_connection(a, b, name) {
                CommandResult::Message(format!("已删除道路 {}\n", name))
            } else {
                CommandResult::Error(format!("{} 与 {} 之间没有名为 {} 的道路", a, b, name))
            }
        }

        "road" => {
            let [a, b] = split_args::<2>(args, "road <A>, <B>")?;
            if !manager.contains_road_connection(a, b) {
                CommandResult::Error(format!("{} 与 {} 之间没有道路", a, b))
            } else {
                CommandResult::Message(printer.print_roads(&graph.roads_between(a, b)))
            }
        }

        "path" | "shortest" => {
            let [a, b] = split_args::<2>(args, "path <起点>, <终点>")?;
            let path = PathFinder::new(graph.clone()).shortest_path(a, b)?;
            CommandResult::Message(printer.print_path(a, b, &path))
        }

        "load" => {
            let file = require(args, "load <文件>")?;
            let stats = manager.populate_town_graph(file)?;
            CommandResult::Message(printer.print_import(&stats))
        }

        _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
    };

    Ok(result)
}

fn require<'a>(args: &'a str, usage: &str) -> Result<&'a str> {
    if args.is_empty() {
        return Err(Error::ParseError(format!("用法: {}", usage)));
    }
    Ok(args)
}

/// 按逗号切分出恰好 N 个非空参数
fn split_args<'a, const N: usize>(args: &'a str, usage: &str) -> Result<[&'a str; N]> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(Error::ParseError(format!("用法: {}", usage)));
    }
    parts
        .try_into()
        .map_err(|_| Error::ParseError(format!("用法: {}", usage)))
}
