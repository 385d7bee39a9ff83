//! 结果打印器
//!
//! 提供表格和 JSON 两种输出格式

use crate::algorithm::PathResult;
use crate::graph::Road;
use crate::import::ImportStats;
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;
use serde_json::json;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// JSON 模式
    Json,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 名称列表（城镇或道路）
    pub fn print_names(&self, column: &str, names: &[String]) -> String {
        match self.mode {
            PrintMode::Json => to_json(&names),
            PrintMode::Table => {
                if names.is_empty() {
                    return "Empty set\n".to_string();
                }
                let rows: Vec<Vec<String>> = names.iter().map(|n| vec![n.clone()]).collect();
                format!(
                    "{}{} row(s) in set\n",
                    self.format_table(&[column], &rows),
                    names.len()
                )
            }
        }
    }

    /// 道路列表
    pub fn print_roads(&self, roads: &[Road]) -> String {
        match self.mode {
            PrintMode::Json => to_json(&roads),
            PrintMode::Table => {
                if roads.is_empty() {
                    return "Empty set\n".to_string();
                }
                let rows: Vec<Vec<String>> = roads
                    .iter()
                    .map(|r| {
                        vec![
                            r.name().to_string(),
                            r.source().to_string(),
                            r.destination().to_string(),
                            r.weight().to_string(),
                        ]
                    })
                    .collect();
                format!(
                    "{}{} row(s) in set\n",
                    self.format_table(&["Road", "From", "To", "Distance"], &rows),
                    roads.len()
                )
            }
        }
    }

    /// 最短路径
    pub fn print_path(&self, source: &str, destination: &str, path: &PathResult) -> String {
        match self.mode {
            PrintMode::Json => to_json(&json!({
                "source": source,
                "destination": destination,
                "steps": path.describe(),
                "total_weight": path.total_weight,
            })),
            PrintMode::Table => {
                if source == destination {
                    return format!("{} 即为终点\n", source);
                }
                if path.is_empty() {
                    return format!("{} 与 {} 之间没有路径\n", source, destination);
                }
                let rows: Vec<Vec<String>> = path
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| vec![(i + 1).to_string(), step.to_string()])
                    .collect();
                format!(
                    "{}总距离: {} mi\n",
                    self.format_table(&["#", "Step"], &rows),
                    path.total_weight
                )
            }
        }
    }

    /// 打印统计信息
    pub fn print_stats(&self, town_count: usize, road_count: usize) -> String {
        match self.mode {
            PrintMode::Json => to_json(&json!({ "towns": town_count, "roads": road_count })),
            PrintMode::Table => {
                let mut table = Table::new();
                table.set_format(*format::consts::FORMAT_BOX_CHARS);
                table.set_titles(row!["Property", "Value"]);
                table.add_row(row!["Town Count", town_count.to_string()]);
                table.add_row(row!["Road Count", road_count.to_string()]);
                table.to_string()
            }
        }
    }

    /// 导入结果
    pub fn print_import(&self, stats: &ImportStats) -> String {
        match self.mode {
            PrintMode::Json => to_json(stats),
            PrintMode::Table => format!(
                "导入完成: 新增城镇 {}, 新增道路 {}, 跳过 {} 行 ({} ms)\n",
                stats.towns_added, stats.roads_added, stats.skipped, stats.duration_ms
            ),
        }
    }

    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   TownGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                 显示帮助
  quit, exit, q              退出程序
  stats, info                显示图统计信息

城镇:
  towns                      列出全部城镇（升序）
  town <名称>                查看城镇的道路和相邻城镇
  add-town <名称>            添加城镇
  del-town <名称>            删除城镇及其全部道路

道路 (参数以逗号分隔):
  roads                      列出全部道路
  road <A>, <B>              查看两城镇之间的道路
  add-road <A>, <B>, <距离>, <名称>
                             示例: add-road Rockville, Bethesda, 8, I-270
  del-road <A>, <B>, <名称>  删除道路

路径:
  path <起点>, <终点>        查找最短路径
                             示例: path Rockville, Silver Spring

导入:
  load <文件>                每行格式: townA, townB, weight, roadName

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(s) => format!("{}\n", s),
        Err(e) => format!("JSON 序列化失败: {}\n", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::PathFinder;
    use crate::graph::TownGraph;

    #[test]
    fn test_print_names() {
        let printer = Printer::default();
        let out = printer.print_names("Town", &["A".to_string(), "B".to_string()]);
        assert!(out.contains("Town"));
        assert!(out.contains("2 row(s) in set"));
        assert_eq!(printer.print_names("Town", &[]), "Empty set\n");

        let json = Printer::new(PrintMode::Json).print_names("Town", &["A".to_string()]);
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec!["A"]);
    }

    #[test]
    fn test_print_path() {
        let graph = TownGraph::new();
        graph.add_town("A").unwrap();
        graph.add_town("B").unwrap();
        graph.add_town("C").unwrap();
        graph.add_road("A", "B", 4, "Main").unwrap();
        let finder = PathFinder::new(graph);

        let mut printer = Printer::default();
        let path = finder.shortest_path("A", "B").unwrap();
        let out = printer.print_path("A", "B", &path);
        assert!(out.contains("A via Main to B 4 mi"));
        assert!(out.contains("总距离: 4 mi"));

        let none = finder.shortest_path("A", "C").unwrap();
        assert!(printer.print_path("A", "C", &none).contains("没有路径"));

        printer.set_mode(PrintMode::Json);
        let value: serde_json::Value =
            serde_json::from_str(&printer.print_path("A", "B", &path)).unwrap();
        assert_eq!(value["total_weight"], 4);
        assert_eq!(value["steps"][0], "A via Main to B 4 mi");
    }

    #[test]
    fn test_print_stats() {
        let out = Printer::default().print_stats(3, 2);
        assert!(out.contains("Town Count"));
        assert!(out.contains("Road Count"));
    }
}
