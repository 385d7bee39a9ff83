//! 数据导入模块
//!
//! 从逐行文本批量导入道路，每行格式: `townA, townB, weight, roadName`

use crate::error::{Error, Result};
use crate::graph::TownGraph;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 默认字段分隔符
pub const DEFAULT_SEPARATOR: &str = ", ";

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub towns_added: usize,
    pub roads_added: usize,
    /// 格式错误或被拒绝的行
    pub skipped: usize,
    pub duration_ms: u64,
}

/// 一条道路记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadRecord {
    pub source: String,
    pub destination: String,
    pub weight: i64,
    pub name: String,
}

/// 解析一行道路记录
pub fn parse_road_record(line: &str, separator: &str) -> Result<RoadRecord> {
    let parts: Vec<&str> = line.split(separator).collect();
    if parts.len() != 4 {
        return Err(Error::ParseError(format!(
            "需要 4 个字段，实际 {} 个: {}",
            parts.len(),
            line
        )));
    }

    let weight = parts[2]
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::ParseError(format!("无效的距离 {:?}: {}", parts[2], e)))?;

    Ok(RoadRecord {
        source: parts[0].trim().to_string(),
        destination: parts[1].trim().to_string(),
        weight,
        name: parts[3].trim().to_string(),
    })
}

/// 道路导入器
pub struct RoadImporter {
    graph: Arc<TownGraph>,
    separator: String,
}

impl RoadImporter {
    /// 创建导入器
    pub fn new(graph: Arc<TownGraph>) -> Self {
        Self {
            graph,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// 设置字段分隔符
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// 从文件导入
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<ImportStats> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::ImportError(format!("无法打开 {}: {}", path.display(), e)))?;
        let stats = self.import_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            towns = stats.towns_added,
            roads = stats.roads_added,
            skipped = stats.skipped,
            "import finished"
        );
        Ok(stats)
    }

    /// 从字符串导入
    pub fn import_str(&self, content: &str) -> Result<ImportStats> {
        self.import_reader(content.as_bytes())
    }

    /// 从任意读取器导入；格式错误的行被跳过，不中断导入
    pub fn import_reader<R: BufRead>(&self, reader: R) -> Result<ImportStats> {
        let start = std::time::Instant::now();
        let mut stats = ImportStats::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.import_line(&line, &mut stats) {
                Ok(()) => {}
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "skipping road record");
                    stats.skipped += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        Ok(stats)
    }

    fn import_line(&self, line: &str, stats: &mut ImportStats) -> Result<()> {
        let record = parse_road_record(line, &self.separator)?;

        let (created, _) = self.graph.add_road_with_towns(
            &record.source,
            &record.destination,
            record.weight,
            &record.name,
        )?;
        stats.towns_added += created;
        stats.roads_added += 1;

        Ok(())
    }
}

/// 从文件导入道路
pub fn import_roads<P: AsRef<Path>>(graph: Arc<TownGraph>, path: P) -> Result<ImportStats> {
    RoadImporter::new(graph).import_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_road_record() {
        let record = parse_road_record("Rockville, Bethesda, 8, I-270", DEFAULT_SEPARATOR).unwrap();
        assert_eq!(record.source, "Rockville");
        assert_eq!(record.destination, "Bethesda");
        assert_eq!(record.weight, 8);
        assert_eq!(record.name, "I-270");

        assert!(parse_road_record("A, B, 8", DEFAULT_SEPARATOR).is_err());
        assert!(parse_road_record("A, B, eight, R", DEFAULT_SEPARATOR).is_err());
        assert!(parse_road_record("A, B, 1, R, extra", DEFAULT_SEPARATOR).is_err());
    }

    #[test]
    fn test_import_file() {
        let graph = TownGraph::new();
        let importer = RoadImporter::new(graph.clone());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Rockville, Bethesda, 8, I-270").unwrap();
        writeln!(file, "Bethesda, Silver Spring, 6, East-West Hwy").unwrap();
        writeln!(file, "Rockville, Silver Spring, 20, Veirs Mill Rd").unwrap();

        let stats = importer.import_file(file.path()).unwrap();
        assert_eq!(stats.towns_added, 3);
        assert_eq!(stats.roads_added, 3);
        assert_eq!(stats.skipped, 0);
        assert_eq!(
            graph.town_names(),
            vec!["Bethesda", "Rockville", "Silver Spring"]
        );
    }

    #[test]
    fn test_import_skips_malformed_lines() {
        let graph = TownGraph::new();
        let importer = RoadImporter::new(graph.clone());

        let content = "A, B, 5, R1\n\
                       not a record\n\
                       \n\
                       B, C, three, R2\n\
                       B, C, -3, R3\n\
                       C, C, 1, Loop\n\
                       B, A, 9, R1\n\
                       B, C, 3, R2\n";
        let stats = importer.import_str(content).unwrap();

        assert_eq!(stats.roads_added, 2);
        assert_eq!(stats.skipped, 5);
        assert_eq!(stats.towns_added, 3);
        assert_eq!(graph.town_names(), vec!["A", "B", "C"]);
        assert_eq!(graph.road_names(), vec!["R1", "R2"]);
        assert_eq!(graph.get_road("B", "A").unwrap().weight(), 5);
    }

    #[test]
    fn test_skipped_lines_add_no_towns() {
        let graph = TownGraph::new();
        let importer = RoadImporter::new(graph.clone());

        let content = "X, Y, -3, Bad\n\
                       P, P, 1, Loop\n\
                       M, , 2, R\n\
                       F, G, 99999999999, Far\n";
        let stats = importer.import_str(content).unwrap();

        assert_eq!(stats.towns_added, 0);
        assert_eq!(stats.roads_added, 0);
        assert_eq!(stats.skipped, 4);
        assert!(graph.town_names().is_empty());

        let stats = importer.import_str("A, B, 1, R\nB, A, 2, R\nA, C, 2, R\n").unwrap();
        assert_eq!(stats.towns_added, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(graph.town_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_import_missing_file() {
        let graph = TownGraph::new();
        let result = import_roads(graph, "/nonexistent/roads.txt");
        assert!(matches!(result, Err(Error::ImportError(_))));
    }

    #[test]
    fn test_custom_separator() {
        let graph = TownGraph::new();
        let importer = RoadImporter::new(graph.clone()).with_separator(";");
        let stats = importer.import_str("A;B;4;Ferry\n").unwrap();
        assert_eq!(stats.roads_added, 1);
        assert_eq!(graph.get_road("A", "B").unwrap().name(), "Ferry");
    }
}
