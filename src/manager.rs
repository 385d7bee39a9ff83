//! 城镇图管理器
//!
//! 以字符串为键的外观层，供命令行等调用方使用

use crate::algorithm::PathFinder;
use crate::error::Result;
use crate::graph::{Town, TownGraph};
use crate::import::{ImportStats, RoadImporter};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// 城镇图管理器
pub struct TownGraphManager {
    graph: Arc<TownGraph>,
}

impl Default for TownGraphManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TownGraphManager {
    pub fn new() -> Self {
        Self::with_graph(TownGraph::new())
    }

    pub fn with_graph(graph: Arc<TownGraph>) -> Self {
        Self { graph }
    }

    /// 底层图
    pub fn graph(&self) -> &Arc<TownGraph> {
        &self.graph
    }

    /// 从文件批量导入道路
    pub fn populate_town_graph<P: AsRef<Path>>(&self, path: P) -> Result<ImportStats> {
        RoadImporter::new(self.graph.clone()).import_file(path)
    }

    /// 添加城镇；名称为空或已存在时返回 false
    pub fn add_town(&self, town: &str) -> bool {
        self.graph.add_town(town).unwrap_or_else(|e| {
            debug!(town, error = %e, "town rejected");
            false
        })
    }

    pub fn get_town(&self, name: &str) -> Option<Town> {
        self.graph.get_town(name)
    }

    pub fn contains_town(&self, name: &str) -> bool {
        self.graph.contains_town(name)
    }

    /// 添加道路；两端城镇必须已存在
    pub fn add_road(&self, town1: &str, town2: &str, weight: i64, road_name: &str) -> bool {
        self.graph.add_road(town1, town2, weight, road_name).is_ok()
    }

    /// 两城镇之间的道路名称
    pub fn get_road(&self, town1: &str, town2: &str) -> Option<String> {
        self.graph
            .get_road(town1, town2)
            .map(|road| road.name().to_string())
    }

    pub fn contains_road_connection(&self, town1: &str, town2: &str) -> bool {
        self.graph.contains_road(town1, town2)
    }

    pub fn delete_road_connection(&self, town1: &str, town2: &str, road_name: &str) -> bool {
        self.graph.remove_road(town1, town2, road_name)
    }

    pub fn delete_town(&self, town: &str) -> bool {
        self.graph.remove_town(town)
    }

    /// 全部城镇名称（升序）
    pub fn all_towns(&self) -> Vec<String> {
        self.graph.town_names()
    }

    /// 全部道路名称（升序）
    pub fn all_roads(&self) -> Vec<String> {
        self.graph.road_names()
    }

    /// 最短路径的逐步描述；不可达时为空
    pub fn get_path(&self, town1: &str, town2: &str) -> Result<Vec<String>> {
        let path = PathFinder::new(self.graph.clone()).shortest_path(town1, town2)?;
        Ok(path.describe())
    }
}
