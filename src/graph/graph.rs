//! 道路网络图
//!
//! 城镇注册表与道路存储共用一把读写锁，城镇删除与级联删路对读者原子可见

use super::index::{RoadIndex, TownIndex};
use super::road::Road;
use super::town::{Town, TownName};
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// 图内部状态
#[derive(Debug, Default)]
pub(crate) struct GraphState {
    pub(crate) towns: TownIndex,
    pub(crate) roads: RoadIndex,
}

impl GraphState {
    pub fn towns(&self) -> &TownIndex {
        &self.towns
    }

    pub fn roads(&self) -> &RoadIndex {
        &self.roads
    }
}

/// 无向带权多重图
#[derive(Debug, Default)]
pub struct TownGraph {
    state: RwLock<GraphState>,
}

impl TownGraph {
    /// 创建空图
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 在一致的只读快照上执行 `f`
    ///
    /// 读锁不可重入，`f` 内不得再调用本图的方法。
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&GraphState) -> R) -> R {
        f(&self.state.read())
    }

    // ==================== 城镇操作 ====================

    /// 添加城镇，已存在时返回 `Ok(false)`
    pub fn add_town(&self, name: &str) -> Result<bool> {
        let name = TownName::new(name)?;
        let created = self.state.write().towns.insert(name);
        Ok(created)
    }

    /// 删除城镇及其全部关联道路
    pub fn remove_town(&self, name: &str) -> bool {
        let mut state = self.state.write();
        if state.towns.remove(name).is_none() {
            return false;
        }
        let removed = state.roads.remove_incident(name);
        debug!(town = name, roads = removed.len(), "removed town");
        true
    }

    pub fn contains_town(&self, name: &str) -> bool {
        self.state.read().towns.contains(name)
    }

    pub fn get_town(&self, name: &str) -> Option<Town> {
        self.state.read().towns.get(name).cloned()
    }

    /// 全部城镇名称（升序）
    pub fn town_names(&self) -> Vec<String> {
        self.state
            .read()
            .towns
            .names()
            .map(|n| n.to_string())
            .collect()
    }

    pub fn town_count(&self) -> usize {
        self.state.read().towns.len()
    }

    /// 相邻城镇（由道路计算，升序去重）
    pub fn adjacent_towns(&self, name: &str) -> Vec<String> {
        let state = self.state.read();
        let mut adjacent: Vec<String> = state
            .roads
            .of(name)
            .into_iter()
            .filter_map(|road| road.opposite(name))
            .map(|t| t.to_string())
            .collect();
        adjacent.sort();
        adjacent.dedup();
        adjacent
    }

    // ==================== 道路操作 ====================

    /// 添加道路
    pub fn add_road(
        &self,
        source: &str,
        destination: &str,
        weight: i64,
        name: &str,
    ) -> Result<Road> {
        let mut state = self.state.write();
        let GraphState { towns, roads } = &mut *state;
        match roads.add_road(towns, source, destination, weight, name) {
            Ok(road) => Ok(road),
            Err(e) => {
                debug!(source, destination, road = name, error = %e, "road rejected");
                Err(e)
            }
        }
    }

    /// 添加道路，并在同一把写锁内注册缺失的端点城镇
    ///
    /// 道路被拒绝时撤销本次新注册的城镇，图保持不变。返回新建城镇数和道路。
    pub fn add_road_with_towns(
        &self,
        source: &str,
        destination: &str,
        weight: i64,
        name: &str,
    ) -> Result<(usize, Road)> {
        let endpoints = [TownName::new(source)?, TownName::new(destination)?];

        let mut state = self.state.write();
        let GraphState { towns, roads } = &mut *state;
        let mut created = Vec::new();
        for town in endpoints {
            if towns.insert(town.clone()) {
                created.push(town);
            }
        }

        match roads.add_road(towns, source, destination, weight, name) {
            Ok(road) => Ok((created.len(), road)),
            Err(e) => {
                for town in &created {
                    towns.remove(town.as_str());
                }
                debug!(source, destination, road = name, error = %e, "road rejected");
                Err(e)
            }
        }
    }

    /// 两点之间的道路；多条时取名称最小者
    pub fn get_road(&self, a: &str, b: &str) -> Option<Road> {
        self.state.read().roads.get(a, b).cloned()
    }

    /// 两点之间的全部道路（按名称升序）
    pub fn roads_between(&self, a: &str, b: &str) -> Vec<Road> {
        self.state
            .read()
            .roads
            .between(a, b)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn contains_road(&self, a: &str, b: &str) -> bool {
        self.state.read().roads.get(a, b).is_some()
    }

    /// 按 (端点对, 名称) 删除道路
    pub fn remove_road(&self, a: &str, b: &str, name: &str) -> bool {
        self.state.write().roads.remove(a, b, name).is_some()
    }

    /// 城镇的关联道路
    pub fn roads_of(&self, town: &str) -> Vec<Road> {
        self.state
            .read()
            .roads
            .of(town)
            .into_iter()
            .cloned()
            .collect()
    }

    /// 全部道路，每条无向道路只出现一次
    pub fn road_set(&self) -> Vec<Road> {
        self.state.read().roads.iter().cloned().collect()
    }

    /// 全部道路名称（升序）
    pub fn road_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .read()
            .roads
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn road_count(&self) -> usize {
        self.state.read().roads.len()
    }
}
