//! Dijkstra 最短路径
//!
//! 每次调用独立构建距离表、前驱表和优先队列，调用之间不共享状态

use crate::error::{Error, Result};
use crate::graph::{GraphState, Road, TownGraph, TownName};
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 路径上的一步（按行进方向）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub from: TownName,
    pub to: TownName,
    pub road: String,
    pub weight: u64,
}

impl PathStep {
    fn new(from: TownName, to: TownName, road: &Road) -> Self {
        Self {
            from,
            to,
            road: road.name().to_string(),
            weight: road.weight(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {} to {} {} mi", self.from, self.road, self.to, self.weight)
    }
}

/// 路径结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// 起点到终点的道路序列
    pub steps: Vec<PathStep>,
    /// 路径总距离
    pub total_weight: u64,
}

impl PathResult {
    /// 起点即终点，或不可达
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 途经城镇（含起点和终点）
    pub fn towns(&self) -> Vec<&TownName> {
        let mut towns: Vec<&TownName> = self.steps.iter().map(|s| &s.from).collect();
        if let Some(last) = self.steps.last() {
            towns.push(&last.to);
        }
        towns
    }

    /// 每一步的可读描述
    pub fn describe(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.to_string()).collect()
    }
}

/// 单源最短路径树（距离表 + 前驱表）
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: TownName,
    distances: HashMap<TownName, u64>,
    predecessors: HashMap<TownName, (TownName, Road)>,
    settled: HashSet<TownName>,
}

impl ShortestPathTree {
    pub fn source(&self) -> &TownName {
        &self.source
    }

    /// 已确定的最短距离；不可达时为 None
    pub fn distance(&self, town: &str) -> Option<u64> {
        if !self.settled.contains(town) {
            return None;
        }
        self.distances.get(town).copied()
    }

    /// 最短路径上的前一个城镇及所经道路
    pub fn predecessor(&self, town: &str) -> Option<(&TownName, &Road)> {
        self.predecessors.get(town).map(|(prev, road)| (prev, road))
    }

    /// 已确定距离的城镇数量（含起点）
    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// 沿前驱回溯重构路径；不可达时返回空路径
    pub fn path_to(&self, destination: &str) -> PathResult {
        if self.source == destination || !self.settled.contains(destination) {
            return PathResult::default();
        }

        let Some(&total_weight) = self.distances.get(destination) else {
            return PathResult::default();
        };
        let mut steps = Vec::new();
        let mut current = destination;

        while self.source != current {
            let Some((town, (prev, road))) = self.predecessors.get_key_value(current) else {
                return PathResult::default();
            };
            steps.push(PathStep::new(prev.clone(), town.clone(), road));
            current = prev.as_str();
        }

        steps.reverse();
        PathResult {
            steps,
            total_weight,
        }
    }
}

/// 路径查找器
pub struct PathFinder {
    graph: Arc<TownGraph>,
}

impl PathFinder {
    /// 创建路径查找器
    pub fn new(graph: Arc<TownGraph>) -> Self {
        Self { graph }
    }

    /// 两点之间的最短路径
    ///
    /// 任一端点未注册时返回 `Error::TownNotFound`；起点等于终点或不可达时返回空路径。
    pub fn shortest_path(&self, source: &str, destination: &str) -> Result<PathResult> {
        let (path, settled) = self.graph.with_state(|state| -> Result<(PathResult, usize)> {
            let source_name = resolve(state, source)?;
            resolve(state, destination)?;
            if source == destination {
                return Ok((PathResult::default(), 0));
            }

            let tree = dijkstra(state, source_name, Some(destination));
            Ok((tree.path_to(destination), tree.settled_count()))
        })?;
        debug!(
            source,
            destination,
            steps = path.len(),
            total = path.total_weight,
            settled,
            "shortest path computed"
        );
        Ok(path)
    }

    /// 从起点出发的完整最短路径树
    pub fn shortest_path_tree(&self, source: &str) -> Result<ShortestPathTree> {
        self.graph.with_state(|state| -> Result<ShortestPathTree> {
            let source_name = resolve(state, source)?;
            Ok(dijkstra(state, source_name, None))
        })
    }

    /// 两点是否连通
    pub fn is_reachable(&self, source: &str, destination: &str) -> Result<bool> {
        if source == destination {
            return self
                .graph
                .with_state(|state| resolve(state, source))
                .map(|_| true);
        }
        Ok(!self.shortest_path(source, destination)?.is_empty())
    }
}

fn resolve(state: &GraphState, town: &str) -> Result<TownName> {
    state
        .towns()
        .get(town)
        .map(|t| t.name().clone())
        .ok_or_else(|| Error::TownNotFound(town.to_string()))
}

/// 优先级：距离小者优先，距离相同按名称升序
type Priority = Reverse<(u64, TownName)>;

/// Dijkstra 主循环；给出 `target` 时在其确定后提前结束
fn dijkstra(state: &GraphState, source: TownName, target: Option<&str>) -> ShortestPathTree {
    let mut distances: HashMap<TownName, u64> = HashMap::new();
    let mut predecessors: HashMap<TownName, (TownName, Road)> = HashMap::new();
    let mut settled: HashSet<TownName> = HashSet::new();
    let mut frontier: PriorityQueue<TownName, Priority> = PriorityQueue::new();

    distances.insert(source.clone(), 0);
    frontier.push(source.clone(), Reverse((0, source.clone())));

    while let Some((u, Reverse((dist_u, _)))) = frontier.pop() {
        settled.insert(u.clone());
        if target.is_some_and(|t| u == t) {
            break;
        }

        for road in state.roads().of(u.as_str()) {
            let Some(v) = road.opposite(u.as_str()) else {
                continue;
            };
            if settled.contains(v) {
                continue;
            }

            // 单路距离有上限，简单路径不会溢出；溢出的候选视为不可经此路到达
            let Some(candidate) = dist_u.checked_add(road.weight()) else {
                continue;
            };
            // 仅严格更优时替换前驱，保留先发现的等长路径
            let improved = distances.get(v).map_or(true, |&d| candidate < d);
            if improved {
                distances.insert(v.clone(), candidate);
                predecessors.insert(v.clone(), (u.clone(), road.clone()));
                frontier.push(v.clone(), Reverse((candidate, v.clone())));
            }
        }
    }

    ShortestPathTree {
        source,
        distances,
        predecessors,
        settled,
    }
}
