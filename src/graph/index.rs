//! 图索引
//!
//! 城镇注册表和道路存储。二者都不自带锁，由 `TownGraph` 统一加锁。

use crate::error::{Error, Result};
use crate::graph::road::{Road, RoadKey, MAX_ROAD_WEIGHT};
use crate::graph::town::{Town, TownName};
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, HashMap};

/// 城镇注册表
#[derive(Debug, Default)]
pub(crate) struct TownIndex {
    /// 名称到城镇的有序映射
    towns: BTreeMap<TownName, Town>,
}

impl TownIndex {
    /// 插入城镇，已存在时返回 false
    pub fn insert(&mut self, name: TownName) -> bool {
        if self.towns.contains_key(&name) {
            return false;
        }
        self.towns.insert(name.clone(), Town::new(name));
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Town> {
        self.towns.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.towns.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Town> {
        self.towns.get(name)
    }

    /// 按名称升序遍历
    pub fn names(&self) -> impl Iterator<Item = &TownName> {
        self.towns.keys()
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }
}

/// 道路存储
///
/// `roads` 是唯一的数据来源，`incident` 只保存键。
#[derive(Debug, Default)]
pub(crate) struct RoadIndex {
    /// 身份键到道路（保持插入顺序）
    roads: IndexMap<RoadKey, Road>,
    /// 城镇到关联道路键
    incident: HashMap<TownName, IndexSet<RoadKey>>,
}

impl RoadIndex {
    /// 添加道路
    ///
    /// 端点必须已在 `towns` 中注册；失败时存储保持不变。
    pub fn add_road(
        &mut self,
        towns: &TownIndex,
        source: &str,
        destination: &str,
        weight: i64,
        name: &str,
    ) -> Result<Road> {
        for endpoint in [source, destination] {
            if !towns.contains(endpoint) {
                return Err(Error::MissingEndpoint(endpoint.to_string()));
            }
        }
        if source == destination {
            return Err(Error::MalformedRoad(format!(
                "道路 {} 的两端相同: {}",
                name, source
            )));
        }
        let weight = u64::try_from(weight).map_err(|_| {
            Error::MalformedRoad(format!("道路 {} 的距离为负: {}", name, weight))
        })?;
        if weight > MAX_ROAD_WEIGHT {
            return Err(Error::MalformedRoad(format!(
                "道路 {} 的距离超出上限 {}: {}",
                name, MAX_ROAD_WEIGHT, weight
            )));
        }

        let road = Road::new(
            TownName::new(source)?,
            TownName::new(destination)?,
            weight,
            name,
        );
        let key = road.key();
        if self.roads.contains_key(&key) {
            return Err(Error::DuplicateRoad {
                source_town: source.to_string(),
                destination_town: destination.to_string(),
                name: name.to_string(),
            });
        }

        for endpoint in [key.pair.low().clone(), key.pair.high().clone()] {
            self.incident.entry(endpoint).or_default().insert(key.clone());
        }
        self.roads.insert(key, road.clone());

        Ok(road)
    }

    /// 查找两点之间名称最小的道路
    pub fn get(&self, a: &str, b: &str) -> Option<&Road> {
        self.keys_between(a, b)
            .min_by(|x, y| x.name.cmp(&y.name))
            .and_then(|key| self.roads.get(key))
    }

    /// 两点之间的全部道路（按名称升序）
    pub fn between(&self, a: &str, b: &str) -> Vec<&Road> {
        let mut keys: Vec<&RoadKey> = self.keys_between(a, b).collect();
        keys.sort_by(|x, y| x.name.cmp(&y.name));
        keys.into_iter().filter_map(|key| self.roads.get(key)).collect()
    }

    fn keys_between<'a>(
        &'a self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = &'a RoadKey> + 'a {
        self.incident
            .get(a)
            .into_iter()
            .flat_map(|keys| keys.iter())
            .filter(move |key| key.pair.matches(a, b))
    }

    /// 按 (端点对, 名称) 删除道路，忽略权重
    pub fn remove(&mut self, a: &str, b: &str, name: &str) -> Option<Road> {
        let key = self
            .keys_between(a, b)
            .find(|key| key.name == name)
            .cloned()?;
        self.remove_key(&key)
    }

    fn remove_key(&mut self, key: &RoadKey) -> Option<Road> {
        let road = self.roads.shift_remove(key)?;
        self.detach(key.pair.low(), key);
        self.detach(key.pair.high(), key);
        Some(road)
    }

    fn detach(&mut self, town: &TownName, key: &RoadKey) {
        if let Some(keys) = self.incident.get_mut(town) {
            keys.shift_remove(key);
            if keys.is_empty() {
                self.incident.remove(town);
            }
        }
    }

    /// 删除城镇的全部关联道路（级联删除）
    pub fn remove_incident(&mut self, town: &str) -> Vec<Road> {
        let Some(keys) = self.incident.remove(town) else {
            return Vec::new();
        };
        keys.iter().filter_map(|key| self.remove_key(key)).collect()
    }

    /// 城镇的关联道路（插入顺序）
    pub fn of(&self, town: &str) -> Vec<&Road> {
        self.incident
            .get(town)
            .map(|keys| keys.iter().filter_map(|key| self.roads.get(key)).collect())
            .unwrap_or_default()
    }

    /// 全部道路，每条一次
    pub fn iter(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn towns(names: &[&str]) -> TownIndex {
        let mut index = TownIndex::default();
        for name in names {
            index.insert(TownName::new(*name).unwrap());
        }
        index
    }

    #[test]
    fn test_town_index() {
        let mut index = TownIndex::default();
        assert!(index.insert(TownName::new("Rockville").unwrap()));
        assert!(!index.insert(TownName::new("Rockville").unwrap()));
        assert!(index.insert(TownName::new("Bethesda").unwrap()));

        let names: Vec<&str> = index.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Bethesda", "Rockville"]);
        assert!(index.remove("Rockville").is_some());
        assert!(!index.contains("Rockville"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_road_index_lookup() {
        let towns = towns(&["A", "B", "C"]);
        let mut roads = RoadIndex::default();
        roads.add_road(&towns, "A", "B", 5, "Route 9").unwrap();
        roads.add_road(&towns, "B", "A", 7, "Route 1").unwrap();
        roads.add_road(&towns, "B", "C", 3, "Route 2").unwrap();

        assert_eq!(roads.get("A", "B").unwrap().name(), "Route 1");
        assert_eq!(roads.get("B", "A").unwrap().name(), "Route 1");
        assert!(roads.get("A", "C").is_none());

        let between: Vec<&str> = roads.between("A", "B").iter().map(|r| r.name()).collect();
        assert_eq!(between, vec!["Route 1", "Route 9"]);
        assert_eq!(roads.of("B").len(), 3);
        assert_eq!(roads.iter().count(), 3);
    }

    #[test]
    fn test_road_index_rejects_bad_roads() {
        let towns = towns(&["A", "B"]);
        let mut roads = RoadIndex::default();

        assert!(matches!(
            roads.add_road(&towns, "A", "Z", 1, "R"),
            Err(Error::MissingEndpoint(t)) if t == "Z"
        ));
        assert!(matches!(
            roads.add_road(&towns, "A", "A", 1, "R"),
            Err(Error::MalformedRoad(_))
        ));
        assert!(matches!(
            roads.add_road(&towns, "A", "B", -1, "R"),
            Err(Error::MalformedRoad(_))
        ));
        assert!(matches!(
            roads.add_road(&towns, "A", "B", i64::MAX, "R"),
            Err(Error::MalformedRoad(_))
        ));
        assert!(matches!(
            roads.add_road(&towns, "A", "B", MAX_ROAD_WEIGHT as i64 + 1, "R"),
            Err(Error::MalformedRoad(_))
        ));
        assert_eq!(roads.len(), 0);
        roads.add_road(&towns, "A", "B", 1, "R").unwrap();
        assert!(matches!(
            roads.add_road(&towns, "B", "A", 2, "R"),
            Err(Error::DuplicateRoad { .. })
        ));
        assert_eq!(roads.len(), 1);
    }

    #[test]
    fn test_road_index_remove() {
        let towns = towns(&["A", "B", "C"]);
        let mut roads = RoadIndex::default();
        roads.add_road(&towns, "A", "B", 5, "R1").unwrap();
        roads.add_road(&towns, "A", "C", 5, "R2").unwrap();

        assert!(roads.remove("A", "B", "R2").is_none());
        assert_eq!(roads.remove("B", "A", "R1").unwrap().weight(), 5);
        assert!(roads.of("B").is_empty());
        assert_eq!(roads.of("A").len(), 1);

        let removed = roads.remove_incident("C");
        assert_eq!(removed.len(), 1);
        assert_eq!(roads.len(), 0);
        assert!(roads.of("A").is_empty());
    }
}
