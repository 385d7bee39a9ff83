//! 道路定义
//!
//! 无向带权道路：端点无序，身份由 (端点对, 名称) 决定，权重不参与比较

use crate::graph::town::TownName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 单条道路的距离上限
///
/// 任意简单路径最多经过 `城镇数 - 1` 条道路，距离累加不会溢出 `u64`。
pub const MAX_ROAD_WEIGHT: u64 = u32::MAX as u64;

/// 无序端点对（内部按名称升序存放）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointPair {
    low: TownName,
    high: TownName,
}

impl EndpointPair {
    pub fn new(a: TownName, b: TownName) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// 与查询方向无关的端点匹配
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        self.low == low && self.high == high
    }

    pub fn low(&self) -> &TownName {
        &self.low
    }

    pub fn high(&self) -> &TownName {
        &self.high
    }
}

/// 道路身份键
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadKey {
    pub pair: EndpointPair,
    pub name: String,
}

/// 道路
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    /// 插入时的起点（仅用于展示）
    source: TownName,
    /// 插入时的终点（仅用于展示）
    destination: TownName,
    /// 距离
    weight: u64,
    /// 道路名称
    name: String,
}

impl Road {
    pub fn new(
        source: TownName,
        destination: TownName,
        weight: u64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            destination,
            weight,
            name: name.into(),
        }
    }

    pub fn source(&self) -> &TownName {
        &self.source
    }

    pub fn destination(&self) -> &TownName {
        &self.destination
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 无序端点对
    pub fn pair(&self) -> EndpointPair {
        EndpointPair::new(self.source.clone(), self.destination.clone())
    }

    /// 身份键
    pub fn key(&self) -> RoadKey {
        RoadKey {
            pair: self.pair(),
            name: self.name.clone(),
        }
    }

    /// 是否以该城镇为端点
    pub fn is_incident(&self, town: &str) -> bool {
        self.source == town || self.destination == town
    }

    /// 从一端出发到达的另一端
    pub fn opposite(&self, town: &str) -> Option<&TownName> {
        if self.source == town {
            Some(&self.destination)
        } else if self.destination == town {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// 身份相等：端点对与名称相同即视为同一条道路
impl PartialEq for Road {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pair() == other.pair()
    }
}

impl Eq for Road {}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {}, {})",
            self.name, self.source, self.destination, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town(name: &str) -> TownName {
        TownName::new(name).unwrap()
    }

    #[test]
    fn test_pair_is_orientation_independent() {
        let ab = EndpointPair::new(town("A"), town("B"));
        let ba = EndpointPair::new(town("B"), town("A"));
        assert_eq!(ab, ba);
        assert!(ab.matches("B", "A"));
        assert!(ab.matches("A", "B"));
        assert!(!ab.matches("A", "C"));
    }

    #[test]
    fn test_road_identity_ignores_weight_and_orientation() {
        let r1 = Road::new(town("A"), town("B"), 5, "Main St");
        let r2 = Road::new(town("B"), town("A"), 9, "Main St");
        let r3 = Road::new(town("A"), town("B"), 5, "Elm St");
        assert_eq!(r1, r2);
        assert_eq!(r1.key(), r2.key());
        assert_ne!(r1, r3);
    }

    #[test]
    fn test_road_opposite() {
        let road = Road::new(town("A"), town("B"), 5, "Main St");
        assert_eq!(road.opposite("A"), Some(&town("B")));
        assert_eq!(road.opposite("B"), Some(&town("A")));
        assert_eq!(road.opposite("C"), None);
        assert!(road.is_incident("B"));
    }
}
