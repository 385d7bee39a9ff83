//! 图核心模块
//!
//! 定义城镇、道路和道路网络图的核心数据结构

mod graph;
mod index;
mod road;
mod town;

pub(crate) use graph::GraphState;
pub use graph::TownGraph;
pub use road::{EndpointPair, Road, RoadKey, MAX_ROAD_WEIGHT};
pub use town::{Town, TownName};
