//! TownGraph - 城镇道路网络图
//!
//! 内存中的无向带权多重图，支持：
//! - 城镇与道路的增删查，删除城镇时级联删除道路
//! - 与方向无关的道路查找
//! - 确定性的 Dijkstra 最短路径
//! - 逐行文本批量导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod manager;

// 重导出常用类型
pub use algorithm::{PathFinder, PathResult, PathStep, ShortestPathTree};
pub use error::{Error, Result};
pub use graph::{Road, Town, TownGraph, TownName};
pub use import::{ImportStats, RoadImporter};
pub use manager::TownGraphManager;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
