//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("城镇不存在: {0}")]
    TownNotFound(String),

    #[error("无效的城镇名称: {0:?}")]
    InvalidTownName(String),

    #[error("道路端点不存在: {0}")]
    MissingEndpoint(String),

    #[error("无效的道路: {0}")]
    MalformedRoad(String),

    #[error("道路已存在: {name} ({source_town} - {destination_town})")]
    DuplicateRoad {
        source_town: String,
        destination_town: String,
        name: String,
    },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}
