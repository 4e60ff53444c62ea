//! 错误类型定义

use crate::types::{Cost, EdgeId, VertexId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("顶点下标越界: {vertex} (顶点数 {count})")]
    VertexOutOfRange { vertex: VertexId, count: usize },

    #[error("边 {edge} 的价格为负: {price}")]
    NegativePrice { edge: EdgeId, price: Cost },

    #[error("流量不可行: 需要 {requested} 单位, 仅增广 {routed} 单位")]
    Infeasible { requested: usize, routed: usize },

    #[error("算法错误: {0}")]
    AlgorithmError(String),

    #[error("序列化错误: {0}")]
    SerializationError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
