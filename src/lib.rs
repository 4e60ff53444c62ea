//! CostFlow - 单位流最小费用流与路径分解
//!
//! 在带容量、带价格的图上求 `k` 单位的最小费用流：
//! - 残量图：每条边一份存储，正向弧与镜像弧共享流量计数器
//! - 带势能的 Dijkstra + 逐单位增广（连续最短路）
//! - 把最终流量分解为 `k` 条源到汇的路径

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod types;

// 重导出常用类型
pub use algorithm::{FlowPath, FlowSolution, MinCostFlow};
pub use error::{Error, Result};
pub use graph::{ArcId, FlowEdge, Orientation, ResidualGraph};
pub use import::Problem;
pub use metrics::SolveStats;
pub use types::{Capacity, Cost, EdgeId, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
