//! 流网络模块
//!
//! 定义边、弧句柄和残量图

mod edge;
mod graph;

pub use edge::{ArcId, ArcView, FlowEdge, Orientation};
pub use graph::ResidualGraph;
