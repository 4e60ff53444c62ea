//! 通用类型定义

/// 顶点 ID（稠密下标 `0..n`）
pub type VertexId = usize;

/// 边 ID（由调用方指定）
pub type EdgeId = usize;

/// 价格、势能与总费用
pub type Cost = i64;

/// 容量与带符号流量
pub type Capacity = i64;

/// 源点固定为 0 号顶点
pub const SOURCE: VertexId = 0;

/// 汇点（`n - 1` 号顶点）
pub fn sink_of(vertex_count: usize) -> Option<VertexId> {
    vertex_count.checked_sub(1)
}
