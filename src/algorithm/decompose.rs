//! 流分解
//!
//! 把最终流量逐单位拆成源到汇的路径。提取会扣减流量，是破坏性操作。

use crate::algorithm::dfs::first_path;
use crate::graph::ResidualGraph;
use crate::types::{Cost, EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// 一条单位流路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPath {
    /// 边 ID 序列（源到汇）
    pub edges: Vec<EdgeId>,
    /// 顶点序列，比边多一个
    pub vertices: Vec<VertexId>,
    /// 路径上边的基础价格之和
    pub cost: Cost,
}

impl FlowPath {
    /// 路径边数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// 沿正流量弧提取一条路径，并把路径上每条弧的流量减 1
pub fn extract_path(
    graph: &mut ResidualGraph,
    source: VertexId,
    sink: VertexId,
    visits: &mut u64,
) -> Option<FlowPath> {
    let arcs = first_path(graph, source, sink, visits, |arc| arc.flow() > 0)?;

    let mut path = FlowPath {
        edges: Vec::with_capacity(arcs.len()),
        vertices: Vec::with_capacity(arcs.len() + 1),
        cost: 0,
    };
    path.vertices.push(source);
    for &arc_id in &arcs {
        // 正流量方向上的有效价格即基础价格
        let arc = graph.arc(arc_id);
        path.edges.push(arc.id());
        path.vertices.push(arc.to());
        path.cost += arc.price();
    }
    for &arc_id in &arcs {
        graph.pass_flow(arc_id, -1);
    }

    Some(path)
}
