//! 残量图
//!
//! 边集中存放在一个数组里，邻接表只保存 `ArcId` 下标。

use crate::error::{Error, Result};
use crate::graph::edge::{ArcId, ArcView, FlowEdge, Orientation};
use crate::types::{Capacity, Cost, EdgeId, VertexId};

/// 残量图
#[derive(Debug, Clone, Default)]
pub struct ResidualGraph {
    /// 所有正向边
    edges: Vec<FlowEdge>,
    /// 每个顶点的出弧（按注册顺序）
    adjacency: Vec<Vec<ArcId>>,
}

impl ResidualGraph {
    /// 创建含 `vertex_count` 个顶点的空图
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 添加一条边，同时在两端登记正向弧与镜像弧
    ///
    /// 自环不会出现在任何源汇路径上，直接忽略并返回 `Ok(None)`。
    /// 每条边两个方向都可走，负价格会与自身镜像构成负环，因此拒绝。
    pub fn add_edge(
        &mut self,
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        capacity: Capacity,
        price: Cost,
    ) -> Result<Option<ArcId>> {
        let count = self.vertex_count();
        for vertex in [from, to] {
            if vertex >= count {
                return Err(Error::VertexOutOfRange { vertex, count });
            }
        }
        if from == to {
            return Ok(None);
        }
        if price < 0 {
            return Err(Error::NegativePrice { edge: id, price });
        }

        let index = self.edges.len();
        self.edges.push(FlowEdge::new(id, from, to, capacity, price));

        let forward = ArcId::new(index, Orientation::Forward);
        self.adjacency[from].push(forward);
        self.adjacency[to].push(forward.reverse());

        Ok(Some(forward))
    }

    /// 顶点的出弧
    pub fn arcs_from(&self, vertex: VertexId) -> &[ArcId] {
        &self.adjacency[vertex]
    }

    /// 弧的只读视图
    pub fn arc(&self, arc: ArcId) -> ArcView<'_> {
        ArcView::new(&self.edges[arc.edge], arc.orientation)
    }

    /// 所有弧（两个方向）
    pub fn arcs(&self) -> impl Iterator<Item = ArcView<'_>> + '_ {
        self.adjacency
            .iter()
            .flat_map(move |arcs| arcs.iter().map(move |&arc| self.arc(arc)))
    }

    /// 沿弧推送流量
    ///
    /// 一次逻辑推送只能经由一个方向调用，两个方向共享同一计数器。
    pub fn pass_flow(&mut self, arc: ArcId, delta: Capacity) {
        self.edges[arc.edge].pass_flow(arc.orientation, delta);
    }

    pub fn edge(&self, index: usize) -> Option<&FlowEdge> {
        self.edges.get(index)
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    /// 各顶点的 (流出, 流入) 正流量之和
    pub fn flow_balance(&self) -> Vec<(Capacity, Capacity)> {
        let mut balance = vec![(0, 0); self.vertex_count()];
        for arc in self.arcs() {
            let flow = arc.flow();
            if flow > 0 {
                balance[arc.from()].0 += flow;
                balance[arc.to()].1 += flow;
            }
        }
        balance
    }
}
