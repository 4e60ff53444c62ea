//! 边与弧定义
//!
//! 每条用户边在图中只存一份（正向边），反向弧通过 `Orientation::Mirror`
//! 与正向弧共享同一个带符号流量计数器。

use crate::types::{Capacity, Cost, EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// 弧的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// 与用户边同向
    Forward,
    /// 镜像（反向）
    Mirror,
}

impl Orientation {
    pub fn reverse(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Mirror,
            Orientation::Mirror => Orientation::Forward,
        }
    }
}

/// 弧句柄：边数组下标 + 方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArcId {
    pub(crate) edge: usize,
    pub(crate) orientation: Orientation,
}

impl ArcId {
    pub(crate) fn new(edge: usize, orientation: Orientation) -> Self {
        Self { edge, orientation }
    }

    /// 所属边在图中的下标
    pub fn edge_index(&self) -> usize {
        self.edge
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// 同一条边的另一个方向
    pub fn reverse(&self) -> ArcId {
        ArcId {
            edge: self.edge,
            orientation: self.orientation.reverse(),
        }
    }
}

/// 流网络中的边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    /// 边 ID
    id: EdgeId,
    /// 起点
    from: VertexId,
    /// 终点
    to: VertexId,
    /// 容量
    capacity: Capacity,
    /// 带符号流量，负值表示沿镜像方向流动
    flow: Capacity,
    /// 基础价格
    price: Cost,
}

impl FlowEdge {
    /// 创建新边（初始流量为 0）
    pub fn new(id: EdgeId, from: VertexId, to: VertexId, capacity: Capacity, price: Cost) -> Self {
        Self {
            id,
            from,
            to,
            capacity,
            flow: 0,
            price,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn price(&self) -> Cost {
        self.price
    }

    /// 带符号流量
    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// 按方向取端点 `(from, to)`
    pub fn endpoints(&self, orientation: Orientation) -> (VertexId, VertexId) {
        match orientation {
            Orientation::Forward => (self.from, self.to),
            Orientation::Mirror => (self.to, self.from),
        }
    }

    /// 沿给定方向的流量
    pub fn flow_along(&self, orientation: Orientation) -> Capacity {
        match orientation {
            Orientation::Forward => self.flow,
            Orientation::Mirror => -self.flow,
        }
    }

    /// 沿给定方向的有效价格
    ///
    /// 该方向上流量非负时为基础价格，否则取反（撤销已有流量可退回费用）。
    pub fn price_along(&self, orientation: Orientation) -> Cost {
        if self.flow_along(orientation) >= 0 {
            self.price
        } else {
            -self.price
        }
    }

    /// 沿给定方向的剩余容量
    pub fn residual_along(&self, orientation: Orientation) -> Capacity {
        let flow = self.flow_along(orientation);
        if flow >= 0 {
            self.capacity - flow
        } else {
            -flow
        }
    }

    /// 沿给定方向推送 `delta` 单位流量
    pub(crate) fn pass_flow(&mut self, orientation: Orientation, delta: Capacity) {
        match orientation {
            Orientation::Forward => self.flow += delta,
            Orientation::Mirror => self.flow -= delta,
        }
    }
}

/// 弧的只读视图
///
/// 图搜索代码通过它统一访问正向弧与镜像弧。
#[derive(Debug, Clone, Copy)]
pub struct ArcView<'g> {
    edge: &'g FlowEdge,
    orientation: Orientation,
}

impl<'g> ArcView<'g> {
    pub(crate) fn new(edge: &'g FlowEdge, orientation: Orientation) -> Self {
        Self { edge, orientation }
    }

    pub fn id(&self) -> EdgeId {
        self.edge.id
    }

    pub fn from(&self) -> VertexId {
        self.edge.endpoints(self.orientation).0
    }

    pub fn to(&self) -> VertexId {
        self.edge.endpoints(self.orientation).1
    }

    pub fn flow(&self) -> Capacity {
        self.edge.flow_along(self.orientation)
    }

    pub fn price(&self) -> Cost {
        self.edge.price_along(self.orientation)
    }

    pub fn residual(&self) -> Capacity {
        self.edge.residual_along(self.orientation)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}
