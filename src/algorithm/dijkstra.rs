//! 带势能的 Dijkstra 最短路
//!
//! 边权取约化费用 `h[from] + price - h[to]`，只经过剩余容量为正的弧。

use crate::graph::{ArcView, ResidualGraph};
use crate::metrics::SolveStats;
use crate::types::{Cost, VertexId};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// 约化费用
pub fn reduced_cost(arc: &ArcView<'_>, potentials: &[Cost]) -> Cost {
    potentials[arc.from()] + arc.price() - potentials[arc.to()]
}

/// 从 `source` 出发的约化费用最短距离，不可达为 `None`
pub fn shortest_distances(
    graph: &ResidualGraph,
    potentials: &[Cost],
    source: VertexId,
    stats: &mut SolveStats,
) -> Vec<Option<Cost>> {
    let mut distances: Vec<Option<Cost>> = vec![None; graph.vertex_count()];
    if source >= graph.vertex_count() {
        return distances;
    }

    let mut queue = BinaryHeap::new();
    distances[source] = Some(0);
    queue.push(Reverse((0, source)));

    while let Some(Reverse((distance, vertex))) = queue.pop() {
        stats.heap_pops += 1;
        // 惰性删除：跳过过期条目
        if distances[vertex] != Some(distance) {
            continue;
        }

        for &arc_id in graph.arcs_from(vertex) {
            let arc = graph.arc(arc_id);
            if arc.residual() <= 0 {
                continue;
            }
            let candidate = distance + reduced_cost(&arc, potentials);
            let to = arc.to();
            if distances[to].map_or(true, |current| candidate < current) {
                distances[to] = Some(candidate);
                queue.push(Reverse((candidate, to)));
                stats.relaxations += 1;
            }
        }
    }

    distances
}

/// 势能更新：`h[v] += d[v]`，不可达顶点保持原值
pub fn update_potentials(potentials: &mut [Cost], distances: &[Option<Cost>]) {
    for (potential, distance) in potentials.iter_mut().zip(distances) {
        if let Some(distance) = distance {
            *potential += distance;
        }
    }
}
