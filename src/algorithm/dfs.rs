//! 迭代式深度优先寻路
//!
//! 按注册顺序依次尝试出弧，返回第一条到达汇点的路径。
//! 每个顶点在一次搜索中至多进入一次。

use crate::graph::{ArcId, ArcView, ResidualGraph};
use crate::types::VertexId;

/// 查找一条从 `source` 到 `sink`、每条弧都满足 `admissible` 的路径
///
/// 返回按源到汇顺序排列的弧；`visits` 累加进入的顶点数。
pub fn first_path<F>(
    graph: &ResidualGraph,
    source: VertexId,
    sink: VertexId,
    visits: &mut u64,
    admissible: F,
) -> Option<Vec<ArcId>>
where
    F: Fn(&ArcView<'_>) -> bool,
{
    let mut visited = vec![false; graph.vertex_count()];
    visited[source] = true;
    *visits += 1;
    if source == sink {
        return Some(Vec::new());
    }

    // (顶点, 下一条待尝试出弧的位置)
    let mut stack: Vec<(VertexId, usize)> = vec![(source, 0)];
    let mut path: Vec<ArcId> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let arcs = graph.arcs_from(frame.0);
        let Some(&arc_id) = arcs.get(frame.1) else {
            // 出弧耗尽，回溯
            stack.pop();
            path.pop();
            continue;
        };
        frame.1 += 1;

        let arc = graph.arc(arc_id);
        let to = arc.to();
        if visited[to] || !admissible(&arc) {
            continue;
        }

        visited[to] = true;
        *visits += 1;
        path.push(arc_id);
        if to == sink {
            return Some(path);
        }
        stack.push((to, 0));
    }

    None
}
