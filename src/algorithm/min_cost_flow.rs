//! 最小费用流
//!
//! 逐单位的连续最短增广路算法：每轮用带势能的 Dijkstra 更新势能
//! （Johnson 重赋权），再沿一条约化费用为 0 的路径推送 1 单位流量。
//! 顶点 0 为源点，顶点 `n - 1` 为汇点。

use crate::algorithm::decompose::{self, FlowPath};
use crate::algorithm::dfs::first_path;
use crate::algorithm::dijkstra::{reduced_cost, shortest_distances, update_potentials};
use crate::error::{Error, Result};
use crate::graph::{ArcId, ResidualGraph};
use crate::metrics::SolveStats;
use crate::types::{sink_of, Capacity, Cost, EdgeId, VertexId, SOURCE};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// 求解结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSolution {
    /// 流量单位数
    pub units: usize,
    /// 总费用
    pub total_cost: Cost,
    /// 流分解得到的路径
    pub paths: Vec<FlowPath>,
}

impl FlowSolution {
    /// 每单位平均费用
    pub fn average_cost(&self) -> f64 {
        if self.units == 0 {
            0.0
        } else {
            self.total_cost as f64 / self.units as f64
        }
    }
}

/// 最小费用流求解器
///
/// 生命周期：`add_edge` 建图 -> `build_flow` -> `total_cost` / `extract_path`。
#[derive(Debug, Clone)]
pub struct MinCostFlow {
    graph: ResidualGraph,
    /// 顶点势能
    potentials: Vec<Cost>,
    /// 已增广的单位数
    routed: usize,
    /// 已提取的路径数
    extracted: usize,
    built: bool,
    stats: SolveStats,
}

impl MinCostFlow {
    /// 创建含 `vertex_count` 个顶点的求解器
    pub fn new(vertex_count: usize) -> Self {
        Self {
            graph: ResidualGraph::new(vertex_count),
            potentials: vec![0; vertex_count],
            routed: 0,
            extracted: 0,
            built: false,
            stats: SolveStats::default(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn source(&self) -> VertexId {
        SOURCE
    }

    pub fn sink(&self) -> Option<VertexId> {
        sink_of(self.vertex_count())
    }

    pub fn graph(&self) -> &ResidualGraph {
        &self.graph
    }

    pub fn potentials(&self) -> &[Cost] {
        &self.potentials
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// 已增广的单位数
    pub fn routed(&self) -> usize {
        self.routed
    }

    /// 添加一条边
    ///
    /// 自环与 `build_flow` 之后加入的边被忽略，返回 `Ok(None)`；
    /// 顶点越界或价格为负返回错误。
    pub fn add_edge(
        &mut self,
        id: EdgeId,
        from: VertexId,
        to: VertexId,
        capacity: Capacity,
        price: Cost,
    ) -> Result<Option<ArcId>> {
        if self.built {
            warn!(id, from, to, "flow already built, edge ignored");
            return Ok(None);
        }
        self.graph.add_edge(id, from, to, capacity, price)
    }

    /// 最多增广 `limit` 单位流量，返回成功增广的单位数
    ///
    /// 返回值小于 `limit` 表示不存在更多增广路。
    pub fn build_flow(&mut self, limit: usize) -> usize {
        let Some(sink) = self.sink() else {
            return 0;
        };
        if self.extracted > 0 {
            warn!(
                extracted = self.extracted,
                "paths already extracted, refusing to augment"
            );
            return 0;
        }
        self.built = true;

        let start = Instant::now();
        let mut completed = 0;
        while completed < limit {
            let distances =
                shortest_distances(&self.graph, &self.potentials, SOURCE, &mut self.stats);
            update_potentials(&mut self.potentials, &distances);
            debug!(
                round = completed + 1,
                sink_distance = ?distances[sink],
                "potentials updated"
            );

            if !self.augment(sink) {
                warn!(completed, limit, "no augmenting path left");
                break;
            }
            completed += 1;
        }

        self.routed += completed;
        self.stats.rounds += completed as u64;
        self.stats.record_build(start.elapsed());
        info!(
            routed = completed,
            limit,
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "flow built"
        );

        completed
    }

    /// 沿约化费用为 0 的剩余路径推送 1 单位流量
    fn augment(&mut self, sink: VertexId) -> bool {
        let potentials = &self.potentials;
        let Some(arcs) = first_path(
            &self.graph,
            SOURCE,
            sink,
            &mut self.stats.augment_visits,
            |arc| arc.residual() > 0 && reduced_cost(arc, potentials) == 0,
        ) else {
            return false;
        };

        trace!(length = arcs.len(), "augmenting path found");
        for arc in arcs {
            self.graph.pass_flow(arc, 1);
        }
        true
    }

    /// 当前流量的总费用
    ///
    /// 只在增广结束后有意义；提取路径会改变结果。
    pub fn total_cost(&self) -> Cost {
        self.graph
            .arcs()
            .filter(|arc| arc.flow() > 0)
            .map(|arc| arc.flow() * arc.price())
            .sum()
    }

    /// 提取一条单位流路径（源到汇顺序）
    ///
    /// 提取次数达到已增广单位数后返回 `None`。
    pub fn extract_path(&mut self) -> Option<FlowPath> {
        if self.extracted >= self.routed {
            return None;
        }
        let sink = self.sink()?;

        match decompose::extract_path(
            &mut self.graph,
            SOURCE,
            sink,
            &mut self.stats.extract_visits,
        ) {
            Some(path) => {
                trace!(edges = ?path.edges, cost = path.cost, "path extracted");
                self.extracted += 1;
                self.stats.paths_extracted += 1;
                Some(path)
            }
            None => {
                warn!(
                    extracted = self.extracted,
                    routed = self.routed,
                    "no positive-flow path left"
                );
                None
            }
        }
    }

    /// 提取所有剩余路径
    pub fn extract_paths(&mut self) -> Vec<FlowPath> {
        std::iter::from_fn(|| self.extract_path()).collect()
    }

    /// 增广 `units` 单位并分解为路径
    pub fn solve(&mut self, units: usize) -> Result<FlowSolution> {
        let routed = self.build_flow(units);
        if routed < units {
            return Err(Error::Infeasible {
                requested: units,
                routed,
            });
        }

        let total_cost = self.total_cost();
        let paths = self.extract_paths();
        if paths.len() != units {
            return Err(Error::AlgorithmError(format!(
                "期望 {} 条路径, 实际提取 {} 条",
                units,
                paths.len()
            )));
        }

        Ok(FlowSolution {
            units,
            total_cost,
            paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // 0 -> 1 -> 3 (1 + 1), 0 -> 2 -> 3 (5 + 5)
    fn create_diamond() -> MinCostFlow {
        let mut flow = MinCostFlow::new(4);
        flow.add_edge(0, 0, 1, 1, 1).unwrap();
        flow.add_edge(1, 1, 3, 1, 1).unwrap();
        flow.add_edge(2, 0, 2, 1, 5).unwrap();
        flow.add_edge(3, 2, 3, 1, 5).unwrap();
        flow
    }

    #[test]
    fn test_two_units_on_diamond() {
        let mut flow = create_diamond();

        assert_eq!(flow.build_flow(2), 2);
        assert_eq!(flow.total_cost(), 12);

        let mut paths = flow.extract_paths();
        paths.sort_by_key(|path| path.cost);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].vertices, vec![0, 1, 3]);
        assert_eq!(paths[0].edges, vec![0, 1]);
        assert_eq!(paths[0].cost, 2);
        assert_eq!(paths[1].vertices, vec![0, 2, 3]);
        assert_eq!(paths[1].edges, vec![2, 3]);
        assert_eq!(paths[1].cost, 10);
    }

    #[test]
    fn test_infeasible_request_returns_partial_count() {
        let mut flow = create_diamond();

        assert_eq!(flow.build_flow(3), 2);
        assert_eq!(flow.routed(), 2);
        assert!(flow.extract_path().is_some());
        assert!(flow.extract_path().is_some());
        assert!(flow.extract_path().is_none());
        assert!(flow.extract_path().is_none());
    }

    #[test]
    fn test_solve_reports_infeasible() {
        let mut flow = create_diamond();
        match flow.solve(3) {
            Err(Error::Infeasible { requested, routed }) => {
                assert_eq!(requested, 3);
                assert_eq!(routed, 2);
            }
            other => panic!("expected infeasible, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_diamond() {
        let mut flow = create_diamond();
        let solution = flow.solve(2).unwrap();

        assert_eq!(solution.units, 2);
        assert_eq!(solution.total_cost, 12);
        assert!((solution.average_cost() - 6.0).abs() < 1e-9);
        assert_eq!(flow.stats().rounds, 2);
        assert_eq!(flow.stats().paths_extracted, 2);
    }

    #[test]
    fn test_second_unit_cancels_shared_edge() {
        // 第一轮走 0-1-2-3，第二轮必须沿镜像弧撤销 1-2
        let mut flow = MinCostFlow::new(4);
        flow.add_edge(0, 0, 1, 1, 1).unwrap();
        flow.add_edge(1, 1, 2, 1, 1).unwrap();
        flow.add_edge(2, 2, 3, 1, 1).unwrap();
        flow.add_edge(3, 0, 2, 1, 2).unwrap();
        flow.add_edge(4, 1, 3, 1, 2).unwrap();

        assert_eq!(flow.build_flow(1), 1);
        assert_eq!(flow.total_cost(), 3);

        let mut flow = MinCostFlow::new(4);
        flow.add_edge(0, 0, 1, 1, 1).unwrap();
        flow.add_edge(1, 1, 2, 1, 1).unwrap();
        flow.add_edge(2, 2, 3, 1, 1).unwrap();
        flow.add_edge(3, 0, 2, 1, 2).unwrap();
        flow.add_edge(4, 1, 3, 1, 2).unwrap();

        assert_eq!(flow.build_flow(2), 2);
        assert_eq!(flow.total_cost(), 6);
        assert_eq!(flow.graph().edge(1).unwrap().flow(), 0);

        let paths = flow.extract_paths();
        assert_eq!(paths[0].edges, vec![0, 4]);
        assert_eq!(paths[1].edges, vec![3, 2]);
        assert!(paths.iter().all(|path| path.cost == 3));
    }

    #[test]
    fn test_edges_carry_flow_against_registration() {
        let mut flow = MinCostFlow::new(3);
        flow.add_edge(1, 1, 0, 1, 3).unwrap();
        flow.add_edge(2, 2, 1, 1, 4).unwrap();

        let solution = flow.solve(1).unwrap();
        assert_eq!(solution.total_cost, 7);
        assert_eq!(solution.paths[0].edges, vec![1, 2]);
        assert_eq!(solution.paths[0].vertices, vec![0, 1, 2]);
    }

    #[test]
    fn test_parallel_edges_cheapest_first() {
        let mut flow = MinCostFlow::new(2);
        flow.add_edge(1, 0, 1, 1, 9).unwrap();
        flow.add_edge(2, 0, 1, 1, 2).unwrap();
        flow.add_edge(3, 0, 1, 1, 5).unwrap();

        assert_eq!(flow.build_flow(2), 2);
        assert_eq!(flow.total_cost(), 7);
        assert_eq!(flow.graph().edge(0).unwrap().flow(), 0);
    }

    #[test]
    fn test_capacity_above_one() {
        let mut flow = MinCostFlow::new(3);
        flow.add_edge(0, 0, 1, 3, 1).unwrap();
        flow.add_edge(1, 1, 2, 2, 1).unwrap();
        flow.add_edge(2, 0, 2, 5, 10).unwrap();

        assert_eq!(flow.build_flow(4), 4);
        assert_eq!(flow.total_cost(), 2 * 2 + 2 * 10);
        assert_eq!(flow.extract_paths().len(), 4);
    }

    #[test]
    fn test_self_loop_and_disconnected() {
        let mut flow = MinCostFlow::new(3);
        flow.add_edge(0, 1, 1, 1, 1).unwrap();
        flow.add_edge(1, 0, 1, 1, 1).unwrap();

        assert_eq!(flow.edge_count(), 1);
        assert_eq!(flow.build_flow(1), 0);
        assert_eq!(flow.total_cost(), 0);
        assert!(flow.extract_path().is_none());
    }

    #[test]
    fn test_zero_limit() {
        let mut flow = create_diamond();
        assert_eq!(flow.build_flow(0), 0);
        let solution = flow.solve(0).unwrap();
        assert!(solution.paths.is_empty());
        assert_eq!(solution.average_cost(), 0.0);
    }

    #[test]
    fn test_degenerate_vertex_counts() {
        let mut empty = MinCostFlow::new(0);
        assert_eq!(empty.build_flow(3), 0);
        assert!(empty.extract_path().is_none());

        // 源点即汇点
        let mut single = MinCostFlow::new(1);
        assert_eq!(single.build_flow(2), 2);
        assert_eq!(single.total_cost(), 0);
        assert!(single.extract_path().unwrap().is_empty());
    }

    #[test]
    fn test_lifecycle_guards() {
        let mut flow = create_diamond();
        assert_eq!(flow.build_flow(1), 1);

        assert!(flow.add_edge(9, 0, 3, 1, 0).unwrap().is_none());
        assert_eq!(flow.edge_count(), 4);

        assert!(flow.extract_path().is_some());
        assert_eq!(flow.build_flow(1), 0);
        assert_eq!(flow.routed(), 1);
    }

    #[test]
    fn test_negative_price_rejected_before_solving() {
        let mut flow = MinCostFlow::new(3);
        flow.add_edge(0, 0, 1, 1, 1).unwrap();
        let err = flow.add_edge(1, 1, 2, 1, -1).unwrap_err();
        assert!(matches!(err, Error::NegativePrice { edge: 1, price: -1 }));

        // 被拒绝的边不进入图，求解正常结束
        assert_eq!(flow.edge_count(), 1);
        assert_eq!(flow.build_flow(1), 0);
    }

    #[test]
    fn test_out_of_range_edge_rejected() {
        let mut flow = MinCostFlow::new(2);
        let err = flow.add_edge(0, 0, 2, 1, 1).unwrap_err();
        assert!(matches!(err, Error::VertexOutOfRange { vertex: 2, count: 2 }));
        assert!(flow.add_edge(1, 0, 0, 1, 1).unwrap().is_none());
        assert!(flow.add_edge(2, 0, 1, 1, 1).unwrap().is_some());
        assert_eq!(flow.build_flow(1), 1);
    }

    #[test]
    fn test_potentials_accumulate() {
        let mut flow = create_diamond();
        flow.build_flow(2);
        assert_eq!(flow.potentials()[0], 0);
        // 汇点势能等于最后一轮增广路的实际费用
        assert_eq!(flow.potentials()[3], 10);
    }

    type EdgeSpec = (VertexId, VertexId, Cost);

    fn random_instance(rng: &mut StdRng, max_edges: usize) -> (usize, Vec<EdgeSpec>, usize) {
        let n = rng.gen_range(2..7);
        let m = rng.gen_range(1..=max_edges);
        let edges = (0..m)
            .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n), rng.gen_range(0..10)))
            .collect();
        (n, edges, rng.gen_range(1..4))
    }

    fn build(n: usize, edges: &[EdgeSpec]) -> MinCostFlow {
        let mut flow = MinCostFlow::new(n);
        for (id, &(from, to, price)) in edges.iter().enumerate() {
            flow.add_edge(id, from, to, 1, price).unwrap();
        }
        flow
    }

    /// 枚举每条边的流量 {-1, 0, 1}，求恰好 k 单位的最小费用
    fn brute_force_min_cost(n: usize, edges: &[EdgeSpec], k: usize) -> Option<Cost> {
        let edges: Vec<EdgeSpec> = edges.iter().copied().filter(|e| e.0 != e.1).collect();
        let mut best: Option<Cost> = None;
        let mut assignment = vec![-1i64; edges.len()];
        loop {
            let mut net = vec![0i64; n];
            let mut cost = 0;
            for (&(from, to, price), &f) in edges.iter().zip(&assignment) {
                net[from] -= f;
                net[to] += f;
                cost += f.abs() * price;
            }
            let conserved = (1..n - 1).all(|v| net[v] == 0);
            if conserved && net[n - 1] == k as i64 {
                best = Some(best.map_or(cost, |b: Cost| b.min(cost)));
            }

            // 三进制计数器
            let mut i = 0;
            while i < assignment.len() && assignment[i] == 1 {
                assignment[i] = -1;
                i += 1;
            }
            if i == assignment.len() {
                break;
            }
            assignment[i] += 1;
        }
        best
    }

    /// 无向图最短路（Floyd–Warshall）
    fn floyd(n: usize, edges: &[EdgeSpec]) -> Option<Cost> {
        let mut dist = vec![vec![None; n]; n];
        for (v, row) in dist.iter_mut().enumerate() {
            row[v] = Some(0);
        }
        for &(from, to, price) in edges {
            if from == to {
                continue;
            }
            for (a, b) in [(from, to), (to, from)] {
                if dist[a][b].map_or(true, |d| price < d) {
                    dist[a][b] = Some(price);
                }
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(a), Some(b)) = (dist[i][k], dist[k][j]) {
                        if dist[i][j].map_or(true, |d| a + b < d) {
                            dist[i][j] = Some(a + b);
                        }
                    }
                }
            }
        }
        dist[0][n - 1]
    }

    #[test]
    fn test_random_flow_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let (n, edges, k) = random_instance(&mut rng, 14);
            let mut flow = build(n, &edges);
            let routed = flow.build_flow(k);
            assert!(routed <= k);

            // 容量约束
            for edge in flow.graph().edges() {
                assert!(edge.flow().abs() <= edge.capacity());
            }

            // 流量守恒
            let balance = flow.graph().flow_balance();
            for (v, &(out, inc)) in balance.iter().enumerate() {
                if v == 0 {
                    assert_eq!(out - inc, routed as i64);
                } else if v == n - 1 {
                    assert_eq!(inc - out, routed as i64);
                } else {
                    assert_eq!(out, inc, "vertex {} not conserved", v);
                }
            }

            // 费用可加性与路径数
            let total = flow.total_cost();
            let paths = flow.extract_paths();
            assert_eq!(paths.len(), routed);
            assert_eq!(paths.iter().map(|p| p.cost).sum::<Cost>(), total);
            for path in &paths {
                assert_eq!(path.vertices.first(), Some(&0));
                assert_eq!(path.vertices.last(), Some(&(n - 1)));
                assert_eq!(path.vertices.len(), path.edges.len() + 1);
                let price_sum: Cost = path.edges.iter().map(|&id| edges[id].2).sum();
                assert_eq!(price_sum, path.cost);
            }
            assert!(flow.extract_path().is_none());
        }
    }

    #[test]
    fn test_random_cost_is_optimal() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..60 {
            let (n, edges, k) = random_instance(&mut rng, 8);
            let expected = brute_force_min_cost(n, &edges, k);

            let mut flow = build(n, &edges);
            let routed = flow.build_flow(k);
            match expected {
                Some(cost) => {
                    assert_eq!(routed, k, "edges {:?}", edges);
                    assert_eq!(flow.total_cost(), cost, "edges {:?}", edges);
                }
                None => assert!(routed < k, "edges {:?}", edges),
            }
        }
    }

    #[test]
    fn test_single_unit_matches_shortest_path() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (n, edges, _) = random_instance(&mut rng, 12);
            let mut flow = build(n, &edges);
            match floyd(n, &edges) {
                Some(distance) => {
                    assert_eq!(flow.build_flow(1), 1);
                    assert_eq!(flow.total_cost(), distance);
                }
                None => assert_eq!(flow.build_flow(1), 0),
            }
        }
    }
}
