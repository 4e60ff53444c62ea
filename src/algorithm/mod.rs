//! 图算法模块
//!
//! 包含带势能的最短路、最小费用流增广和流分解

mod decompose;
mod dfs;
mod dijkstra;
mod min_cost_flow;

pub use decompose::{extract_path, FlowPath};
pub use dfs::first_path;
pub use dijkstra::{reduced_cost, shortest_distances, update_potentials};
pub use min_cost_flow::{FlowSolution, MinCostFlow};
