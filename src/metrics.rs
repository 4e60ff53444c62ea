//! 求解过程统计
//!
//! 记录每次求解的轮数与搜索开销，可序列化导出

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 求解统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// 成功的增广轮数
    pub rounds: u64,
    /// Dijkstra 出堆次数（含过期条目）
    pub heap_pops: u64,
    /// Dijkstra 松弛成功次数
    pub relaxations: u64,
    /// 增广 DFS 访问的顶点数
    pub augment_visits: u64,
    /// 路径提取 DFS 访问的顶点数
    pub extract_visits: u64,
    /// 已提取的路径数
    pub paths_extracted: u64,
    /// 构建流量耗时（微秒）
    pub build_duration_us: u64,
}

impl SolveStats {
    pub(crate) fn record_build(&mut self, duration: Duration) {
        self.build_duration_us += duration.as_micros() as u64;
    }

    /// 每轮平均出堆次数
    pub fn avg_heap_pops(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.heap_pops as f64 / self.rounds as f64
        }
    }
}
