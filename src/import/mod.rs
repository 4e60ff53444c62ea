//! 输入读取模块
//!
//! 格式：首行 `n m k`（顶点数、边数、路径数），随后 `m` 行 `from to price`。
//! 顶点从 1 开始编号，边 ID 依次为 `1..=m`，每条边容量为 1。

use crate::algorithm::MinCostFlow;
use crate::error::{Error, Result};
use crate::types::{Capacity, Cost, EdgeId, VertexId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

/// 输入中每条边的容量
pub const EDGE_CAPACITY: Capacity = 1;

/// 一条输入边（顶点已转为 0 起始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub from: VertexId,
    pub to: VertexId,
    pub price: Cost,
}

/// 一个问题实例
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// 顶点数
    pub vertex_count: usize,
    /// 需要的路径数
    pub paths: usize,
    pub edges: Vec<EdgeRecord>,
}

impl Problem {
    /// 从文本解析
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = Tokens::new(input);

        let vertex_count: usize = tokens.next("顶点数")?;
        let edge_count: usize = tokens.next("边数")?;
        let paths: usize = tokens.next("路径数")?;

        let mut edges = Vec::with_capacity(edge_count);
        for index in 0..edge_count {
            let id = index + 1;
            let from = tokens.vertex(vertex_count, id)?;
            let to = tokens.vertex(vertex_count, id)?;
            let price: Cost = tokens.next("价格")?;
            if price < 0 {
                return Err(Error::NegativePrice { edge: id, price });
            }
            edges.push(EdgeRecord {
                id,
                from,
                to,
                price,
            });
        }

        Ok(Self {
            vertex_count,
            paths,
            edges,
        })
    }

    /// 从任意输入流读取
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// 从文件读取
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// 构建求解器
    pub fn to_flow(&self) -> Result<MinCostFlow> {
        let mut flow = MinCostFlow::new(self.vertex_count);
        for edge in &self.edges {
            flow.add_edge(edge.id, edge.from, edge.to, EDGE_CAPACITY, edge.price)?;
        }
        Ok(flow)
    }
}

/// 空白分隔的记号流
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    fn next<T: FromStr>(&mut self, field: &str) -> Result<T> {
        self.position += 1;
        let token = self.inner.next().ok_or_else(|| {
            Error::ParseError(format!("第 {} 个记号缺失, 期望{}", self.position, field))
        })?;
        token.parse().map_err(|_| {
            Error::ParseError(format!(
                "第 {} 个记号 '{}' 不是合法的{}",
                self.position, token, field
            ))
        })
    }

    /// 读取 1 起始的顶点编号并转为 0 起始
    fn vertex(&mut self, vertex_count: usize, edge: EdgeId) -> Result<VertexId> {
        let vertex: usize = self.next(&format!("顶点 (边 {})", edge))?;
        if vertex == 0 || vertex > vertex_count {
            return Err(Error::VertexOutOfRange {
                vertex,
                count: vertex_count,
            });
        }
        Ok(vertex - 1)
    }
}
