//! 结果打印器
//!
//! 支持纯文本、JSON 与表格三种输出

use crate::algorithm::FlowSolution;
use crate::error::Result;
use clap::ValueEnum;
use prettytable::{format, row, Table};
use serde::Serialize;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 平均费用 + 每行一条路径
    Text,
    /// JSON
    Json,
    /// 表格
    Table,
}

/// 打印配置
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    /// 平均费用的小数位数
    pub precision: usize,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            precision: 8,
        }
    }
}

/// 不可行时的文本输出
pub const INFEASIBLE_TOKEN: &str = "-1";

#[derive(Serialize)]
struct SolvedReport<'a> {
    feasible: bool,
    average_cost: f64,
    #[serde(flatten)]
    solution: &'a FlowSolution,
}

#[derive(Serialize)]
struct InfeasibleReport {
    feasible: bool,
    requested: usize,
    routed: usize,
}

/// 结果打印器
#[derive(Debug, Clone, Default)]
pub struct Printer {
    config: PrinterConfig,
}

impl Printer {
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    /// 输出求解结果
    pub fn render_solution(&self, solution: &FlowSolution) -> Result<String> {
        let output = match self.config.format {
            OutputFormat::Text => self.format_text(solution),
            OutputFormat::Json => {
                let report = SolvedReport {
                    feasible: true,
                    average_cost: solution.average_cost(),
                    solution,
                };
                serde_json::to_string_pretty(&report)? + "\n"
            }
            OutputFormat::Table => self.format_table(solution),
        };
        Ok(output)
    }

    /// 输出不可行结果
    pub fn render_infeasible(&self, requested: usize, routed: usize) -> Result<String> {
        let output = match self.config.format {
            OutputFormat::Text => format!("{}\n", INFEASIBLE_TOKEN),
            OutputFormat::Json => {
                let report = InfeasibleReport {
                    feasible: false,
                    requested,
                    routed,
                };
                serde_json::to_string_pretty(&report)? + "\n"
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table.set_format(*format::consts::FORMAT_BOX_CHARS);
                table.set_titles(row!["Requested", "Routed"]);
                table.add_row(row![requested.to_string(), routed.to_string()]);
                format!("Infeasible\n{}", table)
            }
        };
        Ok(output)
    }

    /// 纯文本格式
    fn format_text(&self, solution: &FlowSolution) -> String {
        let mut output = format!(
            "{:.precision$}\n",
            solution.average_cost(),
            precision = self.config.precision
        );
        for path in &solution.paths {
            output.push_str(&path.len().to_string());
            for edge in &path.edges {
                output.push(' ');
                output.push_str(&edge.to_string());
            }
            output.push('\n');
        }
        output
    }

    /// 表格格式
    fn format_table(&self, solution: &FlowSolution) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["#", "Length", "Cost", "Edges"]);

        for (i, path) in solution.paths.iter().enumerate() {
            let edges: Vec<String> = path.edges.iter().map(|e| e.to_string()).collect();
            table.add_row(row![
                (i + 1).to_string(),
                path.len().to_string(),
                path.cost.to_string(),
                edges.join(" ")
            ]);
        }

        format!(
            "{}Total cost: {}, average: {:.precision$}\n",
            table,
            solution.total_cost,
            solution.average_cost(),
            precision = self.config.precision
        )
    }
}
