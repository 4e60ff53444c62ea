//! CostFlow 求解工具
//!
//! 读取 `n m k` 与边列表，输出平均费用和 `k` 条路径

use anyhow::Context;
use clap::Parser;
use costflow::cli::{OutputFormat, Printer, PrinterConfig};
use costflow::{Error, Problem};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "costflow-solve")]
#[command(about = "最小费用流路径求解工具", version)]
struct Args {
    /// 输入文件路径（缺省读标准输入）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 平均费用的小数位数
    #[arg(short, long, default_value = "8")]
    precision: usize,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// 在标准错误输出求解统计
    #[arg(long)]
    stats: bool,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let problem = match &args.input {
        Some(path) => Problem::from_path(path)
            .with_context(|| format!("读取输入失败: {}", path.display()))?,
        None => Problem::from_reader(io::stdin().lock()).context("读取标准输入失败")?,
    };
    tracing::info!(
        vertices = problem.vertex_count,
        edges = problem.edges.len(),
        paths = problem.paths,
        "problem loaded"
    );

    let printer = Printer::new(PrinterConfig {
        format: args.format,
        precision: args.precision,
    });

    let mut flow = problem.to_flow().context("构建流网络失败")?;
    let output = match flow.solve(problem.paths) {
        Ok(solution) => printer.render_solution(&solution)?,
        Err(Error::Infeasible { requested, routed }) => {
            printer.render_infeasible(requested, routed)?
        }
        Err(err) => return Err(err).context("求解失败"),
    };
    print!("{}", output);

    if args.stats {
        eprintln!("{}", serde_json::to_string_pretty(flow.stats())?);
    }

    Ok(())
}
