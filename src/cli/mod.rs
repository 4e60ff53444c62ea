//! 命令行输出模块

mod printer;

pub use printer::{OutputFormat, Printer, PrinterConfig, INFEASIBLE_TOKEN};
