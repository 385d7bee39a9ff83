//! 命令行交互模块

mod commands;
mod printer;

pub use commands::{execute_command, CommandResult};
pub use printer::{PrintMode, Printer};
