// src/symbols.rs

use colored::{ColoredString, Colorize};
use std::sync::LazyLock;

pub static ERROR: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());
pub static INFO: LazyLock<ColoredString> = LazyLock::new(|| "[i]".cyan());
