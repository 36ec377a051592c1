use std::fmt;

use colored::Colorize;

pub fn info(message: impl fmt::Display) {
    println!("{}", message);
}

pub fn success(message: impl fmt::Display) {
    println!("{}", message.to_string().bright_green());
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", format!("WARNING: {}", message).bright_yellow());
}

pub fn error(message: impl fmt::Display) {
    println!("{}", format!("ERROR: {}", message).bright_red());
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", format!("=== {} ===", title).bold());
}

/// Balance line colored by the display status flag.
pub fn balance(message: impl fmt::Display, positive: bool) {
    let text = message.to_string();
    if positive {
        println!("{}", text.bright_green());
    } else {
        println!("{}", text.bright_red());
    }
}
