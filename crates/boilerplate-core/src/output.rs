//! Console output helpers shared by the commands

use colored::Colorize;

pub fn header(message: &str) {
    println!("{}", message.blue());
}

pub fn info(message: &str) {
    println!("{}", message.cyan());
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", message.red());
}

pub fn gray(message: &str) {
    println!("{}", message.dimmed());
}

/// Print a boxed section title
pub fn banner(title: &str) {
    let rule = "=".repeat(40);
    header(&rule);
    header(&format!("{:^40}", title));
    header(&rule);
}

pub fn separator() {
    gray(&"-".repeat(38));
}
