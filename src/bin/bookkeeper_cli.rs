use bookkeeper::{cli::run_cli, init};
use colored::Colorize;

fn main() {
    init();

    if let Err(err) = run_cli() {
        eprintln!("{} {err}", "Error:".red().bold());
        std::process::exit(1);
    }
}
