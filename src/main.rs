//! The runner for Jot
use clap::Parser;
use jot::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    jot::run(Args::parse())
}
