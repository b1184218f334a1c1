//! Main benchmark harness CLI executable.

use layerbench::errors::HarnessResult;
use layerbench::ScenarioRunner;
use log::error;
use std::env;

fn main() {
    // Initialize logger
    env_logger::init();

    let result = run_scenarios();

    if let Err(e) = result {
        error!("Benchmark scenario failed: {}", e);
        std::process::exit(1);
    }
}

fn run_scenarios() -> HarnessResult<()> {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => {
            // No arguments - run all scenarios
            ScenarioRunner::run_all_scenarios()
        }
        2 => match args[1].as_str() {
            "--list" => {
                ScenarioRunner::list_scenarios();
                Ok(())
            }
            scenario_name => ScenarioRunner::run_scenario(scenario_name),
        },
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  cargo run --bin layerbench --release             # Run all scenarios");
    println!("  cargo run --bin layerbench --release -- --list   # List available scenarios");
    println!("  cargo run --bin layerbench --release -- <name>   # Run specific scenario");
    println!();
    println!("Available scenarios:");
    println!("  dense - Repeated fully connected layer against run-linear variants");
    println!("  conv  - Repeated 2D convolution against run-conv variants");
}
