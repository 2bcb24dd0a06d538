// simulation_main.rs
use std::env;
use std::io;
use std::process::ExitCode;

use car_simulation::cli::menu::Menu;
use car_simulation::cli::scenario::Scenario;

fn main() -> ExitCode {
    env_logger::init();

    match env::args().nth(1) {
        Some(path) => run_scenario(&path),
        None => run_interactive(),
    }
}

/// Scripted mode: load a scenario file, run it, print the final report.
fn run_scenario(path: &str) -> ExitCode {
    let scenario = match Scenario::load(path) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut grid = match scenario.build_grid() {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("{}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    grid.run_simulation();
    println!("After simulation, the result is: ");
    for line in grid.status_report() {
        println!("{}", line);
    }
    ExitCode::SUCCESS
}

/// Interactive mode: drive the stage menu over stdin/stdout.
fn run_interactive() -> ExitCode {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock());

    match menu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terminal session failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
