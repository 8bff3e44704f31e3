//! Sprint Planner - allocate multi-week projects to developers

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = sprint_planner::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
