use std::{process::ExitCode, time::Instant};

use log::info;

use terra_tour_core::{Error, PointSet, Result, SolverOptions, logging, solve, write_solution};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Help(usage)) => {
            print!("{usage}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    let mode = options.mode()?;
    logging::init_logger(&options)?;

    let points = PointSet::from_options(&options)?;
    info!("input: {points}");
    info!("options: mode={mode} {options}");

    let solution = solve(&points, mode)?;
    write_solution(&solution, &options)?;

    info!("output: time={:.2}s", now.elapsed().as_secs_f32());
    Ok(())
}
