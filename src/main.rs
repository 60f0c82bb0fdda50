use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use driver::Outcome;

mod cli;
mod driver;

fn main() -> ExitCode {
    let Cli { tokens } = Cli::parse();

    match driver::run(&tokens) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failure) => ExitCode::from(1),
        Err(error) => {
            eprintln!("ERROR: {error}");
            ExitCode::from(2)
        }
    }
}
