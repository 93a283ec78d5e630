use cck_cli::{build_cli, logging, run};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    logging::init(matches.get_count("verbose"));

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    match run(&matches, &mut stdout, &mut stderr) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            tracing::debug!(?err, "command failed");
            eprintln!("cckit: {err}");
            ExitCode::FAILURE
        }
    }
}
