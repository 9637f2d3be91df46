use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = logr::cli::parse_args();
    match logr::run_with_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("run failed: {:?}", err);
            eprintln!("logr: {err}");
            ExitCode::FAILURE
        }
    }
}
