use std::process::ExitCode;

use clap::Parser;

use fairsplit_cli::Cli;
use fairsplit_core::DomainError;
use fairsplit_infra::AppConfig;

/// Exit status for invariant violations inside the engine (sysexits `EX_SOFTWARE`).
const EXIT_INTERNAL: u8 = 70;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    fairsplit_observability::init(config.log_format);

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    match fairsplit_cli::run(cli, &config, stdin, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let internal = err
                .chain()
                .filter_map(|cause| cause.downcast_ref::<DomainError>())
                .any(DomainError::is_internal);
            tracing::error!(error = %format!("{err:#}"), internal, "command failed");
            eprintln!("error: {err:#}");
            if internal {
                ExitCode::from(EXIT_INTERNAL)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
