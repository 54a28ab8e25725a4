use std::process::ExitCode;

fn main() -> ExitCode {
    vaultmap::cli::run()
}
