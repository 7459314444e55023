use clap::Parser;
use nbpipe::app::{handle_fatal_error, init_logging, AppConfig};
use nbpipe::cli::{execute_command, Cli};

// Not #[tokio::main]: the runtime flavor comes from the pipeline file, so it
// is built by the run command after configuration is loaded.
fn main() {
    let cli = Cli::parse();

    init_logging(&AppConfig::new(cli.verbose));

    if let Err(e) = execute_command(cli.command) {
        handle_fatal_error(e, cli.verbose);
    }
}
