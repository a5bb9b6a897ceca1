//! Sizecheck CLI Binary
//!
//! Prints one `key=value;` result line on stdout and exits with the verdict code.

use sizecheck::logging::init_logging;
use sizecheck::tooling::cli::{parse_args, CliContext, ParseOutcome};
use std::process;

fn main() {
    let outcome = parse_args(std::env::args_os());
    let exit_code = outcome.exit_code().unwrap_or_default();
    let cli = match outcome {
        ParseOutcome::Run(cli) => cli,
        ParseOutcome::Usage(text) => {
            print!("{}", text);
            process::exit(exit_code);
        }
        ParseOutcome::Syntax(text) => {
            eprint!("{}", text);
            process::exit(exit_code);
        }
    };

    let context = match CliContext::new(cli.config.as_deref(), cli.state_file.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing sizecheck: {}", e);
            process::exit(e.exit_code());
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match context.execute(&cli.file, &cli.check.to_spec()) {
        Ok(evaluation) => {
            println!("{}", evaluation.report_line());
            process::exit(evaluation.verdict.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
