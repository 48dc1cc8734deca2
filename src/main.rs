use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Console,
}

mod commands;
mod output;
mod tty;

use commands::{rewrite, rules};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "reroot")]
#[command(version = VERSION)]
#[command(about = "Rebase shared asset references in project HTML pages")]
struct Cli {
    #[command(flatten)]
    rewrite: rewrite::RewriteArgs,

    /// Emit a JSON response envelope instead of the console report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in substitution rules in application order
    Rules(rules::RulesArgs),
}

fn response_mode(cli: &Cli) -> ResponseMode {
    if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Console
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = response_mode(&cli);

    let exit_code = match mode {
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli);
            let _ = output::print_json_result(json_result);
            exit_code
        }
        ResponseMode::Console => match commands::run_console(cli) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                exit_code
            }
            Err(err) => {
                output::print_console_error(&err);
                output::exit_code_for_error(err.code)
            }
        },
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
