pub type CmdResult<T> = reroot::Result<(T, i32)>;

pub mod rewrite;
pub mod rules;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(cli: crate::Cli) -> (reroot::Result<serde_json::Value>, i32) {
    crate::tty::status("reroot is working...");

    match cli.command {
        Some(crate::Commands::Rules(args)) => dispatch!(args, rules),
        None => dispatch!(cli.rewrite, rewrite),
    }
}

pub(crate) fn run_console(cli: crate::Cli) -> reroot::Result<(String, i32)> {
    match cli.command {
        Some(crate::Commands::Rules(args)) => rules::run_console(args),
        None => rewrite::run_console(cli.rewrite),
    }
}
