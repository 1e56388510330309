pub type CmdResult<T> = ampdeploy::Result<(T, i32)>;

pub mod deploy;
pub mod status;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        ampdeploy::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (ampdeploy::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Deploy(args) => dispatch!(args, deploy),
        crate::Commands::Status(args) => dispatch!(args, status),
    }
}
