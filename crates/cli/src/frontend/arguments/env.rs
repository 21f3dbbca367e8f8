use std::ffi::OsString;

use transport::ToolConfig;

use super::parsed_args::ParsedArgs;

/// Resolves the programs to run: command-line flag, then environment, then
/// the built-in default.
pub(crate) fn resolve_tools<F>(args: &ParsedArgs, lookup: F) -> ToolConfig
where
    F: Fn(&str) -> Option<OsString>,
{
    let mut tools = ToolConfig::from_lookup(lookup);
    if let Some(program) = &args.rsync_path {
        tools = tools.with_rsync(program.clone());
    }
    if let Some(rsh) = &args.rsh {
        tools = tools.with_remote_shell(rsh.clone());
    }
    tools
}
