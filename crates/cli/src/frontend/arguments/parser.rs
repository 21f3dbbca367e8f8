use std::ffi::OsString;

use clap::ArgMatches;

use super::parsed_args::ParsedArgs;
use crate::frontend::command_builder::clap_command;
use crate::frontend::defaults::PROGRAM_NAME;

/// Parses `arguments` (including the program name) into [`ParsedArgs`].
///
/// # Errors
///
/// Returns the `clap` error for unknown options, missing operands and
/// values that fail to parse.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let matches = clap_command(PROGRAM_NAME).try_get_matches_from(args)?;
    Ok(from_matches(&matches))
}

fn from_matches(matches: &ArgMatches) -> ParsedArgs {
    ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbose: matches.get_count("verbose"),
        quiet: matches.get_flag("quiet"),
        dry_run: matches.get_flag("dry-run"),
        files_from: matches.get_one::<OsString>("files-from").cloned(),
        from0: matches.get_flag("from0"),
        rsync_path: matches.get_one::<OsString>("rsync-path").cloned(),
        rsh: matches.get_one::<String>("rsh").cloned(),
        timeout: matches.get_one::<u64>("timeout").copied(),
        lenient_listing: matches.get_flag("lenient-listing"),
        parallel: matches.get_one::<i64>("parallel").copied().unwrap_or_default(),
        source: matches.get_one::<String>("source").cloned().unwrap_or_default(),
        destination: matches
            .get_one::<String>("destination")
            .cloned()
            .unwrap_or_default(),
    }
}
