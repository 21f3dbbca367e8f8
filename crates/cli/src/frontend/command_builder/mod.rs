use clap::builder::{NonEmptyStringValueParser, OsStringValueParser};
use clap::{Arg, ArgAction, Command as ClapCommand, value_parser};

/// Builds the `clap` command used for parsing.
///
/// Help and version are plain flags so the front-end controls their output.
pub(crate) fn clap_command(program_name: &'static str) -> ClapCommand {
    ClapCommand::new(program_name)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("files-from")
                .long("files-from")
                .value_name("FILE")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("from0")
                .long("from0")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("rsync-path")
                .long("rsync-path")
                .value_name("PROGRAM")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("rsh")
                .long("rsh")
                .short('e')
                .value_name("COMMAND")
                .value_parser(NonEmptyStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lenient-listing")
                .long("lenient-listing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .required_unless_present_any(["help", "version"]),
        )
        .arg(
            Arg::new("source")
                .value_name("SOURCE")
                .value_parser(NonEmptyStringValueParser::new())
                .required_unless_present_any(["help", "version"]),
        )
        .arg(
            Arg::new("destination")
                .value_name("DEST")
                .value_parser(NonEmptyStringValueParser::new())
                .required_unless_present_any(["help", "version"]),
        )
}
