//! clap command tree.
//!
//! The same subcommands are used by shell mode (with global flags) and by
//! the REPL/pipe modes, where each line is parsed without a binary name.

use clap::{Arg, ArgAction, Command};

/// Top-level CLI with global flags and all subcommands.
pub fn build_cli() -> Command {
    let cmd = Command::new("latch")
        .about("Latch key-value store shell")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("JSON file with store options"),
        )
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .action(ArgAction::SetTrue)
                .help("Reject writes"),
        )
        .arg(
            Arg::new("shards")
                .long("shards")
                .value_name("N")
                .help("Number of lock shards (power of two, > 1)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .help("Output JSON"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .action(ArgAction::SetTrue)
                .help("Output bare values"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        );
    add_subcommands(cmd)
}

/// Command used to parse one REPL or pipe line.
pub fn build_repl_cmd() -> Command {
    let cmd = Command::new("latch")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .subcommand_required(true);
    add_subcommands(cmd)
}

fn add_subcommands(cmd: Command) -> Command {
    cmd.subcommand(
        Command::new("get")
            .about("Get the value of a key")
            .arg(Arg::new("key").required(true)),
    )
    .subcommand(
        Command::new("set")
            .about("Set a key to a value")
            .arg(Arg::new("key").required(true))
            .arg(Arg::new("value").required(true).allow_hyphen_values(true)),
    )
    .subcommand(
        Command::new("cas")
            .about("Set KEY to NEW only if it currently holds EXPECTED")
            .override_usage("cas KEY EXPECTED NEW | cas KEY --absent NEW")
            .arg(Arg::new("key").required(true))
            .arg(
                Arg::new("absent")
                    .long("absent")
                    .action(ArgAction::SetTrue)
                    .help("Succeed only if KEY does not exist"),
            )
            .arg(
                Arg::new("values")
                    .num_args(1..=2)
                    .required(true)
                    .allow_hyphen_values(true)
                    .value_name("EXPECTED NEW"),
            ),
    )
    .subcommand(
        Command::new("cad")
            .about("Delete KEY only if it currently holds EXPECTED")
            .override_usage("cad KEY EXPECTED | cad KEY --absent")
            .arg(Arg::new("key").required(true))
            .arg(
                Arg::new("absent")
                    .long("absent")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("expected")
                    .help("Match only if KEY does not exist"),
            )
            .arg(
                Arg::new("expected")
                    .required_unless_present("absent")
                    .allow_hyphen_values(true),
            ),
    )
    .subcommand(
        Command::new("del")
            .about("Delete a key")
            .arg(Arg::new("key").required(true)),
    )
    .subcommand(
        Command::new("exists")
            .about("Check whether a key exists")
            .arg(Arg::new("key").required(true)),
    )
    .subcommand(
        Command::new("keys")
            .about("List keys one page at a time")
            .arg(Arg::new("page").default_value("0"))
            .arg(Arg::new("per_page").default_value("100")),
    )
    .subcommand(
        Command::new("check")
            .about("Run the store self-check")
            .arg(
                Arg::new("workers")
                    .long("workers")
                    .value_name("N")
                    .default_value("100"),
            )
            .arg(
                Arg::new("key")
                    .long("key")
                    .value_name("KEY")
                    .default_value("test1"),
            ),
    )
    .subcommand(Command::new("info").about("Show store information"))
}
