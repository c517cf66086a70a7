//! ArgMatches → Request/MetaCommand conversion.
//!
//! Translates clap's parsed arguments into the appropriate action:
//! - Store commands → `CliAction::Execute(Request)`
//! - REPL meta-commands → `CliAction::Meta`

use clap::ArgMatches;
use latchdb::Expected;

/// The result of parsing user input.
pub enum CliAction {
    /// A store command to execute against the session's store.
    Execute(Request),
    /// A REPL-only meta-command.
    Meta(MetaCommand),
}

/// Store commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get { key: String },
    Set { key: String, value: String },
    Cas { key: String, expected: Expected, value: String },
    Cad { key: String, expected: Expected },
    Del { key: String },
    Exists { key: String },
    Keys { page: usize, per_page: usize },
    Check { key: String, workers: usize },
    Info,
}

/// REPL meta-commands.
#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommand {
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for REPL meta-commands before delegating to clap.
///
/// Returns `Some(MetaCommand)` if the line is a meta-command, `None` otherwise.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let trimmed = line.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?;

    match cmd {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => {
            let command = parts
                .next()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            Some(MetaCommand::Help { command })
        }
        _ => None,
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let request = match sub_name {
        "get" => Request::Get { key: required(m, "key")? },
        "set" => Request::Set {
            key: required(m, "key")?,
            value: required(m, "value")?,
        },
        "cas" => parse_cas(m)?,
        "cad" => {
            let key = required(m, "key")?;
            let expected = if m.get_flag("absent") {
                Expected::Absent
            } else {
                Expected::from(required(m, "expected")?.as_str())
            };
            Request::Cad { key, expected }
        }
        "del" => Request::Del { key: required(m, "key")? },
        "exists" => Request::Exists { key: required(m, "key")? },
        "keys" => Request::Keys {
            page: number(m, "page")?,
            per_page: number(m, "per_page")?,
        },
        "check" => Request::Check {
            key: required(m, "key")?,
            workers: number(m, "workers")?,
        },
        "info" => Request::Info,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(CliAction::Execute(request))
}

fn parse_cas(m: &ArgMatches) -> Result<Request, String> {
    let key = required(m, "key")?;
    let values: Vec<&String> = m
        .get_many::<String>("values")
        .map(|v| v.collect())
        .unwrap_or_default();

    match (m.get_flag("absent"), values.as_slice()) {
        (true, [value]) => Ok(Request::Cas {
            key,
            expected: Expected::Absent,
            value: value.to_string(),
        }),
        (false, [expected, value]) => Ok(Request::Cas {
            key,
            expected: Expected::from(expected.as_str()),
            value: value.to_string(),
        }),
        (true, _) => Err("cas --absent takes exactly one value: NEW".to_string()),
        (false, _) => Err("cas takes EXPECTED and NEW, or --absent NEW".to_string()),
    }
}

fn required(m: &ArgMatches, name: &str) -> Result<String, String> {
    m.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn number(m: &ArgMatches, name: &str) -> Result<usize, String> {
    required(m, name)?
        .parse::<usize>()
        .map_err(|e| format!("Invalid {}: {}", name, e))
}

/// Split a REPL/pipe line and parse it.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<CliAction>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    if let Some(meta) = check_meta_command(trimmed) {
        return Ok(Some(CliAction::Meta(meta)));
    }

    let args = shlex::split(trimmed).ok_or_else(|| "Unbalanced quotes".to_string())?;
    let matches = crate::commands::build_repl_cmd()
        .try_get_matches_from(args)
        .map_err(|e| e.to_string().trim_end().to_string())?;
    matches_to_action(&matches).map(Some)
}
