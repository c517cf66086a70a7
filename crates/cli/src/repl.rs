//! REPL and pipe modes.

use std::io::{self, BufRead};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::build_repl_cmd;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{parse_line, CliAction, MetaCommand};
use crate::state::SessionState;

const HISTORY_FILE: &str = ".latch_history";

/// Outcome of one input line.
enum LineResult {
    Continue,
    Failed,
    Clear,
    Quit,
}

/// Interactive prompt. Returns when the user quits or closes stdin.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("(error) failed to start line editor: {}", e);
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("latch> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match execute_line(&line, state, mode) {
                    LineResult::Quit => break,
                    LineResult::Clear => {
                        let _ = editor.clear_screen();
                    }
                    LineResult::Continue | LineResult::Failed => {}
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history {
        let _ = editor.save_history(path);
    }
}

/// Read commands line by line from stdin.
///
/// Returns the process exit code: 1 if any line failed.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let mut exit_code = 0;
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{}", format_error(&e.to_string(), mode));
                return 1;
            }
        };
        match execute_line(&line, state, mode) {
            LineResult::Quit => break,
            LineResult::Failed => exit_code = 1,
            LineResult::Continue | LineResult::Clear => {}
        }
    }
    exit_code
}

fn execute_line(line: &str, state: &mut SessionState, mode: OutputMode) -> LineResult {
    let action = match parse_line(line) {
        Ok(Some(action)) => action,
        Ok(None) => return LineResult::Continue,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            return LineResult::Failed;
        }
    };

    match action {
        CliAction::Execute(request) => match state.execute(request) {
            Ok(output) => {
                let formatted = format_output(&output, mode);
                if !formatted.is_empty() {
                    println!("{}", formatted);
                }
                LineResult::Continue
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                LineResult::Failed
            }
        },
        CliAction::Meta(MetaCommand::Quit) => LineResult::Quit,
        CliAction::Meta(MetaCommand::Clear) => LineResult::Clear,
        CliAction::Meta(MetaCommand::Help { command }) => {
            print_help(command.as_deref());
            LineResult::Continue
        }
    }
}

fn print_help(command: Option<&str>) {
    let mut cmd = build_repl_cmd();
    match command {
        Some(name) => match cmd.find_subcommand_mut(name) {
            Some(sub) => {
                let _ = sub.print_help();
            }
            None => eprintln!("(error) Unknown command: {}", name),
        },
        None => {
            let _ = cmd.print_help();
            println!("\nMeta-commands: help [COMMAND], clear, quit, exit");
        }
    }
}

fn history_path() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME").map(|home| std::path::PathBuf::from(home).join(HISTORY_FILE))
}
