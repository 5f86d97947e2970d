//! Terminal presenter for the goals session.
//!
//! # Responsibility
//! - Read one command per stdin line and dispatch it as a session intent.
//! - Print the active page after every command.
//!
//! # Invariants
//! - Command errors are printed, never fatal; only `quit`/EOF end the loop.
//! - Logged events carry no command text.

use goalboard_core::{
    init_logging, Block, CoreConfig, GoalboardSession, Intent, IntentOutcome, PageKind,
    SessionSnapshot,
};
use log::{error, info, warn};
use std::io::{self, BufRead, Write};

const HELP: &str = "commands:
  register <name>          choose a username
  open <name>              view a participant's goals
  back                     return to the roster
  edit <line> [| <line>]   replace your goals, one paragraph per `|` part
  show                     print the current page
  help                     print this help
  quit                     exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Intent(Intent),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "register" => Ok(Command::Intent(Intent::SubmitUsername(rest.to_string()))),
        "open" => Ok(Command::Intent(Intent::SelectParticipant(rest.to_string()))),
        "back" => Ok(Command::Intent(Intent::GoBack)),
        "edit" => {
            let blocks = rest
                .split('|')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(Block::paragraph)
                .collect();
            Ok(Command::Intent(Intent::EditDocument(blocks)))
        }
        "show" | "" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn render(snapshot: &SessionSnapshot, out: &mut impl Write) -> io::Result<()> {
    match snapshot.page {
        PageKind::UsernameEntry => writeln!(out, "[username] Choose a username...")?,
        PageKind::Roster => {
            writeln!(out, "[roster]")?;
            for entry in &snapshot.roster {
                let marker = if entry.is_current { " (you)" } else { "" };
                writeln!(out, "  - {}{marker}", entry.name)?;
            }
        }
        PageKind::GoalsView => {
            if let Some(goals) = snapshot.focused.as_ref() {
                let mode = if goals.read_only { "read-only" } else { "editable" };
                writeln!(out, "[goals] {} ({mode})", goals.title)?;
                for block in goals.document.blocks() {
                    writeln!(out, "  {}", block.text())?;
                }
            }
        }
    }
    Ok(())
}

fn describe(outcome: &IntentOutcome) -> String {
    match outcome {
        IntentOutcome::Registered(participant) => format!("welcome, {}", participant.name()),
        IntentOutcome::Focused(participant) => format!("viewing {}", participant.name()),
        IntentOutcome::ReturnedToRoster => "back to roster".to_string(),
        IntentOutcome::DocumentUpdated(_) => "goals saved".to_string(),
        IntentOutcome::EditIgnoredReadOnly => "read-only: edit ignored".to_string(),
        IntentOutcome::EditRejected(err) => format!("edit ignored: {err}"),
    }
}

fn run(
    session: &mut GoalboardSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    render(&session.snapshot(), out)?;
    for line in input.lines() {
        match parse_command(&line?) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(Command::Show) => render(&session.snapshot(), out)?,
            Ok(Command::Intent(intent)) => {
                match session.dispatch(intent) {
                    Ok(outcome) => writeln!(out, "ok: {}", describe(&outcome))?,
                    Err(err) => writeln!(out, "error: {err}")?,
                }
                render(&session.snapshot(), out)?;
            }
            Err(message) => {
                warn!("event=command module=cli status=rejected reason=unknown_command");
                writeln!(out, "error: {message}")?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn main() {
    let config = CoreConfig::from_env();
    match init_logging(&config) {
        Ok(Some(status)) => info!(
            "event=cli_start module=cli status=ok log_dir={}",
            status.log_dir.display()
        ),
        Ok(None) => {}
        Err(err) => eprintln!("goalboard: logging disabled: {err}"),
    }
    println!("goalboard_core version={}", goalboard_core::core_version());

    let mut session = GoalboardSession::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(err) = run(&mut session, stdin.lock(), &mut stdout) {
        error!("event=terminal module=cli status=error kind={:?}", err.kind());
        eprintln!("goalboard: terminal error: {err}");
        std::process::exit(1);
    }
    info!("event=cli_exit module=cli status=ok");
}
