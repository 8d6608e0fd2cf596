/// The REPL (Read-Eval-Print-Loop) module.
use crate::command::{self, Command, HELP};
use crate::console;
use crate::errors;
use crate::session::{Form, Session};
use std::io::{self, BufRead};
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const BANNER: &str = r#"
Every edit recomputes the estimate. Type 'help' for a list of commands.
"#;

/// What the loop should do after a line has been handled.
#[derive(Debug, PartialEq)]
pub enum Step {
    Continue,
    Quit,
}

/// Start an interactive session on stdin/stdout.
pub fn start(form: Form) -> Result<(), errors::Error> {
    let mut session = Session::open(form);
    crate::echo!("rowcast {}{}\n", VERSION, BANNER);
    console::print_form(&session.form);

    let outcome = run(&mut session, io::stdin().lock());
    session.close();
    info!("Bye.");
    outcome
}

/// Reads commands until `quit` or end of input. Errors from individual commands are
/// printed and the loop goes on; reading or prompt failures end it.
pub fn run<R: BufRead>(session: &mut Session, input: R) -> Result<(), errors::Error> {
    let mut lines = input.lines();
    loop {
        console::print_prompt()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                console::echo("\n".into());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        match handle_line(session, &line) {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => break,
            Err(e) => {
                warn!(session_id = session.id.to_string(), "{}", e);
                crate::error!("{}\n", e);
            }
        }
    }
    Ok(())
}

/// Parses and applies one line, printing whatever the command asks for.
pub fn handle_line(session: &mut Session, line: &str) -> Result<Step, errors::Error> {
    let command = command::parse(line)?;
    session.apply(&command)?;

    if command.is_edit() {
        match command {
            Command::ToggleColumns => console::echo(console::render_columns(
                &session.form.schema,
                session.form.columns_expanded,
            )),
            _ => console::print_form(&session.form),
        }
        return Ok(Step::Continue);
    }

    match command {
        Command::Quit => return Ok(Step::Quit),
        Command::Help => console::echo(HELP.into()),
        Command::Types => console::echo(console::render_types()),
        _ => console::print_form(&session.form),
    }
    Ok(Step::Continue)
}
