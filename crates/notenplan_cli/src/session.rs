//! Interactive load → render → (mutate → persist → render)* loop.
//!
//! # Invariants
//! - The full view is re-rendered after every successful mutation.
//! - Rejected input prints an alert and keeps the loop running.
//! - Only storage and I/O failures end the session with an error.

use crate::command::{parse_command, Command, CommandError, HELP};
use log::warn;
use notenplan_core::{
    render_html, render_text, GradebookRepository, GradebookService, ServiceError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";

#[derive(Debug)]
pub enum SessionError {
    Io(io::Error),
    Service(ServiceError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Runs the prompt loop until `quit` or end of input.
pub fn run_session<R, I, O>(
    service: &mut GradebookService<R>,
    input: &mut I,
    output: &mut O,
) -> Result<(), SessionError>
where
    R: GradebookRepository,
    I: BufRead,
    O: Write,
{
    write!(output, "{}", render_text(&service.view()))?;

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            writeln!(output)?;
            return Ok(());
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                alert(output, &err)?;
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(()),
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Show => write!(output, "{}", render_text(&service.view()))?,
            Command::ExportHtml { path } => {
                match std::fs::write(&path, render_html(&service.view())) {
                    Ok(()) => writeln!(output, "HTML gespeichert: {}", path.display())?,
                    Err(err) => {
                        warn!("event=html_export module=cli status=error error={err}");
                        alert(output, &format!("HTML konnte nicht gespeichert werden: {err}"))?;
                    }
                }
            }
            Command::AddSubject { name } => {
                let result = service.add_subject(&name).map(|_| ());
                finish_mutation(service, output, result)?;
            }
            Command::AddNote {
                index,
                grade,
                label,
            } => {
                let result = service.add_note(index, &label, grade).map(|_| ());
                finish_mutation(service, output, result)?;
            }
            Command::DeleteSubject { index } => {
                let mut confirm_io = Ok(false);
                let result = service.delete_subject(index, |subject| {
                    confirm_io = confirm(
                        &mut *input,
                        &mut *output,
                        &format!("Fach \"{}\" wirklich löschen? [j/N] ", subject.name()),
                    );
                    matches!(confirm_io, Ok(true))
                });
                confirm_io?;
                finish_mutation(service, output, result.map(|_| ()))?;
            }
        }
    }
}

fn finish_mutation<R, O>(
    service: &GradebookService<R>,
    output: &mut O,
    result: Result<(), ServiceError>,
) -> Result<(), SessionError>
where
    R: GradebookRepository,
    O: Write,
{
    match result {
        Ok(()) => {
            write!(output, "{}", render_text(&service.view()))?;
            Ok(())
        }
        Err(ServiceError::Gradebook(err)) => {
            alert(output, &err)?;
            Ok(())
        }
        Err(err) => Err(SessionError::Service(err)),
    }
}

fn alert<O: Write>(output: &mut O, message: &dyn Display) -> io::Result<()> {
    writeln!(output, "! {message}")
}

fn confirm<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{question}")?;
    output.flush()?;
    let answer = read_line(input)?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "j" | "ja" | "y" | "yes"
    ))
}

fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
