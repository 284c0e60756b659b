//! Parsing of interactive command lines.

use notenplan_core::{parse_grade_input, GradebookError};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const HELP: &str = "\
Befehle:
  subject <name>                  Fach hinzufügen
  note <nr> <note> <bezeichnung>  Note zu Fach <nr> hinzufügen (z. B. note 1 2,3 Test)
  delete <nr>                     Fach <nr> löschen
  show                            Übersicht anzeigen
  html <datei>                    Übersicht als HTML speichern
  help                            Diese Hilfe
  quit                            Beenden";

/// One user action read from the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddSubject { name: String },
    /// `index` is zero-based.
    AddNote { index: usize, grade: f64, label: String },
    DeleteSubject { index: usize },
    Show,
    ExportHtml { path: PathBuf },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    Usage(&'static str),
    InvalidIndex(String),
    /// Input rejected by gradebook rules before reaching the store.
    Rejected(GradebookError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Bitte einen Befehl eingeben (help zeigt alle Befehle)."),
            Self::Unknown(word) => {
                write!(f, "Unbekannter Befehl `{word}` (help zeigt alle Befehle).")
            }
            Self::Usage(usage) => write!(f, "Verwendung: {usage}"),
            Self::InvalidIndex(raw) => write!(f, "`{raw}` ist keine gültige Fachnummer."),
            Self::Rejected(err) => write!(f, "{err}"),
        }
    }
}

impl From<GradebookError> for CommandError {
    fn from(value: GradebookError) -> Self {
        Self::Rejected(value)
    }
}

/// Parses one input line into a command.
///
/// Subject numbers are typed 1-based as rendered and returned zero-based.
/// Empty names/labels are passed through so the store rejects them with
/// its own alert.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = split_word(line);

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "subject" | "fach" => Ok(Command::AddSubject {
            name: rest.to_string(),
        }),
        "note" => {
            let (index, rest) = split_word(rest);
            let (grade, label) = split_word(rest);
            if index.is_empty() || grade.is_empty() {
                return Err(CommandError::Usage("note <nr> <note> <bezeichnung>"));
            }
            Ok(Command::AddNote {
                index: parse_index(index)?,
                grade: parse_grade_input(grade)?,
                label: label.to_string(),
            })
        }
        "delete" | "löschen" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("delete <nr>"));
            }
            Ok(Command::DeleteSubject {
                index: parse_index(rest)?,
            })
        }
        "show" => Ok(Command::Show),
        "html" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("html <datei>"));
            }
            Ok(Command::ExportHtml {
                path: PathBuf::from(rest),
            })
        }
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(number) if number >= 1 => Ok(number - 1),
        _ => Err(CommandError::InvalidIndex(raw.trim().to_string())),
    }
}
