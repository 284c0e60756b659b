use super::view::{AverageView, GradebookView};
use crate::stats::GradeBand;
use std::fmt::Write;

const LABEL_WIDTH: usize = 28;

/// Renders the view for a terminal.
///
/// Subjects are numbered from 1; that number is what the user types to
/// address a subject.
pub fn render_text(view: &GradebookView) -> String {
    let mut out = String::new();

    if view.subjects.is_empty() {
        out.push_str("Noch keine Fächer.\n");
    }

    for subject in &view.subjects {
        let _ = writeln!(out, "[{}] {}", subject.index + 1, subject.name);
        if subject.notes.is_empty() {
            out.push_str("    (keine Noten)\n");
        }
        for note in &subject.notes {
            let _ = writeln!(
                out,
                "    {:<width$} {} {}",
                note.label,
                note.grade,
                band_marker(note.band),
                width = LABEL_WIDTH
            );
        }
        let _ = writeln!(out, "    Durchschnitt: {}", average_text(&subject.average));
    }

    let _ = writeln!(out, "Gesamtdurchschnitt: {}", view.overall_average.text);
    out
}

fn average_text(average: &AverageView) -> String {
    match average.band {
        Some(band) => format!("{} {}", average.text, band_marker(band)),
        None => average.text.clone(),
    }
}

fn band_marker(band: GradeBand) -> String {
    format!("({})", band.as_str())
}
