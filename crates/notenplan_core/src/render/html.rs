use super::view::{GradebookView, SubjectView};
use std::fmt::Write;

/// Renders the view as an HTML fragment.
///
/// Markup keeps the `subject`, `notes-list`, `grade grade-*` and
/// `subject-average` class names so existing stylesheets apply. Every piece
/// of user text is escaped.
pub fn render_html(view: &GradebookView) -> String {
    let mut out = String::from("<div id=\"subjects-container\">\n");
    for subject in &view.subjects {
        render_subject(&mut out, subject);
    }
    out.push_str("</div>\n");
    let _ = writeln!(
        out,
        "<div class=\"overall-average\">Gesamtdurchschnitt: <span id=\"overall-average-value\">{}</span></div>",
        escape_html(&view.overall_average.text)
    );
    out
}

fn render_subject(out: &mut String, subject: &SubjectView) {
    let name = escape_html(&subject.name);
    let _ = writeln!(out, "<section class=\"subject\" data-idx=\"{}\">", subject.index);
    let _ = writeln!(
        out,
        "  <h3>{name} <button aria-label=\"Fach löschen\" class=\"delete-subject\" data-idx=\"{}\">&times;</button></h3>",
        subject.index
    );

    out.push_str("  <ul class=\"notes-list\">\n");
    for note in &subject.notes {
        let _ = writeln!(
            out,
            "    <li><span class=\"note-label\">{}</span> <span class=\"grade {}\">{}</span></li>",
            escape_html(&note.label),
            note.band.css_class(),
            note.grade
        );
    }
    out.push_str("  </ul>\n");

    let average = match subject.average.band {
        Some(band) => format!(
            "<span class=\"{}\">{}</span>",
            band.css_class(),
            escape_html(&subject.average.text)
        ),
        None => escape_html(&subject.average.text),
    };
    let _ = writeln!(
        out,
        "  <div class=\"subject-average\">Durchschnitt: {average}</div>"
    );
    out.push_str("</section>\n");
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_html};
    use crate::model::gradebook::Gradebook;
    use crate::render::GradebookView;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>'"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;&#39;"
        );
    }

    #[test]
    fn user_text_is_escaped_in_output() {
        let mut book = Gradebook::new();
        book.add_subject("<script>alert(1)</script>").unwrap();
        book.add_note(0, "Test & Quiz", 3.0).unwrap();

        let html = render_html(&GradebookView::from_gradebook(&book));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Test &amp; Quiz"));
    }

    #[test]
    fn uses_band_classes_for_grades_and_average() {
        let mut book = Gradebook::new();
        book.add_subject("Mathe").unwrap();
        book.add_note(0, "Test", 2.0).unwrap();
        book.add_subject("Physik").unwrap();

        let html = render_html(&GradebookView::from_gradebook(&book));
        assert!(html.contains("<span class=\"grade grade-good\">2.00</span>"));
        assert!(html.contains("Durchschnitt: <span class=\"grade-good\">2.00</span>"));
        assert!(html.contains("Durchschnitt: –</div>"));
        assert!(html.contains("data-idx=\"1\""));
        assert!(html.contains("<span id=\"overall-average-value\">2.00</span>"));
    }
}
