/// Render Projection Module for cmdpal
///
/// Projects session state to an ordered sequence of display lines: the
/// prompt line, a fixed-width separator, then one line per filtered entry
/// with a selection marker. Pure function, no terminal I/O; the presentation
/// sink decides how the lines reach the screen.
use crate::config::StyleConfig;
use crate::session::Session;

/// Renders the session as display lines for the presentation sink.
///
/// `width` is the inner width of the panel; the separator pattern is
/// repeated and truncated to exactly that many characters.
pub fn render_lines(session: &Session, style: &StyleConfig, width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(session.filtered().len() + 2);
    lines.push(format!("{}{}", style.prompt, session.query()));
    lines.push(separator_line(&style.separator, width));
    for (index, name) in session.filtered().iter().enumerate() {
        let marker = if index + 1 == session.cursor() {
            &style.selected_marker
        } else {
            &style.unselected_marker
        };
        lines.push(format!("{}{}", marker, name));
    }
    lines
}

fn separator_line(pattern: &str, width: usize) -> String {
    if pattern.is_empty() || width == 0 {
        return String::new();
    }
    pattern.chars().cycle().take(width).collect()
}
