//! Status lines on stderr.

use console::{Style, Term};

/// Writes one status line per call, colored by kind.
pub(crate) struct Output {
    term: Term,
    success: Style,
    warning: Style,
    error: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg, None);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(msg, Some(&self.success));
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(msg, Some(&self.warning));
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(msg, Some(&self.error));
    }

    // A closed stderr is not worth failing the run over.
    fn line(&self, msg: &str, style: Option<&Style>) {
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }
}
