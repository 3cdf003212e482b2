//! Terminal output for CLI commands.
//!
//! Status lines go to stderr so that rendered pages and listings written to
//! stdout can be piped.

use console::{Style, Term};

pub(crate) struct Output {
    status: Term,
    data: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            data: Term::stdout(),
        }
    }

    fn status_line(&self, style: &Style, msg: &str) {
        let _ = self.status.write_line(&style.apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(&Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(&Style::new().red(), msg);
    }

    /// Section heading above a listing (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        self.status_line(&Style::new().cyan().bold(), msg);
    }

    /// Write page data (markup or a listing row) to stdout.
    pub(crate) fn data(&self, line: &str) -> std::io::Result<()> {
        self.data.write_line(line)
    }
}
