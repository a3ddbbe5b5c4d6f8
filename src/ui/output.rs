//! ui::output
//!
//! User-facing output.
//!
//! # Design
//!
//! Progress and results go to stdout; warnings and errors go to stderr so
//! that `--print-nav` output can be piped. Everything except errors and
//! requested data respects the quiet flag. Message wording for generation
//! results lives here so handlers only decide *what* happened.

use std::fmt::Display;
use std::path::Path;

use crate::core::splice::SpliceOutcome;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors and requested data only
    Quiet,
    Normal,
    /// Adds `[debug]` lines on stderr
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn shows_progress(self) -> bool {
        self != Verbosity::Quiet
    }
}

/// Progress line on stdout.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        println!("{}", message);
    }
}

/// Requested data on stdout, printed even when quiet.
pub fn data(message: impl Display) {
    println!("{}", message);
}

pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        eprintln!("warning: {}", message);
    }
}

/// One line per written page.
pub fn page_written(path: &Path, verbosity: Verbosity) {
    print(format!("  Generated: {}", path.display()), verbosity);
}

/// Describe the result of a navigation splice.
pub fn splice_summary(document: &Path, outcome: &SpliceOutcome) -> String {
    match outcome {
        SpliceOutcome::Replaced { line, .. } => {
            format!("Updated navigation in {} (line {})", document.display(), line)
        }
        SpliceOutcome::Inserted { line } => {
            format!("Added navigation to {} (line {})", document.display(), line)
        }
        SpliceOutcome::Unchanged => {
            format!("Navigation in {} already up to date", document.display())
        }
    }
}

/// Indented bullet list, one item per line.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_list(&["a.md", "b/index.md"], "  - "), "  - a.md\n  - b/index.md");
        assert_eq!(format_list::<&str>(&[], "- "), "");
    }

    #[test]
    fn splice_messages() {
        let doc = Path::new("mkdocs.yml");
        assert_eq!(
            splice_summary(doc, &SpliceOutcome::Replaced { line: 7, removed: 5 }),
            "Updated navigation in mkdocs.yml (line 7)"
        );
        assert_eq!(
            splice_summary(doc, &SpliceOutcome::Inserted { line: 4 }),
            "Added navigation to mkdocs.yml (line 4)"
        );
        assert_eq!(
            splice_summary(doc, &SpliceOutcome::Unchanged),
            "Navigation in mkdocs.yml already up to date"
        );
    }
}
