//! core::splice
//!
//! Minimal, line-based edit of one owned section in a site-config document.
//!
//! # Model
//!
//! The document is treated as an opaque sequence of lines. Region bounds are
//! found purely by indentation and line prefix; nothing outside the region
//! is parsed, re-serialized or re-indented. Comments, custom tags and blank
//! lines outside the region survive byte-for-byte.
//!
//! # Paths
//!
//! 1. **Replace**: a line `<indent>- <label>:` starts the region. Following
//!    lines belong to it while they are blank or indented at least
//!    `indent + 2`; the region ends at its last non-blank line.
//! 2. **Insert**: otherwise, find `<header indent>- <header>:` followed by a
//!    run of child entries at `header indent + 2` (deeper lines included) and
//!    insert the block after the run's last non-blank line.
//! 3. **Fail**: neither found; [`SpliceError::AnchorNotFound`], no output.
//!
//! # Invariants
//!
//! - `apply(apply(doc)) == apply(doc)` for the same patch
//! - The replacement block is validated so that its own output is always
//!   recognized as the existing section on the next run
//!
//! # Example
//!
//! ```
//! use specdocs::core::splice::{FallbackAnchor, SectionAnchor, SectionPatch, SpliceOutcome};
//!
//! let doc = "nav:\n  - Commands:\n    - Login: login.md\ntheme:\n  name: material\n";
//! let patch = SectionPatch::new(
//!     SectionAnchor::new("Cloud Status", 4),
//!     FallbackAnchor::new("Commands", 2),
//!     "    - Cloud Status:\n      - Overview: cs/index.md",
//! );
//!
//! let spliced = patch.apply(doc).unwrap();
//! assert!(matches!(spliced.outcome, SpliceOutcome::Inserted { .. }));
//! assert_eq!(
//!     spliced.text,
//!     "nav:\n  - Commands:\n    - Login: login.md\n    - Cloud Status:\n      - Overview: cs/index.md\ntheme:\n  name: material\n"
//! );
//! assert_eq!(patch.apply(&spliced.text).unwrap().text, spliced.text);
//! ```

use thiserror::Error;

use super::nav::yaml_scalar;

/// Extra indentation of a section's children relative to its entry line.
pub const CHILD_STEP: usize = 2;

/// Errors from splicing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("neither section '{label}' nor fallback section '{fallback}' found in document")]
    AnchorNotFound { label: String, fallback: String },

    #[error("replacement block is not a valid '{label}' section: {reason}")]
    InvalidReplacement { label: String, reason: String },
}

/// The owned section's entry line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionAnchor {
    pub label: String,
    pub indent: usize,
}

impl SectionAnchor {
    pub fn new(label: impl Into<String>, indent: usize) -> Self {
        Self {
            label: label.into(),
            indent,
        }
    }
}

/// The section after whose entries a missing owned section is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackAnchor {
    pub header: String,
    pub indent: usize,
}

impl FallbackAnchor {
    pub fn new(header: impl Into<String>, indent: usize) -> Self {
        Self {
            header: header.into(),
            indent,
        }
    }
}

/// What a successful splice did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// Existing section replaced. `line` is 1-based; `removed` counts lines.
    Replaced { line: usize, removed: usize },
    /// Section inserted after the fallback run, starting at 1-based `line`.
    Inserted { line: usize },
    /// The existing section already matched the replacement.
    Unchanged,
}

/// Result of a successful splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub text: String,
    pub outcome: SpliceOutcome,
}

/// A complete splice request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPatch {
    pub anchor: SectionAnchor,
    pub fallback: FallbackAnchor,
    pub replacement: String,
}

/// A line with its byte offset; `text` keeps its terminator.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn content(&self) -> &'a str {
        let text = self.text.strip_suffix('\n').unwrap_or(self.text);
        text.strip_suffix('\r').unwrap_or(text)
    }

    fn is_blank(&self) -> bool {
        self.content().trim().is_empty()
    }

    fn indentation(&self) -> usize {
        indentation(self.content())
    }

    /// Byte offset just past the content, before the terminator.
    fn content_end(&self) -> usize {
        self.start + self.content().len()
    }

    fn end(&self) -> usize {
        self.start + self.text.len()
    }

    fn has_terminator(&self) -> bool {
        self.text.ends_with('\n')
    }
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut start = 0;
    text.split_inclusive('\n')
        .map(|text| {
            let line = Line { start, text };
            start += text.len();
            line
        })
        .collect()
}

fn indentation(content: &str) -> usize {
    content.len() - content.trim_start_matches(' ').len()
}

/// If `content` is `<indent>- <key>:`, return what follows the colon.
fn entry_rest<'a>(content: &'a str, indent: usize, key: &str) -> Option<&'a str> {
    if indentation(content) != indent {
        return None;
    }
    let rest = content[indent..]
        .strip_prefix("- ")?
        .strip_prefix(key)?
        .strip_prefix(':')?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

fn newline_style(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

impl SectionPatch {
    pub fn new(anchor: SectionAnchor, fallback: FallbackAnchor, replacement: impl Into<String>) -> Self {
        Self {
            anchor,
            fallback,
            replacement: replacement.into(),
        }
    }

    /// Apply the patch to `document`.
    ///
    /// Pure text-in/text-out; the caller decides whether to write.
    ///
    /// # Errors
    ///
    /// - `InvalidReplacement` if the block would not be re-recognized
    /// - `AnchorNotFound` if neither the section nor the fallback exists
    pub fn apply(&self, document: &str) -> Result<Spliced, SpliceError> {
        let block_lines = self.validated_block()?;
        let newline = newline_style(document);
        let block = block_lines.join(newline);
        let lines = split_lines(document);

        if let Some((first, last)) = self.find_section(&lines) {
            let start = lines[first].start;
            let end = lines[last].content_end();
            if document[start..end] == block {
                return Ok(Spliced {
                    text: document.to_string(),
                    outcome: SpliceOutcome::Unchanged,
                });
            }
            let text = format!("{}{}{}", &document[..start], block, &document[end..]);
            return Ok(Spliced {
                text,
                outcome: SpliceOutcome::Replaced {
                    line: first + 1,
                    removed: last - first + 1,
                },
            });
        }

        if let Some(last) = self.find_fallback_run(&lines) {
            let after = lines[last];
            let text = if after.has_terminator() {
                let pos = after.end();
                format!("{}{}{}{}", &document[..pos], block, newline, &document[pos..])
            } else {
                format!("{}{}{}", document, newline, block)
            };
            return Ok(Spliced {
                text,
                outcome: SpliceOutcome::Inserted { line: last + 2 },
            });
        }

        Err(SpliceError::AnchorNotFound {
            label: self.anchor.label.clone(),
            fallback: self.fallback.header.clone(),
        })
    }

    /// Block lines with trailing blank lines dropped, after checking shape.
    fn validated_block(&self) -> Result<Vec<&str>, SpliceError> {
        let invalid = |reason: String| SpliceError::InvalidReplacement {
            label: self.anchor.label.clone(),
            reason,
        };

        let mut lines: Vec<&str> = self
            .replacement
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        let key = yaml_scalar(&self.anchor.label);
        let first = lines.first().ok_or_else(|| invalid("block is empty".into()))?;
        if entry_rest(first, self.anchor.indent, &key).is_none() {
            return Err(invalid(format!(
                "first line must be '{}- {}:'",
                " ".repeat(self.anchor.indent),
                key
            )));
        }

        let continuation = self.anchor.indent + CHILD_STEP;
        for (i, line) in lines.iter().enumerate().skip(1) {
            if !line.trim().is_empty() && indentation(line) < continuation {
                return Err(invalid(format!(
                    "line {} must be indented at least {} spaces",
                    i + 1,
                    continuation
                )));
            }
        }

        Ok(lines)
    }

    /// First and last line index of the existing section.
    fn find_section(&self, lines: &[Line<'_>]) -> Option<(usize, usize)> {
        let key = yaml_scalar(&self.anchor.label);
        let first = lines
            .iter()
            .position(|l| entry_rest(l.content(), self.anchor.indent, &key).is_some())?;

        let continuation = self.anchor.indent + CHILD_STEP;
        let mut last = first;
        for (i, line) in lines.iter().enumerate().skip(first + 1) {
            if line.is_blank() {
                continue;
            }
            if line.indentation() >= continuation {
                last = i;
            } else {
                break;
            }
        }
        Some((first, last))
    }

    /// Index of the last non-blank line in the fallback section's entry run.
    fn find_fallback_run(&self, lines: &[Line<'_>]) -> Option<usize> {
        let key = yaml_scalar(&self.fallback.header);
        let child = self.fallback.indent + CHILD_STEP;

        for (header, line) in lines.iter().enumerate() {
            let is_header = entry_rest(line.content(), self.fallback.indent, &key)
                .is_some_and(|rest| rest.trim().is_empty());
            if !is_header {
                continue;
            }

            let mut last = None;
            for (i, line) in lines.iter().enumerate().skip(header + 1) {
                if line.is_blank() {
                    continue;
                }
                let depth = line.indentation();
                if depth < child {
                    break;
                }
                if last.is_none() && !(depth == child && line.content()[child..].starts_with("- ")) {
                    break;
                }
                last = Some(i);
            }

            if last.is_some() {
                return last;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "    - Cloud Status:\n      - Overview: commands/cloudstatus/index.md\n      - Status: commands/cloudstatus/status.md";

    fn patch(block: &str) -> SectionPatch {
        SectionPatch::new(
            SectionAnchor::new("Cloud Status", 4),
            FallbackAnchor::new("Commands", 2),
            block,
        )
    }

    const EXISTING: &str = "\
site_name: xcsh
nav:
  - Home: index.md
  - Commands:
    - Login: commands/login.md
    - Cloud Status:
      - Overview: commands/cloudstatus/index.md
      - Components:
        - Overview: commands/cloudstatus/components/index.md
        - List: commands/cloudstatus/components/list.md
    - Request: commands/request.md
  - Guides:
    - Start: guides/start.md
theme:
  name: material
  # keep this comment
extra_javascript:
  - !!python/name:pymdownx.arithmatex.arithmatex_js ''
";

    #[test]
    fn replaces_existing_section() {
        let spliced = patch(BLOCK).apply(EXISTING).unwrap();
        assert_eq!(
            spliced.outcome,
            SpliceOutcome::Replaced {
                line: 6,
                removed: 5
            }
        );
        let expected = EXISTING.replace(
            "    - Cloud Status:\n      - Overview: commands/cloudstatus/index.md\n      - Components:\n        - Overview: commands/cloudstatus/components/index.md\n        - List: commands/cloudstatus/components/list.md",
            BLOCK,
        );
        assert_eq!(spliced.text, expected);
        assert!(spliced.text.contains("    - Request: commands/request.md\n"));
        assert!(spliced.text.ends_with("theme:\n  name: material\n  # keep this comment\nextra_javascript:\n  - !!python/name:pymdownx.arithmatex.arithmatex_js ''\n"));
    }

    #[test]
    fn replace_is_idempotent() {
        let once = patch(BLOCK).apply(EXISTING).unwrap().text;
        let twice = patch(BLOCK).apply(&once).unwrap();
        assert_eq!(twice.text, once);
        assert_eq!(twice.outcome, SpliceOutcome::Unchanged);
    }

    #[test]
    fn section_stops_at_top_level_key() {
        let doc = "nav:\n  - Commands:\n    - Cloud Status:\n      - Old: old.md\ntheme:\n  name: material\n";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(
            spliced.text,
            format!("nav:\n  - Commands:\n{}\ntheme:\n  name: material\n", BLOCK)
        );
    }

    #[test]
    fn trailing_blank_lines_are_preserved() {
        let doc = "nav:\n  - Commands:\n    - Cloud Status:\n      - Old: old.md\n\n\ntheme:\n  name: x\n";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(
            spliced.text,
            format!("nav:\n  - Commands:\n{}\n\n\ntheme:\n  name: x\n", BLOCK)
        );
    }

    #[test]
    fn section_at_end_of_document_without_newline() {
        let doc = "nav:\n  - Commands:\n    - Cloud Status:\n      - Old: old.md";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(spliced.text, format!("nav:\n  - Commands:\n{}", BLOCK));
    }

    #[test]
    fn inserts_after_fallback_run() {
        let doc = "nav:\n  - Commands:\n    - Login: login.md\n    - Profile:\n      - Show: show.md\n  - Guides:\n    - Start: start.md\n";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(spliced.outcome, SpliceOutcome::Inserted { line: 6 });
        assert_eq!(
            spliced.text,
            format!(
                "nav:\n  - Commands:\n    - Login: login.md\n    - Profile:\n      - Show: show.md\n{}\n  - Guides:\n    - Start: start.md\n",
                BLOCK
            )
        );

        let again = patch(BLOCK).apply(&spliced.text).unwrap();
        assert_eq!(again.text, spliced.text);
        assert_eq!(again.outcome, SpliceOutcome::Unchanged);
    }

    #[test]
    fn inserts_at_end_of_document() {
        let doc = "nav:\n  - Commands:\n    - Login: login.md";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(spliced.text, format!("{}\n{}", doc, BLOCK));
    }

    #[test]
    fn fallback_header_without_entries_is_skipped() {
        let doc = "nav:\n  - Commands:\n  - Commands:\n    - Login: login.md\n";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(
            spliced.text,
            format!("nav:\n  - Commands:\n  - Commands:\n    - Login: login.md\n{}\n", BLOCK)
        );
    }

    #[test]
    fn missing_anchors_fail_without_output() {
        let doc = "nav:\n  - Home: index.md\n";
        let err = patch(BLOCK).apply(doc).unwrap_err();
        assert_eq!(
            err,
            SpliceError::AnchorNotFound {
                label: "Cloud Status".into(),
                fallback: "Commands".into()
            }
        );
    }

    #[test]
    fn anchor_requires_exact_indentation_and_label() {
        let doc = "nav:\n  - Cloud Status:\n    - Old: old.md\n      - Cloud Statuses:\n";
        let err = patch(BLOCK).apply(doc).unwrap_err();
        assert!(matches!(err, SpliceError::AnchorNotFound { .. }));
    }

    #[test]
    fn preserves_crlf_line_endings() {
        let doc = "nav:\r\n  - Commands:\r\n    - Cloud Status:\r\n      - Old: old.md\r\ntheme: x\r\n";
        let spliced = patch(BLOCK).apply(doc).unwrap();
        assert_eq!(
            spliced.text,
            format!(
                "nav:\r\n  - Commands:\r\n{}\r\ntheme: x\r\n",
                BLOCK.replace('\n', "\r\n")
            )
        );
        assert_eq!(patch(BLOCK).apply(&spliced.text).unwrap().outcome, SpliceOutcome::Unchanged);
    }

    #[test]
    fn rejects_block_with_wrong_first_line() {
        let err = patch("    - Other:\n      - A: a.md").apply(EXISTING).unwrap_err();
        assert!(matches!(err, SpliceError::InvalidReplacement { .. }));
    }

    #[test]
    fn rejects_block_with_shallow_continuation() {
        let err = patch("    - Cloud Status:\n    - A: a.md").apply(EXISTING).unwrap_err();
        assert_eq!(
            err.to_string(),
            "replacement block is not a valid 'Cloud Status' section: line 2 must be indented at least 6 spaces"
        );
    }

    #[test]
    fn trailing_newlines_in_block_are_ignored() {
        let with_newline = format!("{}\n\n", BLOCK);
        let a = patch(BLOCK).apply(EXISTING).unwrap().text;
        let b = patch(&with_newline).apply(EXISTING).unwrap().text;
        assert_eq!(a, b);
    }
}
