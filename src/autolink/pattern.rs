//! Scan and anchored regex pairs compiled from a single source fragment.

use regex::{Captures, Regex};

/// Owner, repository or user segment.
pub(crate) const SEGMENT: &str = "[A-Za-z0-9_.-]+";

/// Abbreviated or full commit hash, either case.
pub(crate) const SHORT_SHA: &str = "[0-9a-fA-F]{7,40}";

/// Full 40 character commit hash, either case.
pub(crate) const FULL_SHA: &str = "[0-9a-fA-F]{40}";

/// Non-anchored and anchored forms of one recognizer pattern.
///
/// Both regexes are compiled from the same fragment so that a scan hit at
/// offset `n` always yields an anchored match on `src[n..]`.
#[derive(Debug)]
pub struct Pattern {
    scan: Regex,
    anchored: Regex,
    space_or_end: bool,
}

impl Pattern {
    /// Compiles a fragment into its scan and anchored forms.
    ///
    /// # Panics
    ///
    /// Panics if the fragment is not a valid regex. Fragments are string
    /// literals, so this only fires on a programming error.
    pub(crate) fn new(fragment: &str) -> Self {
        Self {
            scan: Regex::new(fragment).expect("scan pattern"),
            anchored: Regex::new(&format!("^(?:{fragment})")).expect("anchored pattern"),
            space_or_end: false,
        }
    }

    /// Same as `new`, but a match only counts when followed by whitespace or
    /// the end of input.
    pub(crate) fn followed_by_space_or_end(fragment: &str) -> Self {
        Self {
            space_or_end: true,
            ..Self::new(fragment)
        }
    }

    /// Returns the byte offset of the earliest match anywhere in `src`.
    pub fn find(&self, src: &str) -> Option<usize> {
        self.find_in(src, true)
    }

    /// Like `find`, where `ends_input` tells whether the end of `src` is
    /// also the end of the whole input. A host scanning one text run of a
    /// larger document passes `false` when more markup follows the run.
    pub(crate) fn find_in(&self, src: &str, ends_input: bool) -> Option<usize> {
        if !self.space_or_end {
            return self.scan.find(src).map(|m| m.start());
        }

        // Candidates are the starts of scan hits and every later char
        // boundary, because a long run can still match at its tail.
        let first = self.scan.find(src)?.start();
        src[first..]
            .char_indices()
            .map(|(i, _)| first + i)
            .find(|&i| self.captures_in(&src[i..], ends_input).is_some())
    }

    /// Matches at the start of `src` only.
    pub fn captures<'s>(&self, src: &'s str) -> Option<Captures<'s>> {
        self.captures_in(src, true)
    }

    pub(crate) fn captures_in<'s>(&self, src: &'s str, ends_input: bool) -> Option<Captures<'s>> {
        let captures = self.anchored.captures(src)?;

        if self.space_or_end {
            let end = captures.get(0)?.end();
            let boundary_ok = match src[end..].chars().next() {
                Some(next) => next.is_whitespace(),
                None => ends_input,
            };
            if !boundary_ok {
                return None;
            }
        }

        Some(captures)
    }
}
