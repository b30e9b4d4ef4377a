use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        PoisonError, RwLock,
    },
};

pub use cursor::Line;
use derive_more::{Deref, DerefMut, IntoIterator};
use itertools::Itertools;

/// Where on its line a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Only the line is known (lexical errors).
    Line,
    /// The offending token is the end of input.
    End,
    /// The offending token, by lexeme.
    Lexeme(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Line => Ok(()),
            Location::End => write!(f, " at end"),
            Location::Lexeme(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("[line {line}] Error{at}: {message}")]
pub struct Diagnostic {
    pub line: Line,
    pub at: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: Line, at: Location, message: impl ToString) -> Self {
        Self { line, at, message: message.to_string() }
    }
}

#[derive(thiserror::Error, Debug, Default, Clone, PartialEq, Eq, Deref, DerefMut, IntoIterator)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl From<Diagnostic> for Diagnostics {
    fn from(d: Diagnostic) -> Self {
        Self(vec![d])
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// Receives the errors found while scanning and parsing.
///
/// Scanner and parser never look at what the reporter does with a
/// diagnostic; printing, counting or aborting is up to the driver.
pub trait Reporter {
    fn report(&self, diagnostic: Diagnostic);

    /// Reports an error that is only tied to a line, e.g. a lexical error.
    fn error(&self, line: Line, message: &str) {
        self.report(Diagnostic::new(line, Location::Line, message));
    }

    fn error_at(&self, line: Line, at: Location, message: &str) {
        self.report(Diagnostic::new(line, at, message));
    }
}

/// Stores every diagnostic it receives.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: RwLock<Vec<Diagnostic>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.read().unwrap_or_else(PoisonError::into_inner).is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Snapshot of the diagnostics received so far.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics(self.diagnostics.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        Diagnostics(self.diagnostics.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Reporter for Collector {
    fn report(&self, diagnostic: Diagnostic) {
        log::trace!("Collecting {:?}", diagnostic);
        self.diagnostics.write().unwrap_or_else(PoisonError::into_inner).push(diagnostic);
    }
}

/// Only counts diagnostics.
#[derive(Debug, Default)]
pub struct Counter {
    count: AtomicUsize,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed)
    }
}

impl Reporter for Counter {
    fn report(&self, _diagnostic: Diagnostic) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Prints diagnostics to stderr and remembers whether anything went wrong.
#[derive(Debug, Default)]
pub struct Stderr {
    had_error: AtomicBool,
}

impl Stderr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_error(&self) -> bool {
        self.had_error.load(Ordering::Relaxed)
    }

    /// Forget earlier errors, e.g. between two lines of a prompt session.
    pub fn reset(&self) {
        self.had_error.store(false, Ordering::Relaxed)
    }
}

impl Reporter for Stderr {
    fn report(&self, diagnostic: Diagnostic) {
        eprintln!("{diagnostic}");
        self.had_error.store(true, Ordering::Relaxed);
    }
}
