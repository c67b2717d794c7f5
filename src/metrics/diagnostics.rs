use strum::Display;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
}

/// One structured message produced while building a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// The metric key the message is about, when there is one.
    pub key: Option<String>,

    pub message: String,
}

/// Ordered collection of the diagnostics accumulated during extraction.
///
/// The extraction core never prints or logs; it pushes here and callers
/// decide how to surface the entries.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, key: Option<&str>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            key: key.map(str::to_string),
            message: message.into(),
        });
    }

    pub fn warn(&mut self, key: Option<&str>, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Warn,
            key: key.map(str::to_string),
            message: message.into(),
        });
    }

    /// Append everything from another sink, preserving order.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of warning-severity entries.
    #[must_use]
    pub fn warn_count(&self) -> usize {
        self.entries.iter().filter(|diag| diag.severity == Severity::Warn).count()
    }
}
