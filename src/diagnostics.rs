//! Side channel for signatures the rule table does not know.
use std::sync::Mutex;

use colored::Colorize;

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, declaration: &str, field: &str, signature: &str);
}

/// One human-readable line per unsupported signature.
pub fn format_unsupported(declaration: &str, field: &str, signature: &str) -> String {
    let qualified = format!("{declaration}.{field}");
    format!(
        "{} Type {} with signature {} is not supported.",
        "✘".bright_black(),
        qualified.as_str().bold(),
        signature.bold(),
    )
}

/// Forwards reports to the `tracing` subscriber at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, declaration: &str, field: &str, signature: &str) {
        tracing::warn!(
            declaration,
            field,
            signature,
            "{}",
            format_unsupported(declaration, field, signature)
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    pub declaration: String,
    pub field: String,
    pub signature: String,
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<Unsupported>>,
}

impl CollectingSink {
    pub fn new() -> Self { Self::default() }

    pub fn reports(&self) -> Vec<Unsupported> {
        self.reports
            .lock()
            .map(|xs| xs.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize { self.reports().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, declaration: &str, field: &str, signature: &str) {
        let entry = Unsupported {
            declaration: declaration.to_string(),
            field: field.to_string(),
            signature: signature.to_string(),
        };
        match self.reports.lock() {
            Ok(mut xs) => xs.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
