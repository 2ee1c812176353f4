//! Generic SQL dialect.

use super::{Capabilities, Dialect};

/// A generic SQL dialect using ANSI SQL standards.
///
/// Reports no upsert capabilities, so only plain multi-row inserts validate
/// against it.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Capabilities for GenericDialect {}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
