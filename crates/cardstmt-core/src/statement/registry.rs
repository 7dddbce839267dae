//! Ordered registry of issuer parsers.

use std::fmt;

use super::StatementParser;
use super::issuers;
use crate::models::statement::Issuer;

/// Issuer parsers in identification priority order.
///
/// The first parser whose signature occurs in a document claims it, so
/// registration order matters when signatures overlap.
pub struct IssuerRegistry {
    parsers: Vec<Box<dyn StatementParser>>,
}

impl IssuerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry holding the built-in issuers.
    pub fn builtin() -> Self {
        Self {
            parsers: issuers::builtin(),
        }
    }

    /// Append a parser with the lowest priority so far.
    pub fn register(&mut self, parser: impl StatementParser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_parser(mut self, parser: impl StatementParser + 'static) -> Self {
        self.register(parser);
        self
    }

    /// Parser for `issuer`, if registered.
    pub fn get(&self, issuer: Issuer) -> Option<&dyn StatementParser> {
        self.parsers
            .iter()
            .find(|p| p.issuer() == issuer)
            .map(|p| p.as_ref())
    }

    /// Parsers in priority order.
    pub fn parsers(&self) -> impl Iterator<Item = &dyn StatementParser> {
        self.parsers.iter().map(|p| p.as_ref())
    }

    /// Issuers in priority order.
    pub fn issuers(&self) -> Vec<Issuer> {
        self.parsers().map(|p| p.issuer()).collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for IssuerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for IssuerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuerRegistry")
            .field("issuers", &self.issuers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::issuers::{HdfcParser, KotakParser};

    #[test]
    fn test_builtin_order() {
        let registry = IssuerRegistry::builtin();
        assert_eq!(
            registry.issuers(),
            vec![Issuer::Hdfc, Issuer::Icici, Issuer::Sbi, Issuer::Axis, Issuer::Kotak]
        );
    }

    #[test]
    fn test_lookup() {
        let registry = IssuerRegistry::new().with_parser(KotakParser);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(Issuer::Kotak).is_some());
        assert!(registry.get(Issuer::Hdfc).is_none());
        assert!(registry.get(Issuer::Unknown).is_none());
    }

    #[test]
    fn test_register_appends() {
        let mut registry = IssuerRegistry::new();
        assert!(registry.is_empty());
        registry.register(KotakParser);
        registry.register(HdfcParser);
        assert_eq!(registry.issuers(), vec![Issuer::Kotak, Issuer::Hdfc]);
    }
}
