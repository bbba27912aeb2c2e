use std::collections::HashMap;

use super::error_code::ErrorKind;

/// Mapping from numeric error codes to human-readable message templates.
///
/// The registry is an explicit value rather than process-wide state: the
/// store owns one and every error resolves its message against it at
/// construction time. Re-registering templates therefore affects errors
/// built afterwards, never ones already in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRegistry {
    templates: HashMap<u32, String>,
}

impl MessageRegistry {
    /// An empty registry; every lookup yields `""`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the standard template for every kind.
    pub fn with_defaults() -> Self {
        let templates = ErrorKind::ALL
            .iter()
            .map(|kind| (kind.code(), kind.template().to_string()))
            .collect();
        Self { templates }
    }

    /// Merges `templates` into the registry. Codes present in both are
    /// overwritten by the new map; codes only present here are retained.
    pub fn merge(&mut self, templates: HashMap<u32, String>) {
        self.templates.extend(templates);
    }

    /// The template registered for `code`, or `""` when unregistered.
    pub fn message(&self, code: u32) -> &str {
        self.templates
            .get(&code)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_templates() -> HashMap<u32, String> {
        ErrorKind::ALL
            .iter()
            .map(|kind| (kind.code(), kind.template().to_string()))
            .collect()
    }

    #[test]
    fn defaults_cover_every_kind() {
        let registry = MessageRegistry::with_defaults();
        assert_eq!(registry.len(), ErrorKind::ALL.len());
        for kind in ErrorKind::ALL {
            assert_eq!(registry.message(kind.code()), kind.template());
        }
    }

    #[test]
    fn unregistered_code_yields_empty_message() {
        let registry = MessageRegistry::with_defaults();
        assert_eq!(registry.message(0), "");
        assert_eq!(registry.message(12345), "");
    }

    #[test]
    fn merge_into_empty_registry_copies_everything() {
        let mut registry = MessageRegistry::new();
        assert!(registry.is_empty());

        registry.merge(base_templates());

        assert_eq!(registry.len(), base_templates().len());
        for (code, message) in base_templates() {
            assert_eq!(registry.message(code), message);
        }
    }

    #[test]
    fn merge_overlay_wins_on_conflicts_and_retains_the_rest() {
        let mut registry = MessageRegistry::new();
        registry.merge(base_templates());

        let overlay: HashMap<u32, String> = [
            (100, "100".to_string()),
            (200, "200".to_string()),
            (ErrorKind::NotDir.code(), "EcodeNotDir".to_string()),
        ]
        .into_iter()
        .collect();
        registry.merge(overlay.clone());

        // |B ∪ O| entries: two fresh codes plus the original set.
        assert_eq!(registry.len(), base_templates().len() + 2);
        for (code, message) in overlay {
            assert_eq!(registry.message(code), message);
        }
        for (code, message) in base_templates() {
            if code != ErrorKind::NotDir.code() {
                assert_eq!(registry.message(code), message);
            }
        }
        assert_eq!(registry.message(ErrorKind::NotDir.code()), "EcodeNotDir");
    }
}
