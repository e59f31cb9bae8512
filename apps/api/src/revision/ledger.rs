//! Accept/reject state over one detection run's change list.

use serde::{Deserialize, Serialize};

use crate::revision::{RevisionError, TextChange};

/// The change list for one document's detection run.
///
/// Identity fields of the contained changes (ids, offsets, segments) are
/// immutable once detected; only the `accepted` flags move. Serializes
/// transparently as the bare change array, which is the persisted JSONB
/// form and the wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLedger {
    changes: Vec<TextChange>,
}

impl ChangeLedger {
    pub fn new(changes: Vec<TextChange>) -> Self {
        Self { changes }
    }

    /// Sets the `accepted` flag for the change with the given id.
    ///
    /// Unknown ids are an error, not a no-op: a typoed id must be visible
    /// to the caller. Re-toggling the same id any number of times is fine;
    /// last write wins.
    pub fn toggle(&mut self, id: &str, accept: bool) -> Result<(), RevisionError> {
        match self.changes.iter_mut().find(|c| c.id == id) {
            Some(change) => {
                change.accepted = accept;
                Ok(())
            }
            None => Err(RevisionError::UnknownChangeId(id.to_string())),
        }
    }

    pub fn get(&self, id: &str) -> Option<&TextChange> {
        self.changes.iter().find(|c| c.id == id)
    }

    /// All changes in detection order.
    pub fn list(&self) -> &[TextChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision::detect;

    fn sample_ledger() -> ChangeLedger {
        ChangeLedger::new(detect(
            "I was working as developer. I has three years experience.",
            "I worked as a developer. I have three years of experience.",
        ))
    }

    #[test]
    fn test_toggle_accept_and_revert() {
        let mut ledger = sample_ledger();
        assert!(ledger.len() >= 2);

        ledger.toggle("0", true).unwrap();
        assert!(ledger.get("0").unwrap().accepted);

        ledger.toggle("0", false).unwrap();
        assert!(!ledger.get("0").unwrap().accepted);
    }

    #[test]
    fn test_toggle_unknown_id_errors() {
        let mut ledger = sample_ledger();
        let err = ledger.toggle("999", true).unwrap_err();
        assert!(matches!(err, RevisionError::UnknownChangeId(id) if id == "999"));
    }

    #[test]
    fn test_toggle_does_not_disturb_identity() {
        let mut ledger = sample_ledger();
        let before: Vec<_> = ledger
            .list()
            .iter()
            .map(|c| (c.id.clone(), c.start_offset, c.end_offset))
            .collect();

        ledger.toggle("1", true).unwrap();

        let after: Vec<_> = ledger
            .list()
            .iter()
            .map(|c| (c.id.clone(), c.start_offset, c.end_offset))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_list_preserves_detection_order() {
        let ledger = sample_ledger();
        for (idx, change) in ledger.list().iter().enumerate() {
            assert_eq!(change.id, idx.to_string());
        }
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let ledger = sample_ledger();
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());

        let round_tripped: ChangeLedger = serde_json::from_value(json).unwrap();
        assert_eq!(round_tripped, ledger);
    }

    #[test]
    fn test_style_category_is_accepted_on_input() {
        let json = serde_json::json!([{
            "id": "0",
            "original_segment": "utilize",
            "suggested_segment": "use",
            "start_offset": 0,
            "end_offset": 7,
            "category": "style",
            "context": "utilize the tool",
        }]);
        let ledger: ChangeLedger = serde_json::from_value(json).unwrap();
        assert_eq!(ledger.len(), 1);
        // `accepted` was omitted and defaults to false.
        assert!(!ledger.get("0").unwrap().accepted);
    }
}
