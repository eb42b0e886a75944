//! Event-type vocabulary and sleep keywords.
//!
//! The log's type labels are free text. Three of them drive the engine: the
//! seizure type and the annotation marker types. Together with the sleep
//! keyword list they are configuration, handed to the engine as a
//! [`Vocabulary`] value.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::VocabularyError;
use crate::types::EventType;

/// Seizure episodes.
pub const DEFAULT_SEIZURE_TYPE: &str = "癲癇";

/// Medication code marker.
pub const DEFAULT_MEDICATION_CODE_MARKER: &str = "S101";

/// Dosage adjustment marker.
pub const DEFAULT_DOSAGE_MARKER: &str = "藥量調整";

/// Description fragments that place a seizure in a sleep context:
/// nap, sleeping, nighttime, dreaming, falling asleep, being woken,
/// early morning, mid-sleep, lying down.
pub const DEFAULT_SLEEP_KEYWORDS: &[&str] = &[
    "午睡", "睡覺", "夜間", "睡夢", "入睡", "叫醒", "清晨", "睡中", "躺著",
];

/// Types shown when no explicit selection is made:
/// seizure, wake, seizure medication, other medication.
pub const DEFAULT_EVENT_TYPES: &[&str] = &["癲癇", "起床", "癲癇用藥", "其他用藥"];

/// An annotation event type drawn as an overlay marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// The event type that produces this marker.
    pub event_type: EventType,

    /// Display label. Falls back to the event type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MarkerSpec {
    pub const fn new(event_type: EventType, label: Option<String>) -> Self {
        Self { event_type, label }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.event_type.as_str())
    }
}

/// The special event types and keywords the engine works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Event type of seizure episodes.
    pub seizure_type: EventType,

    /// Marker types, in display order.
    pub markers: Vec<MarkerSpec>,

    /// Case-sensitive substrings marking a sleep-associated seizure.
    pub sleep_keywords: Vec<String>,

    /// Types selected when the caller does not choose any.
    pub default_event_types: Vec<EventType>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            seizure_type: EventType::from_const(DEFAULT_SEIZURE_TYPE),
            markers: vec![
                MarkerSpec::new(EventType::from_const(DEFAULT_MEDICATION_CODE_MARKER), None),
                MarkerSpec::new(EventType::from_const(DEFAULT_DOSAGE_MARKER), None),
            ],
            sleep_keywords: DEFAULT_SLEEP_KEYWORDS
                .iter()
                .map(|kw| (*kw).to_string())
                .collect(),
            default_event_types: DEFAULT_EVENT_TYPES
                .iter()
                .map(|t| EventType::from_const(t))
                .collect(),
        }
    }
}

impl Vocabulary {
    /// Checks the invariants serde cannot express.
    ///
    /// An empty keyword would mark every seizure as sleep-associated, and a
    /// marker sharing the seizure type would double-report the same records.
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if self.sleep_keywords.iter().any(String::is_empty) {
            return Err(VocabularyError::EmptyKeyword);
        }

        let mut seen = HashSet::new();
        for marker in &self.markers {
            if marker.event_type == self.seizure_type {
                return Err(VocabularyError::MarkerIsSeizureType(
                    marker.event_type.to_string(),
                ));
            }
            if !seen.insert(&marker.event_type) {
                return Err(VocabularyError::DuplicateMarker(
                    marker.event_type.to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn is_seizure(&self, event_type: &EventType) -> bool {
        *event_type == self.seizure_type
    }

    /// Looks up the marker configured for an event type.
    pub fn marker(&self, event_type: &EventType) -> Option<&MarkerSpec> {
        self.markers.iter().find(|m| m.event_type == *event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn et(label: &str) -> EventType {
        EventType::new(label).unwrap()
    }

    #[test]
    fn default_vocabulary_is_valid() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.validate().is_ok());
        assert_eq!(vocabulary.markers.len(), 2);
        assert_eq!(vocabulary.sleep_keywords.len(), 9);
        assert!(vocabulary.is_seizure(&et("癲癇")));
    }

    #[test]
    fn rejects_empty_keyword() {
        let vocabulary = Vocabulary {
            sleep_keywords: vec!["nap".to_string(), String::new()],
            ..Vocabulary::default()
        };
        assert_eq!(vocabulary.validate(), Err(VocabularyError::EmptyKeyword));
    }

    #[test]
    fn rejects_duplicate_marker() {
        let vocabulary = Vocabulary {
            markers: vec![
                MarkerSpec::new(et("S101"), None),
                MarkerSpec::new(et("S101"), Some("again".to_string())),
            ],
            ..Vocabulary::default()
        };
        assert_eq!(
            vocabulary.validate(),
            Err(VocabularyError::DuplicateMarker("S101".to_string()))
        );
    }

    #[test]
    fn rejects_marker_equal_to_seizure_type() {
        let vocabulary = Vocabulary {
            markers: vec![MarkerSpec::new(et("癲癇"), None)],
            ..Vocabulary::default()
        };
        assert!(matches!(
            vocabulary.validate(),
            Err(VocabularyError::MarkerIsSeizureType(_))
        ));
    }

    #[test]
    fn marker_label_falls_back_to_type() {
        let plain = MarkerSpec::new(et("S101"), None);
        assert_eq!(plain.display_label(), "S101");

        let labelled = MarkerSpec::new(et("dose-adjust"), Some("Dose change".to_string()));
        assert_eq!(labelled.display_label(), "Dose change");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{"seizure_type": "seizure"}"#;
        let vocabulary: Vocabulary = serde_json::from_str(json).unwrap();
        assert_eq!(vocabulary.seizure_type, et("seizure"));
        assert_eq!(vocabulary.sleep_keywords.len(), 9);
    }
}
