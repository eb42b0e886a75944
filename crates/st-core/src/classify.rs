//! Sleep classification of seizure events.

use crate::types::EventType;
use crate::vocabulary::Vocabulary;

/// Returns true if the event is a seizure whose description mentions a
/// configured sleep keyword.
///
/// Matching is a case-sensitive substring search. Non-seizure events are
/// never scanned and always return false.
pub fn is_sleep_associated(
    event_type: &EventType,
    description: &str,
    vocabulary: &Vocabulary,
) -> bool {
    if !vocabulary.is_seizure(event_type) {
        return false;
    }

    vocabulary
        .sleep_keywords
        .iter()
        .any(|keyword| description.contains(keyword.as_str()))
}
