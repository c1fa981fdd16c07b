//! Extracted question/answer records.

use serde::{Deserialize, Serialize};

/// One extracted question/answer pair.
///
/// Produced by the thread extractor and never mutated afterwards. The
/// timestamp is the answering comment's creation time; thread identifier
/// and title are copied from the containing thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAPair {
    /// Decoded question text (the parent comment's body)
    pub question: String,

    /// Decoded answer text (the target author's reply)
    pub answer: String,

    /// Creation timestamp of the answer
    pub timestamp: Option<String>,

    /// Identifier of the thread the pair came from
    pub thread_id: u64,

    /// Title of the thread the pair came from
    pub thread_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_keys() {
        let pair = QAPair {
            question: "How long does EB-2 take?".to_string(),
            answer: "About 1-2 years for most nationalities.".to_string(),
            timestamp: Some("2019-06-19T17:45:40.000Z".to_string()),
            thread_id: 42,
            thread_title: "AMA".to_string(),
        };

        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["question"], "How long does EB-2 take?");
        assert_eq!(json["answer"], "About 1-2 years for most nationalities.");
        assert_eq!(json["timestamp"], "2019-06-19T17:45:40.000Z");
        assert_eq!(json["thread_id"], 42);
        assert_eq!(json["thread_title"], "AMA");
    }

    #[test]
    fn test_round_trip() {
        let pair = QAPair {
            question: "q".to_string(),
            answer: "a".to_string(),
            timestamp: None,
            thread_id: 1,
            thread_title: String::new(),
        };

        let json = serde_json::to_string(&pair).unwrap();
        let back: QAPair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, back);
    }
}
