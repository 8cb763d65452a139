//! Feedback, suggestion and complaint (CSR) submissions.
//!
//! Submissions are written by the student-facing app; this side only reads
//! them and flips `isRead`. Fields this crate does not know about are kept
//! so that rewriting the collection never drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    /// Feedback, Suggestion or Complaint.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub student_name: String,
    /// Kept as raw JSON: the writer may store a number or a string.
    #[serde(default)]
    pub student_id: Value,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeedbackSubmission {
    pub fn new(
        kind: impl Into<String>,
        student_name: impl Into<String>,
        student_id: impl Into<Value>,
        message: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            student_name: student_name.into(),
            student_id: student_id.into(),
            message: message.into(),
            timestamp: timestamp.into(),
            is_read: false,
            extra: Map::new(),
        }
    }

    pub fn student_id_display(&self) -> String {
        match &self.student_id {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Header line shown in the notifications list.
    pub fn heading(&self) -> String {
        format!(
            "{} from {} (ID: {})",
            self.kind,
            self.student_name,
            self.student_id_display()
        )
    }
}

pub fn unread_count(submissions: &[FeedbackSubmission]) -> u32 {
    let unread = submissions
        .iter()
        .filter(|submission| !submission.is_read)
        .count();
    u32::try_from(unread).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{unread_count, FeedbackSubmission};

    #[test]
    fn unknown_fields_survive_a_rewrite() {
        let raw = r#"{"type":"Complaint","studentName":"Asha","studentId":"S-1","message":"Bus late","timestamp":"t","isRead":false,"priority":"high"}"#;
        let mut parsed: FeedbackSubmission = serde_json::from_str(raw).unwrap();
        parsed.is_read = true;

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["priority"], "high");
        assert_eq!(value["isRead"], true);
        assert_eq!(parsed.heading(), "Complaint from Asha (ID: S-1)");
    }

    #[test]
    fn numeric_student_id_is_displayed_plainly() {
        let submission = FeedbackSubmission::new("Feedback", "Ben", 42, "Thanks", "t");
        assert_eq!(submission.student_id_display(), "42");
    }

    #[test]
    fn counts_only_unread() {
        let mut read = FeedbackSubmission::new("Feedback", "Ben", 1, "a", "t");
        read.is_read = true;
        let unread = FeedbackSubmission::new("Suggestion", "Chen", 2, "b", "t");
        assert_eq!(unread_count(&[read, unread.clone(), unread]), 2);
    }
}
