//! Student registration record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Creation-time derived identifier (epoch milliseconds).
pub type StudentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Free-text class label, e.g. `5A`.
    #[serde(rename = "class")]
    pub class_label: String,
    /// School-issued unique business key. Older records may lack it.
    #[serde(default)]
    pub pen_number: String,
}

impl Student {
    /// PEN number for display, `N/A` when missing.
    pub fn pen_display(&self) -> &str {
        if self.pen_number.is_empty() {
            "N/A"
        } else {
            &self.pen_number
        }
    }
}

/// Derives the sorted set of distinct class labels from `students`.
pub fn classes_of(students: &[Student]) -> Vec<String> {
    students
        .iter()
        .map(|student| student.class_label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Finds a student by exact (case-sensitive) PEN number.
pub fn find_by_pen<'a>(students: &'a [Student], pen_number: &str) -> Option<&'a Student> {
    students
        .iter()
        .find(|student| student.pen_number == pen_number)
}

/// Students of one class, in registration order.
pub fn students_in_class<'a>(
    students: &'a [Student],
    class_label: &'a str,
) -> impl Iterator<Item = &'a Student> + 'a {
    students
        .iter()
        .filter(move |student| student.class_label == class_label)
}

#[cfg(test)]
mod tests {
    use super::{classes_of, find_by_pen, Student};

    fn student(id: i64, class_label: &str, pen: &str) -> Student {
        Student {
            id,
            name: format!("student-{id}"),
            class_label: class_label.to_string(),
            pen_number: pen.to_string(),
        }
    }

    #[test]
    fn classes_are_distinct_and_sorted() {
        let students = vec![
            student(1, "6B", "P1"),
            student(2, "5A", "P2"),
            student(3, "6B", "P3"),
        ];
        assert_eq!(classes_of(&students), vec!["5A", "6B"]);
    }

    #[test]
    fn pen_lookup_is_case_sensitive() {
        let students = vec![student(1, "5A", "pen-1")];
        assert!(find_by_pen(&students, "pen-1").is_some());
        assert!(find_by_pen(&students, "PEN-1").is_none());
    }

    #[test]
    fn deserializes_browser_shape_without_pen() {
        let parsed: Student =
            serde_json::from_str(r#"{"id":1700000000000,"name":"Asha","class":"5A"}"#).unwrap();
        assert_eq!(parsed.class_label, "5A");
        assert_eq!(parsed.pen_display(), "N/A");
    }

    #[test]
    fn serializes_with_browser_field_names() {
        let value = serde_json::to_value(student(9, "5A", "P9")).unwrap();
        assert_eq!(value["class"], "5A");
        assert_eq!(value["penNumber"], "P9");
    }
}
