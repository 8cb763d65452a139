//! Attendance records and the per-class summary projection.

use crate::model::student::{students_in_class, Student, StudentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    #[serde(rename = "class")]
    pub class_label: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub status: AttendanceStatus,
    /// RFC 3339 instant of the save.
    pub timestamp: String,
}

/// A (class, date) pair selected in one of the attendance forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDay {
    pub class_label: String,
    pub date: String,
}

impl ClassDay {
    /// Returns `None` unless both parts are non-blank.
    pub fn new(class_label: &str, date: &str) -> Option<Self> {
        let class_label = class_label.trim();
        let date = date.trim();
        if class_label.is_empty() || date.is_empty() {
            return None;
        }
        Some(Self {
            class_label: class_label.to_string(),
            date: date.to_string(),
        })
    }

    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        record.class_label == self.class_label && record.date == self.date
    }
}

/// One absent student in a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsentEntry {
    pub student_id: StudentId,
    pub name: String,
    /// No record exists for the day; counted as absent.
    pub unmarked: bool,
}

impl AbsentEntry {
    pub fn label(&self) -> String {
        if self.unmarked {
            format!("{} (Unmarked)", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub selection: ClassDay,
    pub total: usize,
    pub present: usize,
    /// Recorded absences plus unmarked students.
    pub absent: usize,
    pub absent_students: Vec<AbsentEntry>,
}

impl AttendanceSummary {
    pub fn unmarked(&self) -> usize {
        self.absent_students
            .iter()
            .filter(|entry| entry.unmarked)
            .count()
    }
}

/// Partitions the current students of a class into present, recorded
/// absent and unmarked for one day.
///
/// Records of students no longer registered are ignored, as are records of
/// the same student saved under a different class.
pub fn summarize(
    students: &[Student],
    records: &[AttendanceRecord],
    selection: &ClassDay,
) -> AttendanceSummary {
    let day_records: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| selection.matches(record))
        .collect();

    let mut summary = AttendanceSummary {
        selection: selection.clone(),
        total: 0,
        present: 0,
        absent: 0,
        absent_students: Vec::new(),
    };

    for student in students_in_class(students, &selection.class_label) {
        summary.total += 1;
        let record = day_records
            .iter()
            .find(|record| record.student_id == student.id);
        match record.map(|record| record.status) {
            Some(AttendanceStatus::Present) => summary.present += 1,
            status => {
                summary.absent += 1;
                summary.absent_students.push(AbsentEntry {
                    student_id: student.id,
                    name: student.name.clone(),
                    unmarked: status.is_none(),
                });
            }
        }
    }

    summary
}

/// Replaces every record of `selection` with `replacement`.
pub fn replace_class_day(
    records: &[AttendanceRecord],
    selection: &ClassDay,
    replacement: Vec<AttendanceRecord>,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|record| !selection.matches(record))
        .cloned()
        .chain(replacement)
        .collect()
}

/// Status shown in the marking form: the existing record for the student
/// and day (any class), otherwise `Absent`.
pub fn prefilled_status(
    records: &[AttendanceRecord],
    student_id: StudentId,
    date: &str,
) -> AttendanceStatus {
    records
        .iter()
        .find(|record| record.student_id == student_id && record.date == date)
        .map_or(AttendanceStatus::Absent, |record| record.status)
}
