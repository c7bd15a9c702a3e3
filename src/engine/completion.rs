//! 班级、学院完成度统计

use crate::models::actors::entities::{Class, Faculty};
use crate::models::assessments::entities::ReviewCounts;
use crate::models::assessments::responses::{ClassCompletion, FacultyCompletion};

/// 四舍五入的百分比，分母为 0 时为 0
pub fn percentage(numerator: u64, denominator: u64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64 * 100.0).round() as i64
}

pub fn class_completion(class: &Class, counts: ReviewCounts) -> ClassCompletion {
    ClassCompletion {
        class_id: class.id,
        class_code: class.class_code.clone(),
        class_name: class.class_name.clone(),
        student_count: counts.students,
        finalized_count: counts.class_reviewed,
        percentage: percentage(counts.class_reviewed, counts.students),
    }
}

/// 学院完成度：按班级汇总，百分比以学院评审完成数计
pub fn faculty_completion(faculty: &Faculty, classes: &[ReviewCounts]) -> FacultyCompletion {
    let total = classes.iter().fold(ReviewCounts::default(), |acc, c| ReviewCounts {
        students: acc.students + c.students,
        class_reviewed: acc.class_reviewed + c.class_reviewed,
        faculty_reviewed: acc.faculty_reviewed + c.faculty_reviewed,
    });
    FacultyCompletion {
        faculty_id: faculty.id,
        faculty_code: faculty.faculty_code.clone(),
        faculty_name: faculty.faculty_name.clone(),
        student_count: total.students,
        class_reviewed_count: total.class_reviewed,
        faculty_reviewed_count: total.faculty_reviewed,
        percentage: percentage(total.faculty_reviewed, total.students),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> Class {
        Class {
            id: 3,
            class_code: "K65A".into(),
            class_name: "K65 A".into(),
            faculty_id: 1,
            academic_year: Some("2023-2024".into()),
        }
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(9, 10), 90);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_empty_class_is_zero_percent() {
        let completion = class_completion(&class(), ReviewCounts::default());
        assert_eq!(completion.student_count, 0);
        assert_eq!(completion.percentage, 0);
    }

    #[test]
    fn test_class_counts_reviewed_or_later() {
        let completion = class_completion(
            &class(),
            ReviewCounts {
                students: 10,
                class_reviewed: 9,
                faculty_reviewed: 4,
            },
        );
        assert_eq!(completion.finalized_count, 9);
        assert_eq!(completion.percentage, 90);
    }

    #[test]
    fn test_faculty_sums_classes() {
        let faculty = Faculty {
            id: 1,
            faculty_code: "CNTT".into(),
            faculty_name: "Information Technology".into(),
        };
        let completion = faculty_completion(
            &faculty,
            &[
                ReviewCounts {
                    students: 4,
                    class_reviewed: 4,
                    faculty_reviewed: 4,
                },
                ReviewCounts {
                    students: 6,
                    class_reviewed: 5,
                    faculty_reviewed: 0,
                },
            ],
        );
        assert_eq!(completion.student_count, 10);
        assert_eq!(completion.class_reviewed_count, 9);
        assert_eq!(completion.faculty_reviewed_count, 4);
        assert_eq!(completion.percentage, 40);
    }
}
