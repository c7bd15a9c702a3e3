//! 评分表构建

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::resolvers::{SheetView, resolve_auto, resolve_manual};
use super::structure::CriteriaStructure;
use super::time_window::GradingPolicy;
use crate::models::assessments::responses::{CategoryScoreRow, CriteriaScoreRow, ScoreSheet};
use crate::models::criteria::entities::{Criteria, ScoringType};
use crate::models::events::entities::EventParticipationDetail;
use crate::models::scores::entities::{ApprovalStatus, ManualScore};
use crate::models::semesters::entities::Semester;

/// 构建评分表所需的全部输入
pub struct SheetInputs<'a> {
    pub semester: &'a Semester,
    pub structure: &'a CriteriaStructure,
    pub manual_scores: &'a [ManualScore],
    pub participations: &'a [EventParticipationDetail],
}

/// 大类得分封顶，不设下限
pub fn cap_category_total(sum: f64, max_score: f64) -> f64 {
    sum.min(max_score)
}

pub fn build_score_sheet(
    inputs: &SheetInputs<'_>,
    policy: &GradingPolicy,
    view: SheetView,
    now: DateTime<Utc>,
) -> ScoreSheet {
    let is_grading_period = policy.is_within_grading_period(Some(inputs.semester), now);
    let manual_by_criteria: HashMap<i64, &ManualScore> = inputs
        .manual_scores
        .iter()
        .map(|m| (m.criteria_id, m))
        .collect();

    let score_sheet: Vec<CategoryScoreRow> = inputs
        .structure
        .categories
        .iter()
        .map(|node| {
            let criteria: Vec<CriteriaScoreRow> = node
                .criteria
                .iter()
                .map(|crit| {
                    score_row(
                        crit,
                        inputs,
                        manual_by_criteria.get(&crit.id).copied(),
                        view,
                        is_grading_period,
                        now,
                    )
                })
                .collect();

            let sum: f64 = criteria.iter().map(|c| c.achieved_score).sum();
            CategoryScoreRow {
                category_id: node.category.id,
                category_code: node.category.category_code.clone(),
                category_name: node.category.category_name.clone(),
                max_score: node.category.max_score,
                total_score: cap_category_total(sum, node.category.max_score),
                criteria,
            }
        })
        .collect();

    let grand_total = score_sheet.iter().map(|c| c.total_score).sum();

    ScoreSheet {
        semester: inputs.semester.clone(),
        score_sheet,
        grand_total,
        is_grading_period,
    }
}

fn score_row(
    crit: &Criteria,
    inputs: &SheetInputs<'_>,
    manual: Option<&ManualScore>,
    view: SheetView,
    is_grading_period: bool,
    now: DateTime<Utc>,
) -> CriteriaScoreRow {
    let mut row = CriteriaScoreRow {
        criteria_id: crit.id,
        criteria_code: crit.criteria_code.clone(),
        content: crit.content.clone(),
        scoring_type: crit.scoring_type,
        max_score: crit.plus_score,
        unit: crit.unit,
        self_score: 0.0,
        achieved_score: 0.0,
        evidence: Vec::new(),
        note: String::new(),
        is_locked: true,
        require_evidence: crit.require_evidence,
        approval_status: None,
        approved_score: None,
    };

    match crit.scoring_type {
        ScoringType::Manual => {
            let resolved = resolve_manual(manual, view);
            row.self_score = resolved.self_score;
            row.achieved_score = resolved.achieved_score;
            row.evidence = resolved.evidence;
            row.note = resolved.note;
            row.approval_status = resolved.approval_status;
            row.approved_score = resolved.approved_score;
            row.is_locked = !is_grading_period;
        }
        ScoringType::Auto => {
            let total = resolve_auto(crit.id, inputs.semester, inputs.participations, now);
            row.self_score = total;
            row.achieved_score = total;
            if view == SheetView::Secretary {
                row.approval_status = Some(ApprovalStatus::Approved);
                row.approved_score = Some(total);
            }
        }
    }

    row
}

impl ScoreSheet {
    /// 以自评分数计算的总分（同样按大类封顶）
    pub fn self_total(&self) -> f64 {
        self.score_sheet
            .iter()
            .map(|cat| {
                let sum: f64 = cat.criteria.iter().map(|c| c.self_score).sum();
                cap_category_total(sum, cat.max_score)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{category, criteria, event, manual_score, march, participation, semester};
    use crate::models::events::entities::ParticipationStatus;

    fn find_row(sheet: &ScoreSheet, criteria_id: i64) -> &CriteriaScoreRow {
        sheet
            .score_sheet
            .iter()
            .flat_map(|c| c.criteria.iter())
            .find(|r| r.criteria_id == criteria_id)
            .unwrap()
    }

    fn structure() -> CriteriaStructure {
        CriteriaStructure::build(
            vec![category(1, 1, 20.0), category(2, 2, 12.0)],
            vec![
                criteria(11, 1, 1, ScoringType::Manual),
                criteria(12, 1, 2, ScoringType::Manual),
                criteria(21, 2, 1, ScoringType::Auto),
            ],
        )
    }

    #[test]
    fn test_submit_then_approve_scenario() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let structure = structure();

        // 03-05 提交 5 分，待审批
        let mut score = manual_score(11, 5.0, ApprovalStatus::Pending);
        let scores = vec![score.clone()];
        let inputs = SheetInputs {
            semester: &semester,
            structure: &structure,
            manual_scores: &scores,
            participations: &[],
        };
        let sheet = build_score_sheet(&inputs, &policy, SheetView::Student, march(5));
        let row = find_row(&sheet, 11);
        assert_eq!(row.self_score, 5.0);
        assert_eq!(row.achieved_score, 0.0);
        assert!(!row.is_locked);
        assert!(sheet.is_grading_period);
        assert_eq!(sheet.grand_total, 0.0);

        // 团支书批准 4 分
        score.approval_status = ApprovalStatus::Approved;
        score.approved_score = Some(4.0);
        let scores = vec![score];
        let inputs = SheetInputs {
            manual_scores: &scores,
            ..inputs
        };
        let sheet = build_score_sheet(&inputs, &policy, SheetView::Student, march(5));
        assert_eq!(find_row(&sheet, 11).achieved_score, 4.0);
        assert_eq!(sheet.grand_total, 4.0);
    }

    #[test]
    fn test_manual_rows_lock_after_window() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let structure = structure();
        let inputs = SheetInputs {
            semester: &semester,
            structure: &structure,
            manual_scores: &[],
            participations: &[],
        };
        let sheet = build_score_sheet(&inputs, &policy, SheetView::Student, march(9));
        assert!(!sheet.is_grading_period);
        assert!(find_row(&sheet, 11).is_locked);
        assert!(find_row(&sheet, 21).is_locked);
    }

    #[test]
    fn test_auto_scores_accumulate_and_cap() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let structure = structure();

        let mut registered = event(2, 21, 5.0, march(3));
        registered.end_date = Some(march(4));
        let participations = vec![
            participation(event(1, 21, 10.0, march(2)), ParticipationStatus::Attended),
            participation(registered, ParticipationStatus::Registered),
        ];
        let inputs = SheetInputs {
            semester: &semester,
            structure: &structure,
            manual_scores: &[],
            participations: &participations,
        };

        let sheet = build_score_sheet(&inputs, &policy, SheetView::Student, march(10));
        let row = find_row(&sheet, 21);
        assert_eq!(row.achieved_score, 15.0);
        assert_eq!(row.self_score, 15.0);
        // 大类 2 上限 12
        assert_eq!(sheet.score_sheet[1].total_score, 12.0);
        assert_eq!(sheet.grand_total, 12.0);
    }

    #[test]
    fn test_category_cap_and_grand_total() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let structure = structure();

        let mut a = manual_score(11, 15.0, ApprovalStatus::Approved);
        a.approved_score = Some(15.0);
        let mut b = manual_score(12, 9.0, ApprovalStatus::Approved);
        b.approved_score = Some(9.0);
        let scores = vec![a, b];
        let participations = vec![participation(
            event(1, 21, 3.0, march(2)),
            ParticipationStatus::Attended,
        )];
        let inputs = SheetInputs {
            semester: &semester,
            structure: &structure,
            manual_scores: &scores,
            participations: &participations,
        };

        let sheet = build_score_sheet(&inputs, &policy, SheetView::Student, march(5));
        assert_eq!(sheet.score_sheet[0].total_score, 20.0);
        assert_eq!(sheet.score_sheet[1].total_score, 3.0);
        assert_eq!(sheet.grand_total, 23.0);
    }

    #[test]
    fn test_negative_contributions_are_not_floored() {
        assert_eq!(cap_category_total(-3.0, 10.0), -3.0);
        assert_eq!(cap_category_total(12.0, 10.0), 10.0);
    }

    #[test]
    fn test_secretary_view_and_self_total() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let structure = structure();

        let pending = manual_score(11, 18.0, ApprovalStatus::Pending);
        let pending_two = manual_score(12, 6.0, ApprovalStatus::Pending);
        let scores = vec![pending, pending_two];
        let participations = vec![participation(
            event(1, 21, 4.0, march(2)),
            ParticipationStatus::Attended,
        )];
        let inputs = SheetInputs {
            semester: &semester,
            structure: &structure,
            manual_scores: &scores,
            participations: &participations,
        };

        let student = build_score_sheet(&inputs, &policy, SheetView::Student, march(5));
        assert_eq!(student.grand_total, 4.0);
        // 自评：min(18 + 6, 20) + 4
        assert_eq!(student.self_total(), 24.0);

        let secretary = build_score_sheet(&inputs, &policy, SheetView::Secretary, march(5));
        assert_eq!(secretary.grand_total, 24.0);
        let auto_row = find_row(&secretary, 21);
        assert_eq!(auto_row.approval_status, Some(ApprovalStatus::Approved));
        assert_eq!(auto_row.approved_score, Some(4.0));
    }

    #[test]
    fn test_build_is_idempotent() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let structure = structure();
        let scores = vec![manual_score(11, 5.0, ApprovalStatus::Pending)];
        let inputs = SheetInputs {
            semester: &semester,
            structure: &structure,
            manual_scores: &scores,
            participations: &[],
        };
        let first = build_score_sheet(&inputs, &policy, SheetView::Secretary, march(5));
        let second = build_score_sheet(&inputs, &policy, SheetView::Secretary, march(5));
        assert_eq!(first, second);
    }
}
