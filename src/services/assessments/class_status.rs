use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::engine::completion::class_completion;
use crate::engine::resolvers::SheetView;
use crate::engine::score_sheet::{SheetInputs, build_score_sheet};
use crate::engine::workflow::ensure_class_access;
use crate::models::assessments::responses::{ClassStatusResponse, StudentProgress};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_principal, get_cache, grading_policy, internal_error, load_structure, not_found,
    resolve_semester, storage_error, violation_response,
};

/// 班级学生的测评进度
///
/// 总分取已确认的测评总分（未确认为 0），自评总分按团支书视角评分表计算。
/// 全班自评分数与参与记录各一次查询。
pub async fn get_class_status(
    service: &AssessmentService,
    request: &HttpRequest,
    class_id: i64,
    semester_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "班级不存在")),
        Err(e) => return Ok(storage_error("查询班级失败", e)),
    };
    if let Err(v) = ensure_class_access(&principal, &class) {
        return Ok(violation_response(&v));
    }

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), semester_id, now).await);

    let loaded = futures_util::try_join!(
        storage.list_students_by_class(class.id),
        storage.list_class_assessments(class.id, &semester),
        storage.class_review_counts(class.id, &semester)
    );
    let (students, assessments, counts) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Ok(storage_error("查询班级测评失败", e)),
    };

    let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();
    let cache = get_cache(request);
    let loaded = futures_util::try_join!(
        load_structure(storage.as_ref(), cache.as_ref()),
        storage.list_manual_scores_for_students(&student_ids, &semester),
        storage.list_scoring_participations_for_students(&student_ids)
    );
    let (structure, manual_scores, participations) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Ok(internal_error("计算自评总分失败", e)),
    };

    let mut scores_by_student: HashMap<i64, Vec<_>> = HashMap::new();
    for score in manual_scores {
        scores_by_student.entry(score.student_id).or_default().push(score);
    }
    let mut participations_by_student: HashMap<i64, Vec<_>> = HashMap::new();
    for detail in participations {
        participations_by_student
            .entry(detail.participation.student_id)
            .or_default()
            .push(detail);
    }

    let policy = grading_policy();
    let sheets: Vec<_> = students
        .iter()
        .map(|student| {
            let inputs = SheetInputs {
                semester: &semester,
                structure: &structure,
                manual_scores: scores_by_student
                    .get(&student.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
                participations: participations_by_student
                    .get(&student.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            };
            build_score_sheet(&inputs, &policy, SheetView::Secretary, now)
        })
        .collect();

    let by_student: HashMap<i64, _> = assessments.into_iter().map(|a| (a.student_id, a)).collect();
    let items = students
        .into_iter()
        .zip(sheets)
        .map(|(student, sheet)| {
            let assessment = by_student.get(&student.id);
            StudentProgress {
                status: StudentProgress::status_of(assessment.map(|a| a.status)),
                total_score: assessment.map(|a| a.total_score).unwrap_or(0.0),
                total_self_score: sheet.self_total(),
                student,
            }
        })
        .collect();

    let response = ClassStatusResponse {
        completion: class_completion(&class, counts),
        class,
        semester,
        items,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
