use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use super::secretary_sheet::managed_student;
use crate::engine::workflow::check_score_review;
use crate::models::actors::entities::Principal;
use crate::models::criteria::entities::Criteria;
use crate::models::scores::entities::{ManualScoreKey, ScoreReview};
use crate::models::scores::requests::{RejectStudentScoreRequest, UpdateStudentScoreRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_principal, not_found, resolve_semester, storage_error, violation_response,
};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

async fn load_criteria(storage: &dyn Storage, criteria_id: i64) -> Result<Criteria, HttpResponse> {
    match storage.get_criteria_by_id(criteria_id).await {
        Ok(Some(criteria)) if criteria.is_active => Ok(criteria),
        Ok(_) => Err(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在")),
        Err(e) => Err(storage_error("查询评分标准失败", e)),
    }
}

/// 审核学生自评分数，两种审核动作共用
async fn review_score(
    service: &AssessmentService,
    request: &HttpRequest,
    semester_id: Option<i64>,
    student_id: i64,
    criteria_id: i64,
    review: ScoreReview,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal: Principal = try_respond!(current_principal(request));
    let student = try_respond!(managed_student(storage.as_ref(), &principal, student_id).await);

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), semester_id, now).await);
    let criteria = try_respond!(load_criteria(storage.as_ref(), criteria_id).await);

    let approved_score = match &review {
        ScoreReview::Approve { approved_score, .. } => Some(*approved_score),
        ScoreReview::Reject { .. } => None,
    };
    if let Err(v) = check_score_review(&criteria, approved_score) {
        return Ok(violation_response(&v));
    }

    let key = ManualScoreKey::new(student.id, criteria.id, &semester);
    let message = match review {
        ScoreReview::Approve { .. } => "分数已批准",
        ScoreReview::Reject { .. } => "自评已驳回",
    };
    match storage
        .review_manual_score(key, review, principal.actor, now)
        .await
    {
        Ok(score) => {
            info!(
                reviewer = principal.actor.id,
                student_id = student.id,
                criteria_id = criteria.id,
                status = %score.approval_status,
                "审核学生自评"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(score, message)))
        }
        Err(e) => Ok(storage_error("审核自评分数失败", e)),
    }
}

pub async fn update_student_score(
    service: &AssessmentService,
    request: &HttpRequest,
    semester_id: Option<i64>,
    req: UpdateStudentScoreRequest,
) -> ActixResult<HttpResponse> {
    let review = ScoreReview::Approve {
        approved_score: req.approved_score,
        note: req.note,
    };
    review_score(
        service,
        request,
        semester_id,
        req.student_id,
        req.criteria_id,
        review,
    )
    .await
}

pub async fn reject_student_score(
    service: &AssessmentService,
    request: &HttpRequest,
    semester_id: Option<i64>,
    req: RejectStudentScoreRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&req.reason, "驳回原因不能为空") {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let review = ScoreReview::Reject {
        reason: req.reason.trim().to_string(),
    };
    review_score(
        service,
        request,
        semester_id,
        req.student_id,
        req.criteria_id,
        review,
    )
    .await
}
