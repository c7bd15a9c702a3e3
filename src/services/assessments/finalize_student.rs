use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::AssessmentService;
use super::secretary_sheet::managed_student;
use crate::engine::Violation;
use crate::engine::resolvers::SheetView;
use crate::engine::workflow::total_mismatch;
use crate::models::assessments::entities::FinalizeOutcome;
use crate::models::assessments::requests::FinalizeStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_principal, get_cache, load_score_sheet, resolve_semester, storage_error,
    violation_response,
};
use crate::utils::validate::validate_score;

/// 团支书确认学生总分
///
/// 以调用方提供的总分为准，与团支书视角计算出的总分不一致时只记录警告。
pub async fn finalize_student(
    service: &AssessmentService,
    request: &HttpRequest,
    req: FinalizeStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_score(req.total_score) {
        return Ok(bad_request(ErrorCode::ScoreInvalid, msg));
    }

    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(managed_student(storage.as_ref(), &principal, req.student_id).await);

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), Some(req.semester_id), now).await);

    let cache = get_cache(request);
    match load_score_sheet(
        storage.as_ref(),
        cache.as_ref(),
        student.id,
        &semester,
        SheetView::Secretary,
        now,
    )
    .await
    {
        Ok(sheet) if total_mismatch(req.total_score, sheet.grand_total) => {
            warn!(
                student_id = student.id,
                supplied = req.total_score,
                computed = sheet.grand_total,
                "确认总分与计算总分不一致"
            );
        }
        Ok(_) => {}
        Err(e) => error!("计算学生总分失败，跳过核对: {}", e),
    }

    match storage
        .finalize_student(student.id, &semester, req.total_score, principal.actor, now)
        .await
    {
        Ok(FinalizeOutcome::Saved(assessment)) => {
            info!(
                student_id = student.id,
                total_score = req.total_score,
                "团支书确认学生总分"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "总分已确认")))
        }
        Ok(FinalizeOutcome::Locked(status)) => {
            info!(student_id = student.id, %status, "测评已锁定，拒绝确认");
            Ok(violation_response(&Violation::AssessmentLocked))
        }
        Err(e) => Ok(storage_error("确认学生总分失败", e)),
    }
}
