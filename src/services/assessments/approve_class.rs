use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::engine::Violation;
use crate::engine::workflow::ensure_faculty_access;
use crate::models::assessments::entities::ApprovalOutcome;
use crate::models::assessments::requests::ApproveClassRequest;
use crate::models::assessments::responses::BulkTransitionResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_principal, not_found, resolve_semester, storage_error, violation_response,
};

/// 学院审批班级：全部学生完成班级评审后批量推进
pub async fn approve_class(
    service: &AssessmentService,
    request: &HttpRequest,
    req: ApproveClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));

    let class = match storage.get_class_by_id(req.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "班级不存在")),
        Err(e) => return Ok(storage_error("查询班级失败", e)),
    };
    if let Err(v) = ensure_faculty_access(&principal, class.faculty_id) {
        return Ok(violation_response(&v));
    }

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), Some(req.semester_id), now).await);

    match storage
        .approve_class(class.id, &semester, principal.actor, now)
        .await
    {
        Ok(ApprovalOutcome::Approved { updated }) => {
            info!(class_id = class.id, updated, "学院审批班级通过");
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkTransitionResponse {
                    updated_count: updated,
                },
                "班级审批成功",
            )))
        }
        Ok(ApprovalOutcome::Incomplete { students, reviewed }) => {
            Ok(violation_response(&Violation::ClassIncomplete { students, reviewed }))
        }
        Err(e) => Ok(storage_error("审批班级失败", e)),
    }
}
