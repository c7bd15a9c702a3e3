use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use super::faculty_status::load_faculty;
use crate::engine::Violation;
use crate::models::ApiResponse;
use crate::models::assessments::entities::ApprovalOutcome;
use crate::models::assessments::requests::FinalizeFacultyRequest;
use crate::models::assessments::responses::BulkTransitionResponse;
use crate::services::common::{current_principal, resolve_semester, storage_error, violation_response};

/// 学校最终确认学院的测评结果并写入评定等级
pub async fn finalize_faculty(
    service: &AssessmentService,
    request: &HttpRequest,
    req: FinalizeFacultyRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let faculty = try_respond!(load_faculty(storage.as_ref(), req.faculty_id).await);

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), Some(req.semester_id), now).await);

    match storage.finalize_faculty(faculty.id, &semester, now).await {
        Ok(ApprovalOutcome::Approved { updated }) => {
            info!(
                faculty_id = faculty.id,
                updated,
                by = principal.actor.id,
                "学院测评已最终确认"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkTransitionResponse {
                    updated_count: updated,
                },
                "学院测评已确认",
            )))
        }
        Ok(ApprovalOutcome::Incomplete { students, reviewed }) => {
            Ok(violation_response(&Violation::FacultyIncomplete { students, reviewed }))
        }
        Err(e) => Ok(storage_error("确认学院测评失败", e)),
    }
}
