use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SemesterService;
use crate::models::semesters::requests::UpdateSemesterRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, grading_policy, not_found, resolve_semester, storage_error,
};

/// 部分更新学期，修改自评开始日期时重新计算截止日期
pub async fn update_semester(
    service: &SemesterService,
    request: &HttpRequest,
    id: i64,
    req: UpdateSemesterRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let current = try_respond!(resolve_semester(storage.as_ref(), Some(id), chrono::Utc::now()).await);

    let start = req.start_date.unwrap_or(current.start_date);
    let end = req.end_date.unwrap_or(current.end_date);
    if start >= end {
        return Ok(bad_request(ErrorCode::ValidationFailed, "学期开始日期必须早于结束日期"));
    }

    let deadline = req
        .grading_start_date
        .map(|start| grading_policy().grading_deadline(start));

    match storage.update_semester(id, req, deadline).await {
        Ok(Some(semester)) => Ok(HttpResponse::Ok().json(ApiResponse::success(semester, "学期已更新"))),
        Ok(None) => Ok(not_found(ErrorCode::SemesterNotFound, "学期不存在")),
        Err(e) => Ok(storage_error("更新学期失败", e)),
    }
}
