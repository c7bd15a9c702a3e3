use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SemesterService;
use crate::models::ApiResponse;
use crate::models::semesters::responses::SemesterListResponse;
use crate::services::common::{resolve_semester, storage_error};

pub async fn list_semesters(
    service: &SemesterService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_semesters().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SemesterListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(storage_error("查询学期列表失败", e)),
    }
}

// 覆盖当前时间的有效学期
pub async fn get_current_semester(
    service: &SemesterService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let semester = try_respond!(resolve_semester(storage.as_ref(), None, chrono::Utc::now()).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(semester, "查询成功")))
}
