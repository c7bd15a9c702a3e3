use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SemesterService;
use crate::models::ApiResponse;
use crate::services::common::resolve_semester;

pub async fn get_semester(
    service: &SemesterService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let semester = try_respond!(resolve_semester(storage.as_ref(), Some(id), chrono::Utc::now()).await);

    Ok(HttpResponse::Ok().json(ApiResponse::success(semester, "查询成功")))
}
