use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::engine::resolvers::SheetView;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_principal, get_cache, internal_error, load_score_sheet, resolve_semester,
};

pub async fn get_score_sheet(
    service: &AssessmentService,
    request: &HttpRequest,
    semester_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));

    let Some(student_id) = principal.student_id() else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有学生可以查看个人评分表",
        )));
    };

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), semester_id, now).await);
    let cache = get_cache(request);

    match load_score_sheet(
        storage.as_ref(),
        cache.as_ref(),
        student_id,
        &semester,
        SheetView::Student,
        now,
    )
    .await
    {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(sheet, "查询成功"))),
        Err(e) => Ok(internal_error("生成评分表失败", e)),
    }
}
