use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CriteriaService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{invalidate_structure, not_found, storage_error};

// 删除均为停用，历史分数仍可关联

pub async fn delete_category(
    service: &CriteriaService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_category(id).await {
        Ok(true) => {
            invalidate_structure(request).await;
            info!(category_id = id, "停用评分大类");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("评分大类已删除")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CategoryNotFound, "评分大类不存在")),
        Err(e) => Ok(storage_error("删除评分大类失败", e)),
    }
}

pub async fn delete_criteria(
    service: &CriteriaService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_criteria(id).await {
        Ok(true) => {
            invalidate_structure(request).await;
            info!(criteria_id = id, "停用评分标准");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("评分标准已删除")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在")),
        Err(e) => Ok(storage_error("删除评分标准失败", e)),
    }
}
