use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CriteriaService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_error};

pub async fn get_category(
    service: &CriteriaService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_category_by_id(id).await {
        Ok(Some(category)) => Ok(HttpResponse::Ok().json(ApiResponse::success(category, "查询成功"))),
        Ok(None) => Ok(not_found(ErrorCode::CategoryNotFound, "评分大类不存在")),
        Err(e) => Ok(storage_error("查询评分大类失败", e)),
    }
}

pub async fn get_criteria(
    service: &CriteriaService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_criteria_by_id(id).await {
        Ok(Some(criteria)) => Ok(HttpResponse::Ok().json(ApiResponse::success(criteria, "查询成功"))),
        Ok(None) => Ok(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在")),
        Err(e) => Ok(storage_error("查询评分标准失败", e)),
    }
}
