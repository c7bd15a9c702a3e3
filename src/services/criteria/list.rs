use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CriteriaService;
use crate::models::ApiResponse;
use crate::models::criteria::requests::CriteriaListQuery;
use crate::models::criteria::responses::{CategoryListResponse, CriteriaListResponse};
use crate::services::common::storage_error;

pub async fn list_categories(
    service: &CriteriaService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_categories().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CategoryListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(storage_error("查询评分大类失败", e)),
    }
}

pub async fn list_criteria(
    service: &CriteriaService,
    request: &HttpRequest,
    query: CriteriaListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_criteria(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CriteriaListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(storage_error("查询评分标准失败", e)),
    }
}
