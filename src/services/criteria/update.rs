use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CriteriaService;
use crate::models::criteria::requests::{UpdateCategoryRequest, UpdateCriteriaRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, invalidate_structure, not_found, storage_error};
use crate::utils::validate::{validate_required, validate_score};

pub async fn update_category(
    service: &CriteriaService,
    request: &HttpRequest,
    id: i64,
    req: UpdateCategoryRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &req.category_name
        && let Err(msg) = validate_required(name, "大类名称不能为空")
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    if let Some(max_score) = req.max_score
        && let Err(msg) = validate_score(max_score)
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);

    match storage.update_category(id, req).await {
        Ok(Some(category)) => {
            invalidate_structure(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(category, "评分大类已更新")))
        }
        Ok(None) => Ok(not_found(ErrorCode::CategoryNotFound, "评分大类不存在")),
        Err(e) => Ok(storage_error("更新评分大类失败", e)),
    }
}

pub async fn update_criteria(
    service: &CriteriaService,
    request: &HttpRequest,
    id: i64,
    req: UpdateCriteriaRequest,
) -> ActixResult<HttpResponse> {
    if let Some(content) = &req.content
        && let Err(msg) = validate_required(content, "标准内容不能为空")
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    for score in [req.plus_score, req.minus_score].into_iter().flatten() {
        if let Err(msg) = validate_score(score) {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
    }

    let storage = service.get_storage(request);

    match storage.update_criteria(id, req).await {
        Ok(Some(criteria)) => {
            invalidate_structure(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(criteria, "评分标准已更新")))
        }
        Ok(None) => Ok(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在")),
        Err(e) => Ok(storage_error("更新评分标准失败", e)),
    }
}
