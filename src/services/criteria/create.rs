use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CriteriaService;
use crate::models::criteria::entities::{category_code_for, criteria_code_for};
use crate::models::criteria::requests::{CreateCategoryRequest, CreateCriteriaRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, invalidate_structure, not_found, storage_error};
use crate::utils::validate::{validate_required, validate_score};

pub async fn create_category(
    service: &CriteriaService,
    request: &HttpRequest,
    req: CreateCategoryRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&req.category_name, "大类名称不能为空")
        .and_then(|_| validate_score(req.max_score))
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);

    // 编码按现有数量顺延
    let count = match storage.count_categories().await {
        Ok(count) => count,
        Err(e) => return Ok(storage_error("统计评分大类失败", e)),
    };

    match storage.create_category(req, category_code_for(count)).await {
        Ok(category) => {
            invalidate_structure(request).await;
            info!(code = %category.category_code, "创建评分大类");
            Ok(HttpResponse::Created().json(ApiResponse::success(category, "评分大类创建成功")))
        }
        Err(e) => Ok(storage_error("创建评分大类失败", e)),
    }
}

pub async fn create_criteria(
    service: &CriteriaService,
    request: &HttpRequest,
    req: CreateCriteriaRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&req.content, "标准内容不能为空")
        .and_then(|_| validate_score(req.plus_score))
        .and_then(|_| validate_score(req.minus_score))
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);

    let category = match storage.get_category_by_id(req.category_id).await {
        Ok(Some(category)) if category.is_active => category,
        Ok(_) => return Ok(not_found(ErrorCode::CategoryNotFound, "评分大类不存在")),
        Err(e) => return Ok(storage_error("查询评分大类失败", e)),
    };

    let count = match storage.count_criteria_in_category(category.id).await {
        Ok(count) => count,
        Err(e) => return Ok(storage_error("统计评分标准失败", e)),
    };

    match storage
        .create_criteria(req, criteria_code_for(category.order, count))
        .await
    {
        Ok(criteria) => {
            invalidate_structure(request).await;
            info!(code = %criteria.criteria_code, "创建评分标准");
            Ok(HttpResponse::Created().json(ApiResponse::success(criteria, "评分标准创建成功")))
        }
        Err(e) => Ok(storage_error("创建评分标准失败", e)),
    }
}
