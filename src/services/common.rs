//! 各服务共用的请求上下文与响应辅助函数

use std::fmt::Display;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::cache::{ObjectCache, keys};
use crate::config::AppConfig;
use crate::engine::Violation;
use crate::engine::resolvers::SheetView;
use crate::engine::score_sheet::{SheetInputs, build_score_sheet};
use crate::engine::structure::CriteriaStructure;
use crate::engine::time_window::GradingPolicy;
use crate::errors::{DRLSystemError, Result};
use crate::middlewares::RequireJWT;
use crate::models::actors::entities::Principal;
use crate::models::assessments::responses::ScoreSheet;
use crate::models::criteria::requests::CriteriaListQuery;
use crate::models::semesters::entities::Semester;
use crate::models::{ApiResponse, ErrorCode};
use crate::notify::{LogNotifier, Notifier};
use crate::storage::Storage;

/// 业务规则违反：范围或身份问题返回 403，其余返回 400
pub(crate) fn violation_response(violation: &Violation) -> HttpResponse {
    let body = ApiResponse::error_empty(violation.error_code(), violation.to_string());
    if violation.is_forbidden() {
        HttpResponse::Forbidden().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

pub(crate) fn internal_error(context: &str, err: impl Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}

/// 存储层错误：调用方可修正的错误按类型返回 4xx
pub(crate) fn storage_error(context: &str, err: DRLSystemError) -> HttpResponse {
    match err {
        DRLSystemError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        DRLSystemError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)),
        e if e.is_client_error() => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())),
        e => internal_error(context, e),
    }
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn current_principal(request: &HttpRequest) -> std::result::Result<Principal, HttpResponse> {
    RequireJWT::extract_principal(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录"))
    })
}

/// 按 id 查找学期；未指定时取覆盖当前时间的有效学期
pub(crate) async fn resolve_semester(
    storage: &dyn Storage,
    semester_id: Option<i64>,
    now: DateTime<Utc>,
) -> std::result::Result<Semester, HttpResponse> {
    let found = match semester_id {
        Some(id) => storage.get_semester_by_id(id).await,
        None => storage.find_current_semester(now).await,
    };

    match found {
        Ok(Some(semester)) => Ok(semester),
        Ok(None) if semester_id.is_some() => {
            Err(not_found(ErrorCode::SemesterNotFound, "学期不存在"))
        }
        Ok(None) => Err(not_found(ErrorCode::NoActiveSemester, "当前没有进行中的学期")),
        Err(e) => Err(storage_error("查询学期失败", e)),
    }
}

pub(crate) fn grading_policy() -> GradingPolicy {
    GradingPolicy::from_config(&AppConfig::get().grading)
}

pub(crate) fn get_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone())
}

pub(crate) fn get_notifier(request: &HttpRequest) -> Arc<dyn Notifier> {
    request
        .app_data::<web::Data<Arc<dyn Notifier>>>()
        .map(|n| n.get_ref().clone())
        .unwrap_or_else(|| Arc::new(LogNotifier))
}

/// 生效中的评分结构，优先读取缓存
pub(crate) async fn load_structure(
    storage: &dyn Storage,
    cache: Option<&Arc<dyn ObjectCache>>,
) -> Result<CriteriaStructure> {
    if let Some(cache) = cache
        && let Some(structure) = cache
            .get_json::<CriteriaStructure>(keys::CRITERIA_STRUCTURE)
            .await
    {
        return Ok(structure);
    }

    let (categories, criteria) = futures_util::try_join!(
        storage.list_categories(),
        storage.list_criteria(CriteriaListQuery::default())
    )?;
    let structure = CriteriaStructure::build(categories, criteria);
    debug!("评分结构已重建，共 {} 项标准", structure.criteria_count());

    if let Some(cache) = cache {
        cache
            .insert_json(
                keys::CRITERIA_STRUCTURE.to_string(),
                &structure,
                AppConfig::get().cache.default_ttl,
            )
            .await;
    }

    Ok(structure)
}

/// 评分大类或标准变更后清除结构缓存
pub(crate) async fn invalidate_structure(request: &HttpRequest) {
    if let Some(cache) = get_cache(request) {
        cache.remove(keys::CRITERIA_STRUCTURE).await;
    }
}

/// 并发读取结构、自评分数与参与记录后构建评分表
pub(crate) async fn load_score_sheet(
    storage: &dyn Storage,
    cache: Option<&Arc<dyn ObjectCache>>,
    student_id: i64,
    semester: &Semester,
    view: SheetView,
    now: DateTime<Utc>,
) -> Result<ScoreSheet> {
    let (structure, manual_scores, participations) = futures_util::try_join!(
        load_structure(storage, cache),
        storage.list_manual_scores(student_id, semester),
        storage.list_scoring_participations(student_id)
    )?;

    let inputs = SheetInputs {
        semester,
        structure: &structure,
        manual_scores: &manual_scores,
        participations: &participations,
    };

    Ok(build_score_sheet(&inputs, &grading_policy(), view, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_violation_status_codes() {
        let forbidden = violation_response(&Violation::EventScopeMismatch);
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let rejected = violation_response(&Violation::ClassIncomplete {
            students: 10,
            reviewed: 9,
        });
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(rejected.into_body()).await.unwrap_or_default();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], ErrorCode::ClassNotComplete as i32);
        assert_eq!(json["success"], false);
    }

    #[test]
    fn test_storage_error_mapping() {
        assert_eq!(
            storage_error("x", DRLSystemError::not_found("missing")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            storage_error("x", DRLSystemError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            storage_error("x", DRLSystemError::database_operation("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
