use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssessmentService;
use crate::engine::workflow::ensure_faculty_access;
use crate::models::assessments::requests::RemindClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::notify::templates;
use crate::services::common::{
    current_principal, get_notifier, not_found, storage_error, violation_response,
};

/// 提醒班级团支书尽快完成评分
pub async fn remind_class(
    service: &AssessmentService,
    request: &HttpRequest,
    req: RemindClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));

    let class = match storage.get_class_by_id(req.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "班级不存在")),
        Err(e) => return Ok(storage_error("查询班级失败", e)),
    };
    if let Err(v) = ensure_faculty_access(&principal, class.faculty_id) {
        return Ok(violation_response(&v));
    }

    let secretaries = match storage.list_class_secretaries(class.id).await {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => return Ok(not_found(ErrorCode::StudentNotFound, "该班级没有团支书")),
        Err(e) => return Ok(storage_error("查询团支书失败", e)),
    };

    let notifier = get_notifier(request);
    for secretary in &secretaries {
        let message = templates::class_reminder(secretary, req.message.as_deref());
        if let Err(e) = notifier.send(message).await {
            error!("发送评分提醒失败 {}: {}", secretary.email, e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::NotificationFailed,
                format!("发送提醒失败: {e}"),
            )));
        }
    }

    info!(class_id = class.id, count = secretaries.len(), "已提醒团支书");
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提醒已发送")))
}
