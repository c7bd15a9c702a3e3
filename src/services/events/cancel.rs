use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{EventService, load_event};
use crate::engine::Violation;
use crate::engine::participation::ensure_event_owner;
use crate::models::events::entities::ParticipationStatus;
use crate::models::events::requests::CancelEventRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::notify::templates;
use crate::services::common::{
    current_principal, get_notifier, not_found, storage_error, violation_response,
};

/// 取消活动：停用活动并作废全部参与记录，通知已报名学生
pub async fn cancel_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    req: CancelEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    if let Err(v) = ensure_event_owner(&principal, &event) {
        return Ok(violation_response(&v));
    }
    if !event.is_active {
        return Ok(violation_response(&Violation::EventNotOpen));
    }

    let recipients: Vec<String> = match storage.list_event_participants(event.id).await {
        Ok(participants) => participants
            .into_iter()
            .filter(|p| p.participation.status == ParticipationStatus::Registered)
            .map(|p| p.student.email)
            .collect(),
        Err(e) => return Ok(storage_error("查询活动参与者失败", e)),
    };

    let (event, cancelled) = match storage.cancel_event(event.id, chrono::Utc::now()).await {
        Ok(Some(cancelled)) => cancelled,
        Ok(None) => return Ok(not_found(ErrorCode::EventNotFound, "活动不存在")),
        Err(e) => return Ok(storage_error("取消活动失败", e)),
    };

    // 通知失败不影响取消结果
    let message = templates::event_cancelled(recipients, &event, req.reason.as_deref());
    if let Err(e) = get_notifier(request).send(message).await {
        warn!(event_id = event.id, "发送活动取消通知失败: {}", e);
    }

    info!(event_id = event.id, cancelled, "活动已取消");
    Ok(HttpResponse::Ok().json(ApiResponse::success(event, "活动已取消")))
}
