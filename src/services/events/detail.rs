use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EventService, load_event};
use crate::engine::participation::ensure_event_owner;
use crate::models::ApiResponse;
use crate::models::events::responses::{EventParticipantsResponse, EventWithPasswordResponse};
use crate::services::common::{current_principal, storage_error, violation_response};

/// 活动详情，创建者和管理员可同时看到签到口令
pub async fn get_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    if ensure_event_owner(&principal, &event).is_ok() {
        let attendance_password = event.attendance_password.clone();
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventWithPasswordResponse {
                event,
                attendance_password,
            },
            "查询成功",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(event, "查询成功")))
}

pub async fn list_participants(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    if let Err(v) = ensure_event_owner(&principal, &event) {
        return Ok(violation_response(&v));
    }

    match storage.list_event_participants(event.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EventParticipantsResponse {
                count: items.len(),
                items,
            },
            "查询成功",
        ))),
        Err(e) => Ok(storage_error("查询活动参与者失败", e)),
    }
}
