use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EventService, load_event};
use crate::engine::participation::{check_deletion, ensure_event_owner};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_principal, not_found, storage_error, violation_response};

pub async fn delete_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    if let Err(v) = ensure_event_owner(&principal, &event)
        .and_then(|_| check_deletion(&event, chrono::Utc::now()))
    {
        return Ok(violation_response(&v));
    }

    match storage.delete_event(event.id).await {
        Ok(true) => {
            info!(event_id = event.id, code = %event.event_code, "删除活动");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("活动已删除")))
        }
        Ok(false) => Ok(not_found(ErrorCode::EventNotFound, "活动不存在")),
        Err(e) => Ok(storage_error("删除活动失败", e)),
    }
}
