use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::create::{resolve_targets, validate_event_fields};
use super::{EventService, load_event};
use crate::engine::participation::{EventTargets, ensure_event_owner};
use crate::models::events::requests::UpdateEventRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_principal, not_found, storage_error, violation_response,
};

/// 修改活动：主办方类型变化时重新推导范围，并清除新范围不使用的目标
pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    req: UpdateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let mut event = try_respond!(load_event(storage.as_ref(), id).await);

    if let Err(v) = ensure_event_owner(&principal, &event) {
        return Ok(violation_response(&v));
    }

    if let Some(criteria_id) = req.criteria_id.filter(|c| *c != event.criteria_id) {
        match storage.get_criteria_by_id(criteria_id).await {
            Ok(Some(c)) if c.is_active => event.criteria_id = criteria_id,
            Ok(_) => return Ok(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在")),
            Err(e) => return Ok(storage_error("查询评分标准失败", e)),
        }
    }

    if let Some(name) = req.event_name {
        event.event_name = name.trim().to_string();
    }
    if let Some(score) = req.score {
        event.score = score;
    }
    if let Some(event_date) = req.event_date {
        event.event_date = event_date;
    }
    if req.end_date.is_some() {
        event.end_date = req.end_date;
    }
    if req.description.is_some() {
        event.description = req.description;
    }
    if req.location.is_some() {
        event.location = req.location;
    }
    if req.max_participants.is_some() {
        event.max_participants = req.max_participants;
    }

    if let Err(msg) = validate_event_fields(
        &event.event_name,
        event.score,
        event.event_date,
        event.end_date,
        event.max_participants,
    ) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let organizer = req.organizer_type.unwrap_or(event.organizer_type);
    let targets = EventTargets::derive(
        organizer,
        req.target_class_id.or(event.target_class_id),
        req.target_faculty_id.or(event.target_faculty_id),
    );
    let targets = try_respond!(resolve_targets(storage.as_ref(), targets, None).await);
    event.organizer_type = organizer;
    event.scope = targets.scope;
    event.target_class_id = targets.target_class_id;
    event.target_faculty_id = targets.target_faculty_id;

    match storage.update_event(event, chrono::Utc::now()).await {
        Ok(event) => {
            info!(event_id = event.id, "更新活动");
            Ok(HttpResponse::Ok().json(ApiResponse::success(event, "活动已更新")))
        }
        Err(e) => Ok(storage_error("更新活动失败", e)),
    }
}
