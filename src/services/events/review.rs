use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EventService, load_event};
use crate::engine::participation::check_review;
use crate::models::events::requests::RejectEventRequest;
use crate::models::scores::entities::ApprovalStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, current_principal, storage_error, violation_response};
use crate::utils::validate::validate_required;

/// 学校管理员审批活动，审批人记录在 approved_by / approved_at
async fn review_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    decision: ApprovalStatus,
    reason: Option<String>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let mut event = try_respond!(load_event(storage.as_ref(), id).await);

    if let Err(v) = check_review(&event, decision) {
        return Ok(violation_response(&v));
    }

    let now = chrono::Utc::now();
    event.approval_status = decision;
    event.approved_by = Some(principal.actor);
    event.approved_at = Some(now);
    event.rejection_reason = reason;

    let message = match decision {
        ApprovalStatus::Approved => "活动审批通过",
        _ => "活动已驳回",
    };
    match storage.update_event(event, now).await {
        Ok(event) => {
            info!(event_id = event.id, decision = %decision, "审批活动");
            Ok(HttpResponse::Ok().json(ApiResponse::success(event, message)))
        }
        Err(e) => Ok(storage_error("审批活动失败", e)),
    }
}

pub async fn approve_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    review_event(service, request, id, ApprovalStatus::Approved, None).await
}

pub async fn reject_event(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    req: RejectEventRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_required(&req.reason, "驳回原因不能为空") {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let reason = req.reason.trim().to_string();
    review_event(service, request, id, ApprovalStatus::Rejected, Some(reason)).await
}
