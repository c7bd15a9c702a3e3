use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EventService, load_event, load_student};
use crate::engine::Violation;
use crate::engine::participation::{check_registration, check_unregistration};
use crate::models::ApiResponse;
use crate::services::common::{current_principal, storage_error, violation_response};

pub async fn register(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(load_student(storage.as_ref(), &principal).await);
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    let loaded = futures_util::try_join!(
        storage.get_participation(event.id, student.id),
        storage.count_occupied_seats(event.id)
    );
    let (existing, occupied) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Ok(storage_error("查询报名信息失败", e)),
    };

    let now = chrono::Utc::now();
    if let Err(v) = check_registration(&event, &student, existing.as_ref(), occupied, now) {
        return Ok(violation_response(&v));
    }

    match storage.create_participation(event.id, student.id, now).await {
        Ok(participation) => {
            info!(event_id = event.id, student_id = student.id, "学生报名活动");
            Ok(HttpResponse::Created().json(ApiResponse::success(participation, "报名成功")))
        }
        Err(e) => Ok(storage_error("报名活动失败", e)),
    }
}

pub async fn unregister(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(load_student(storage.as_ref(), &principal).await);
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    let existing = match storage.get_participation(event.id, student.id).await {
        Ok(existing) => existing,
        Err(e) => return Ok(storage_error("查询报名信息失败", e)),
    };

    if let Err(v) = check_unregistration(&event, existing.as_ref(), chrono::Utc::now()) {
        return Ok(violation_response(&v));
    }
    let Some(participation) = existing else {
        return Ok(violation_response(&Violation::EventNotRegistered));
    };

    match storage.delete_participation(participation.id).await {
        Ok(_) => {
            info!(event_id = event.id, student_id = student.id, "学生取消报名");
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已取消报名")))
        }
        Err(e) => Ok(storage_error("取消报名失败", e)),
    }
}
