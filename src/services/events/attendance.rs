use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EventService, load_event, load_student};
use crate::engine::participation::{check_attendance_mark, check_self_check_in, ensure_event_owner};
use crate::models::events::entities::{AttendanceMark, ParticipationStatus};
use crate::models::events::requests::{CheckInRequest, MarkAttendanceRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_principal, not_found, storage_error, violation_response};

/// 学生凭签到口令签到
pub async fn check_in(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    req: CheckInRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(load_student(storage.as_ref(), &principal).await);
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    let existing = match storage.get_participation(event.id, student.id).await {
        Ok(existing) => existing,
        Err(e) => return Ok(storage_error("查询报名信息失败", e)),
    };

    let now = chrono::Utc::now();
    if let Err(v) = check_self_check_in(&event, existing.as_ref(), &req.password, now) {
        return Ok(violation_response(&v));
    }
    let Some(participation) = existing else {
        return Ok(not_found(ErrorCode::EventNotRegistered, "未报名该活动"));
    };

    let mark = AttendanceMark {
        status: ParticipationStatus::Attended,
        score_received: None,
        at: now,
    };
    match storage.mark_participation(participation.id, mark).await {
        Ok(Some(participation)) => {
            info!(event_id = event.id, student_id = student.id, "学生签到");
            Ok(HttpResponse::Ok().json(ApiResponse::success(participation, "签到成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::EventNotRegistered, "未报名该活动")),
        Err(e) => Ok(storage_error("签到失败", e)),
    }
}

/// 组织者登记学生出勤或缺席
pub async fn mark_attendance(
    service: &EventService,
    request: &HttpRequest,
    id: i64,
    req: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let event = try_respond!(load_event(storage.as_ref(), id).await);

    let now = chrono::Utc::now();
    if let Err(v) = ensure_event_owner(&principal, &event)
        .and_then(|_| check_attendance_mark(&event, req.status, req.score_received, now))
    {
        return Ok(violation_response(&v));
    }

    let participation = match storage.get_participation(event.id, req.student_id).await {
        Ok(Some(participation)) => participation,
        Ok(None) => return Ok(not_found(ErrorCode::EventNotRegistered, "该学生未报名此活动")),
        Err(e) => return Ok(storage_error("查询报名信息失败", e)),
    };

    let mark = AttendanceMark {
        status: req.status,
        score_received: req.score_received,
        at: now,
    };
    match storage.mark_participation(participation.id, mark).await {
        Ok(Some(participation)) => {
            info!(
                event_id = event.id,
                student_id = req.student_id,
                status = %participation.status,
                "登记考勤"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(participation, "考勤已登记")))
        }
        Ok(None) => Ok(not_found(ErrorCode::EventNotRegistered, "该学生未报名此活动")),
        Err(e) => Ok(storage_error("登记考勤失败", e)),
    }
}
