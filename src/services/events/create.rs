use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use super::EventService;
use crate::engine::Violation;
use crate::engine::participation::{EventTargets, plan_creation};
use crate::models::actors::entities::Principal;
use crate::models::events::entities::{EventScope, NewEvent, event_code_for};
use crate::models::events::requests::CreateEventRequest;
use crate::models::events::responses::EventWithPasswordResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    bad_request, current_principal, not_found, resolve_semester, storage_error,
    violation_response,
};
use crate::storage::Storage;
use crate::utils::random_code::generate_attendance_password;
use crate::utils::validate::{validate_required, validate_score};

/// 活动基本字段校验，创建与更新共用
pub(super) fn validate_event_fields(
    event_name: &str,
    score: f64,
    event_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    max_participants: Option<i32>,
) -> Result<(), &'static str> {
    validate_required(event_name, "活动名称不能为空")?;
    validate_score(score)?;
    if end_date.is_some_and(|end| end < event_date) {
        return Err("结束时间不能早于活动时间");
    }
    if max_participants.is_some_and(|max| max <= 0) {
        return Err("人数上限必须大于 0");
    }
    Ok(())
}

/// 检查目标班级/学院存在，班级活动的学院取班级所属学院
///
/// 传入 `creator` 时同时检查其能否为目标班级创建活动。
pub(super) async fn resolve_targets(
    storage: &dyn Storage,
    targets: EventTargets,
    creator: Option<&Principal>,
) -> Result<EventTargets, HttpResponse> {
    match targets.scope {
        EventScope::University => Ok(targets),
        EventScope::Faculty => {
            let Some(faculty_id) = targets.target_faculty_id else {
                return Err(bad_request(ErrorCode::ValidationFailed, "学院活动必须指定目标学院"));
            };
            match storage.get_faculty_by_id(faculty_id).await {
                Ok(Some(_)) => Ok(targets),
                Ok(None) => Err(not_found(ErrorCode::FacultyNotFound, "目标学院不存在")),
                Err(e) => Err(storage_error("查询学院失败", e)),
            }
        }
        EventScope::Class => {
            let Some(class_id) = targets.target_class_id else {
                return Err(bad_request(ErrorCode::ValidationFailed, "班级活动必须指定目标班级"));
            };
            let class = match storage.get_class_by_id(class_id).await {
                Ok(Some(class)) => class,
                Ok(None) => return Err(not_found(ErrorCode::ClassNotFound, "目标班级不存在")),
                Err(e) => return Err(storage_error("查询班级失败", e)),
            };
            if let Some(creator) = creator
                && !creator.can_manage_class(&class)
            {
                return Err(violation_response(&Violation::EventCreateForbidden(
                    "无权为该班级创建活动",
                )));
            }
            Ok(EventTargets {
                target_faculty_id: Some(class.faculty_id),
                ..targets
            })
        }
    }
}

pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    req: CreateEventRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_event_fields(
        &req.event_name,
        req.score,
        req.event_date,
        req.end_date,
        req.max_participants,
    ) {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }

    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let now = chrono::Utc::now();

    let plan = match plan_creation(
        &principal,
        req.organizer_type,
        req.target_class_id,
        req.target_faculty_id,
        now,
    ) {
        Ok(plan) => plan,
        Err(v) => return Ok(violation_response(&v)),
    };
    let targets = try_respond!(resolve_targets(storage.as_ref(), plan.targets, Some(&principal)).await);

    let semester = try_respond!(resolve_semester(storage.as_ref(), Some(req.semester_id), now).await);
    match storage.get_criteria_by_id(req.criteria_id).await {
        Ok(Some(c)) if c.is_active => {}
        Ok(_) => return Ok(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在")),
        Err(e) => return Ok(storage_error("查询评分标准失败", e)),
    }

    let year = req.event_date.year();
    let existing = match storage
        .count_events_with_code_prefix(&format!("SK{year}"))
        .await
    {
        Ok(count) => count,
        Err(e) => return Ok(storage_error("生成活动编码失败", e)),
    };

    let new_event = NewEvent {
        event_code: event_code_for(year, existing),
        event_name: req.event_name.trim().to_string(),
        description: req.description,
        criteria_id: req.criteria_id,
        score: req.score,
        event_date: req.event_date,
        end_date: req.end_date,
        semester_id: semester.id,
        organizer_type: req.organizer_type,
        scope: targets.scope,
        target_class_id: targets.target_class_id,
        target_faculty_id: targets.target_faculty_id,
        max_participants: req.max_participants,
        location: req.location,
        approval: plan.approval,
        created_by: principal.actor,
        attendance_password: generate_attendance_password(),
    };

    match storage.create_event(new_event, now).await {
        Ok(event) => {
            info!(
                code = %event.event_code,
                scope = %event.scope,
                approval = %event.approval_status,
                "创建活动"
            );
            let attendance_password = event.attendance_password.clone();
            Ok(HttpResponse::Created().json(ApiResponse::success(
                EventWithPasswordResponse {
                    event,
                    attendance_password,
                },
                "活动创建成功",
            )))
        }
        Err(e) => Ok(storage_error("创建活动失败", e)),
    }
}
