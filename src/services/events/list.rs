use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EventService, load_student};
use crate::models::ApiResponse;
use crate::models::events::requests::EventListQuery;
use crate::models::events::responses::{AvailableEventsResponse, MyEventsResponse};
use crate::services::common::{current_principal, storage_error};

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
    query: EventListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_events(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(storage_error("查询活动列表失败", e)),
    }
}

/// 学生可参加的活动：当前学期内、已审批且在学生所属范围内
pub async fn list_available_events(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(load_student(storage.as_ref(), &principal).await);

    // 没有进行中的学期时不按学期过滤
    let semester = match storage.find_current_semester(chrono::Utc::now()).await {
        Ok(semester) => semester,
        Err(e) => return Ok(storage_error("查询学期失败", e)),
    };

    match storage
        .list_available_events(&student, semester.map(|s| s.id))
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AvailableEventsResponse {
                count: items.len(),
                items,
            },
            "查询成功",
        ))),
        Err(e) => Ok(storage_error("查询可参加活动失败", e)),
    }
}

pub async fn list_my_events(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(load_student(storage.as_ref(), &principal).await);

    match storage.list_student_participations(student.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MyEventsResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(storage_error("查询我的活动失败", e)),
    }
}
