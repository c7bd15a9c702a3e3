pub mod attendance;
pub mod cancel;
pub mod create;
pub mod dashboard;
pub mod delete;
pub mod detail;
pub mod list;
pub mod registration;
pub mod review;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::actors::entities::{Principal, Student};
use crate::models::events::entities::Event;
use crate::models::events::requests::{
    CancelEventRequest, CheckInRequest, CreateEventRequest, EventListQuery, MarkAttendanceRequest,
    RejectEventRequest, UpdateEventRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_error};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: EventListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, query).await
    }

    pub async fn list_available_events(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_available_events(self, request).await
    }

    pub async fn list_my_events(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_events(self, request).await
    }

    pub async fn get_dashboard_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::get_dashboard_stats(self, request).await
    }

    pub async fn get_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_event(self, request, id).await
    }

    pub async fn list_participants(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::list_participants(self, request, id).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        req: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, req).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, request, id, req).await
    }

    pub async fn approve_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        review::approve_event(self, request, id).await
    }

    pub async fn reject_event(
        &self,
        request: &HttpRequest,
        id: i64,
        req: RejectEventRequest,
    ) -> ActixResult<HttpResponse> {
        review::reject_event(self, request, id, req).await
    }

    pub async fn cancel_event(
        &self,
        request: &HttpRequest,
        id: i64,
        req: CancelEventRequest,
    ) -> ActixResult<HttpResponse> {
        cancel::cancel_event(self, request, id, req).await
    }

    pub async fn delete_event(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, id).await
    }

    pub async fn register(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        registration::register(self, request, id).await
    }

    pub async fn unregister(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        registration::unregister(self, request, id).await
    }

    pub async fn check_in(
        &self,
        request: &HttpRequest,
        id: i64,
        req: CheckInRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::check_in(self, request, id, req).await
    }

    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        id: i64,
        req: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::mark_attendance(self, request, id, req).await
    }
}

pub(super) async fn load_event(storage: &dyn Storage, id: i64) -> Result<Event, HttpResponse> {
    match storage.get_event_by_id(id).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(not_found(ErrorCode::EventNotFound, "活动不存在")),
        Err(e) => Err(storage_error("查询活动失败", e)),
    }
}

/// 调用方对应的学生档案，管理员调用时返回 403
pub(super) async fn load_student(
    storage: &dyn Storage,
    principal: &Principal,
) -> Result<Student, HttpResponse> {
    let Some(student_id) = principal.student_id() else {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有学生可以进行此操作",
        )));
    };

    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "学生不存在")),
        Err(e) => Err(storage_error("查询学生失败", e)),
    }
}
