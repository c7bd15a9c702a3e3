use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::actors::entities::Role;
use crate::models::events::requests::{
    CancelEventRequest, CheckInRequest, CreateEventRequest, EventListQuery, MarkAttendanceRequest,
    RejectEventRequest, UpdateEventRequest,
};
use crate::services::EventService;
use crate::utils::SafeIDI64;

// 懒加载的全局 EventService 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

// 活动列表（管理视图）
pub async fn list_events(
    req: HttpRequest,
    pagination: web::Query<PaginationQuery>,
    query: web::Query<EventListQuery>,
) -> ActixResult<HttpResponse> {
    let query = EventListQuery {
        pagination: pagination.into_inner(),
        ..query.into_inner()
    };
    EVENT_SERVICE.list_events(&req, query).await
}

// 学生可参加的活动
pub async fn list_available_events(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_available_events(&req).await
}

// 我报名的活动
pub async fn list_my_events(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_my_events(&req).await
}

// 首页统计
pub async fn get_dashboard_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_dashboard_stats(&req).await
}

pub async fn create_event(
    req: HttpRequest,
    body: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(&req, body.into_inner()).await
}

pub async fn get_event(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(&req, path.0).await
}

pub async fn update_event(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(&req, path.0).await
}

pub async fn approve_event(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.approve_event(&req, path.0).await
}

pub async fn reject_event(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<RejectEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .reject_event(&req, path.0, body.into_inner())
        .await
}

// 取消原因可省略，请求体为空时使用默认值
pub async fn cancel_event(
    req: HttpRequest,
    path: SafeIDI64,
    body: Option<web::Json<CancelEventRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    EVENT_SERVICE.cancel_event(&req, path.0, body).await
}

pub async fn register_event(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.register(&req, path.0).await
}

pub async fn unregister_event(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.unregister(&req, path.0).await
}

pub async fn check_in(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CheckInRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .check_in(&req, path.0, body.into_inner())
        .await
}

pub async fn mark_attendance(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .mark_attendance(&req, path.0, body.into_inner())
        .await
}

pub async fn list_participants(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_participants(&req, path.0).await
}

// 配置路由
pub fn configure_events_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_events))
                    .route(web::post().to(create_event))
                    .wrap(middlewares::RequireRole::new_any(Role::event_creator_roles())),
            )
            // 固定路径必须在 /{id} 之前注册
            .service(
                web::resource("/available")
                    .route(web::get().to(list_available_events))
                    .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
            )
            .service(
                web::resource("/my")
                    .route(web::get().to(list_my_events))
                    .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
            )
            .service(
                web::resource("/{id}")
                    // 详情对所有登录用户开放，口令仅创建者和管理员可见
                    .route(web::get().to(get_event))
                    // 修改、删除：创建者或管理员，业务层检查
                    .route(
                        web::put()
                            .to(update_event)
                            .wrap(middlewares::RequireRole::new_any(Role::event_creator_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_event)
                            .wrap(middlewares::RequireRole::new_any(Role::event_creator_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/approve")
                    .route(web::post().to(approve_event))
                    .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
            )
            .service(
                web::resource("/{id}/reject")
                    .route(web::post().to(reject_event))
                    .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
            )
            .service(
                web::resource("/{id}/cancel")
                    .route(web::post().to(cancel_event))
                    .wrap(middlewares::RequireRole::new_any(Role::event_creator_roles())),
            )
            .service(
                web::resource("/{id}/registration")
                    .route(web::post().to(register_event))
                    .route(web::delete().to(unregister_event))
                    .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
            )
            .service(
                web::resource("/{id}/check-in")
                    .route(web::post().to(check_in))
                    .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
            )
            .service(
                web::resource("/{id}/attendance")
                    .route(web::post().to(mark_attendance))
                    .wrap(middlewares::RequireRole::new_any(Role::event_creator_roles())),
            )
            .service(
                web::resource("/{id}/participants")
                    .route(web::get().to(list_participants))
                    .wrap(middlewares::RequireRole::new_any(Role::event_creator_roles())),
            ),
    );

    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/stats").route(web::get().to(get_dashboard_stats))),
    );
}
