use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::Role;
use crate::models::semesters::requests::{CreateSemesterRequest, UpdateSemesterRequest};
use crate::services::SemesterService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SemesterService 实例
static SEMESTER_SERVICE: Lazy<SemesterService> = Lazy::new(SemesterService::new_lazy);

pub async fn list_semesters(req: HttpRequest) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.list_semesters(&req).await
}

pub async fn get_current_semester(req: HttpRequest) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.get_current_semester(&req).await
}

pub async fn get_semester(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.get_semester(&req, path.0).await
}

pub async fn create_semester(
    req: HttpRequest,
    body: web::Json<CreateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE
        .create_semester(&req, body.into_inner())
        .await
}

pub async fn update_semester(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE
        .update_semester(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_semesters_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/semesters")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_semesters))
                    .route(
                        web::post()
                            .to(create_semester)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    ),
            )
            // 必须在 /{id} 之前注册
            .service(web::resource("/current").route(web::get().to(get_current_semester)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_semester))
                    .route(
                        web::put()
                            .to(update_semester)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    ),
            ),
    );
}
