use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::Role;
use crate::models::criteria::requests::{
    CreateCategoryRequest, CreateCriteriaRequest, CriteriaListQuery, UpdateCategoryRequest,
    UpdateCriteriaRequest,
};
use crate::services::CriteriaService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CriteriaService 实例
static CRITERIA_SERVICE: Lazy<CriteriaService> = Lazy::new(CriteriaService::new_lazy);

pub async fn list_categories(req: HttpRequest) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE.list_categories(&req).await
}

pub async fn get_category(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE.get_category(&req, path.0).await
}

pub async fn create_category(
    req: HttpRequest,
    body: web::Json<CreateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .create_category(&req, body.into_inner())
        .await
}

pub async fn update_category(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .update_category(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_category(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE.delete_category(&req, path.0).await
}

pub async fn list_criteria(
    req: HttpRequest,
    query: web::Query<CriteriaListQuery>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .list_criteria(&req, query.into_inner())
        .await
}

pub async fn get_criteria(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE.get_criteria(&req, path.0).await
}

pub async fn create_criteria(
    req: HttpRequest,
    body: web::Json<CreateCriteriaRequest>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .create_criteria(&req, body.into_inner())
        .await
}

pub async fn update_criteria(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateCriteriaRequest>,
) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE
        .update_criteria(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_criteria(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    CRITERIA_SERVICE.delete_criteria(&req, path.0).await
}

// 配置路由：查询对所有登录用户开放，维护仅限学校管理员
pub fn configure_criteria_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/categories")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_categories))
                    .route(
                        web::post()
                            .to(create_category)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_category))
                    .route(
                        web::put()
                            .to(update_category)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_category)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/criteria")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_criteria))
                    .route(
                        web::post()
                            .to(create_criteria)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_criteria))
                    .route(
                        web::put()
                            .to(update_criteria)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_criteria)
                            .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
                    ),
            ),
    );
}
