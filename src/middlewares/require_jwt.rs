/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，按令牌中的身份类型加载学生或管理员，
 * 解析出的 [`Principal`] 写入请求扩展并按令牌缓存。
 *
 * ```rust,ignore
 * web::scope("/api/v1/assessments")
 *     .wrap(RequireJWT)
 *     .route("/score-sheet", web::get().to(get_score_sheet))
 * ```
 *
 * 处理函数中通过 `RequireJWT::extract_principal(&req)` 取得调用方。
 */

use crate::cache::{ObjectCache, keys};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::actors::entities::{ActorKind, Principal, Role};
use crate::storage::Storage;
use crate::utils::jwt::{Claims, JwtUtils};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 按身份类型加载调用方，账号不存在或已停用时返回 None
pub async fn load_principal(storage: &dyn Storage, claims: &Claims) -> Result<Option<Principal>, String> {
    let id = claims
        .subject_id()
        .ok_or_else(|| "Invalid subject in JWT".to_string())?;

    let principal = match claims.kind {
        ActorKind::Student => storage
            .get_student_by_id(id)
            .await
            .map_err(|e| format!("Failed to load student: {e}"))?
            .filter(|s| s.is_active)
            .map(|s| Principal::from_student(&s)),
        ActorKind::Admin => storage
            .get_admin_by_id(id)
            .await
            .map_err(|e| format!("Failed to load admin: {e}"))?
            .filter(|a| a.is_active)
            .map(|a| Principal::from_admin(&a)),
    };

    Ok(principal)
}

async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Principal, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    let cache_key = keys::principal(token);
    if let Some(cache) = &cache
        && let Some(principal) = cache.get_json::<Principal>(&cache_key).await
    {
        return Ok(principal);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| {
            warn!("Storage not found in app data");
            "Authentication backend unavailable".to_string()
        })?;

    let principal = load_principal(storage.as_ref(), &claims)
        .await?
        .ok_or_else(|| "Account not found or inactive".to_string())?;

    if let Some(cache) = &cache {
        cache
            .insert_json(cache_key, &principal, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(principal)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(principal) => {
                    debug!(
                        "JWT authentication successful for {} {}",
                        principal.actor.kind, principal.actor.id
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中取出调用方，须在 RequireJWT 之后使用
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }

    pub fn extract_role(req: &actix_web::HttpRequest) -> Option<Role> {
        req.extensions().get::<Principal>().map(|p| p.role)
    }
}
