use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::engine::statistics::build_dashboard;
use crate::models::ApiResponse;
use crate::services::common::{current_principal, get_cache, internal_error, load_structure};

/// 首页活动统计
pub async fn get_dashboard_stats(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    try_respond!(current_principal(request));

    let cache = get_cache(request);
    let loaded = futures_util::try_join!(
        storage.list_open_events(),
        storage.count_active_students(),
        storage.count_attended_participations(),
        load_structure(storage.as_ref(), cache.as_ref())
    );
    let (events, total_students, total_participations, structure) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Ok(internal_error("查询统计数据失败", e)),
    };

    let stats = build_dashboard(
        events,
        total_students,
        total_participations,
        &structure,
        chrono::Utc::now(),
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功")))
}
