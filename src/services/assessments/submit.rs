use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssessmentService;
use crate::engine::workflow::check_self_submission;
use crate::models::scores::entities::ManualScoreKey;
use crate::models::scores::requests::SubmitSelfScoreRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_principal, get_cache, grading_policy, load_structure, not_found, resolve_semester,
    storage_error, violation_response,
};

pub async fn submit_self_score(
    service: &AssessmentService,
    request: &HttpRequest,
    req: SubmitSelfScoreRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));

    let Some(student_id) = principal.student_id() else {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有学生可以提交自评",
        )));
    };

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), Some(req.semester_id), now).await);

    // 只能对生效结构中的标准自评
    let cache = get_cache(request);
    let structure = match load_structure(storage.as_ref(), cache.as_ref()).await {
        Ok(structure) => structure,
        Err(e) => return Ok(storage_error("加载评分结构失败", e)),
    };
    let Some((_, criteria)) = structure.find_criteria(req.criteria_id) else {
        return Ok(not_found(ErrorCode::CriteriaNotFound, "评分标准不存在"));
    };

    if let Err(v) = check_self_submission(&grading_policy(), &semester, criteria, req.self_score, now)
    {
        return Ok(violation_response(&v));
    }

    let key = ManualScoreKey::new(student_id, criteria.id, &semester);
    match storage
        .upsert_self_score(key, req.self_score, req.evidence, now)
        .await
    {
        Ok(score) => {
            info!(
                student_id,
                criteria_id = criteria.id,
                self_score = req.self_score,
                "学生提交自评"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(score, "自评已提交，等待审核")))
        }
        Err(e) => Ok(storage_error("保存自评分数失败", e)),
    }
}
