use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join_all;

use super::AssessmentService;
use super::faculty_status::faculty_class_counts;
use crate::engine::completion::faculty_completion;
use crate::models::ApiResponse;
use crate::models::assessments::responses::SchoolStatusResponse;
use crate::services::common::{current_principal, resolve_semester, storage_error};

/// 全校各学院的完成度
pub async fn get_school_status(
    service: &AssessmentService,
    request: &HttpRequest,
    semester_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    try_respond!(current_principal(request));

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), semester_id, now).await);

    let faculties = match storage.list_faculties().await {
        Ok(faculties) => faculties,
        Err(e) => return Ok(storage_error("查询学院列表失败", e)),
    };

    let per_faculty = try_join_all(
        faculties
            .iter()
            .map(|f| faculty_class_counts(storage.as_ref(), f.id, &semester)),
    )
    .await;
    let per_faculty = match per_faculty {
        Ok(counts) => counts,
        Err(e) => return Ok(storage_error("统计学院完成度失败", e)),
    };

    let faculties = faculties
        .iter()
        .zip(per_faculty)
        .map(|(faculty, classes)| {
            let counts: Vec<_> = classes.into_iter().map(|(_, c)| c).collect();
            faculty_completion(faculty, &counts)
        })
        .collect();

    let response = SchoolStatusResponse {
        semester,
        faculties,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
