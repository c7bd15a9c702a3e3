use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::future::try_join_all;

use super::AssessmentService;
use crate::engine::completion::class_completion;
use crate::engine::workflow::ensure_faculty_access;
use crate::errors::Result;
use crate::models::actors::entities::{Class, Faculty};
use crate::models::assessments::entities::ReviewCounts;
use crate::models::assessments::responses::FacultyStatusResponse;
use crate::models::semesters::entities::Semester;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_principal, not_found, resolve_semester, storage_error, violation_response,
};
use crate::storage::Storage;

pub(super) async fn load_faculty(
    storage: &dyn Storage,
    faculty_id: i64,
) -> std::result::Result<Faculty, HttpResponse> {
    match storage.get_faculty_by_id(faculty_id).await {
        Ok(Some(faculty)) => Ok(faculty),
        Ok(None) => Err(not_found(ErrorCode::FacultyNotFound, "学院不存在")),
        Err(e) => Err(storage_error("查询学院失败", e)),
    }
}

/// 学院下每个班级的评审计数
pub(super) async fn faculty_class_counts(
    storage: &dyn Storage,
    faculty_id: i64,
    semester: &Semester,
) -> Result<Vec<(Class, ReviewCounts)>> {
    let classes = storage.list_classes_by_faculty(faculty_id).await?;
    let counts = try_join_all(
        classes
            .iter()
            .map(|class| storage.class_review_counts(class.id, semester)),
    )
    .await?;
    Ok(classes.into_iter().zip(counts).collect())
}

pub async fn get_faculty_status(
    service: &AssessmentService,
    request: &HttpRequest,
    faculty_id: i64,
    semester_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let faculty = try_respond!(load_faculty(storage.as_ref(), faculty_id).await);

    if let Err(v) = ensure_faculty_access(&principal, faculty.id) {
        return Ok(violation_response(&v));
    }

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), semester_id, now).await);

    let classes = match faculty_class_counts(storage.as_ref(), faculty.id, &semester).await {
        Ok(classes) => classes
            .iter()
            .map(|(class, counts)| class_completion(class, *counts))
            .collect(),
        Err(e) => return Ok(storage_error("统计学院完成度失败", e)),
    };

    let response = FacultyStatusResponse {
        faculty,
        semester,
        classes,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
