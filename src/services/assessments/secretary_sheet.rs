use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::engine::resolvers::SheetView;
use crate::engine::workflow::ensure_class_access;
use crate::models::actors::entities::{Principal, Student};
use crate::models::assessments::responses::SecretaryScoreSheetResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_principal, get_cache, grading_policy, internal_error, load_score_sheet, not_found,
    resolve_semester, storage_error, violation_response,
};
use crate::storage::Storage;

/// 加载调用方有权管理的学生
pub(super) async fn managed_student(
    storage: &dyn Storage,
    principal: &Principal,
    student_id: i64,
) -> Result<Student, HttpResponse> {
    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Err(not_found(ErrorCode::StudentNotFound, "学生不存在")),
        Err(e) => return Err(storage_error("查询学生失败", e)),
    };

    let class = match storage.get_class_by_id(student.class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Err(not_found(ErrorCode::ClassNotFound, "班级不存在")),
        Err(e) => return Err(storage_error("查询班级失败", e)),
    };

    ensure_class_access(principal, &class).map_err(|v| violation_response(&v))?;
    Ok(student)
}

pub async fn get_secretary_sheet(
    service: &AssessmentService,
    request: &HttpRequest,
    student_id: i64,
    semester_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = try_respond!(current_principal(request));
    let student = try_respond!(managed_student(storage.as_ref(), &principal, student_id).await);

    let now = chrono::Utc::now();
    let semester = try_respond!(resolve_semester(storage.as_ref(), semester_id, now).await);
    let cache = get_cache(request);

    let loaded = futures_util::try_join!(
        load_score_sheet(
            storage.as_ref(),
            cache.as_ref(),
            student.id,
            &semester,
            SheetView::Secretary,
            now,
        ),
        storage.get_assessment(student.id, &semester)
    );
    let (sheet, assessment) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => return Ok(internal_error("生成评分表失败", e)),
    };

    let response = SecretaryScoreSheetResponse {
        is_review_period: grading_policy().is_within_review_period(Some(&semester), now),
        student,
        sheet,
        assessment,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
