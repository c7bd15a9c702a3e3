use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SemesterService;
use crate::models::semesters::requests::CreateSemesterRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, grading_policy, storage_error};
use crate::utils::validate::{validate_academic_year, validate_semester_number};

pub async fn create_semester(
    service: &SemesterService,
    request: &HttpRequest,
    mut req: CreateSemesterRequest,
) -> ActixResult<HttpResponse> {
    req.academic_year = req.academic_year.trim().to_string();

    if let Err(msg) = validate_semester_number(req.semester_number)
        .and_then(|_| validate_academic_year(&req.academic_year))
    {
        return Ok(bad_request(ErrorCode::ValidationFailed, msg));
    }
    if req.start_date >= req.end_date {
        return Ok(bad_request(ErrorCode::ValidationFailed, "学期开始日期必须早于结束日期"));
    }

    let storage = service.get_storage(request);

    match storage
        .find_semester(req.semester_number, &req.academic_year)
        .await
    {
        Ok(Some(_)) => {
            return Ok(bad_request(ErrorCode::SemesterAlreadyExists, "该学期已存在"));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_error("查询学期失败", e)),
    }

    let deadline = req
        .grading_start_date
        .map(|start| grading_policy().grading_deadline(start));

    match storage.create_semester(req, deadline).await {
        Ok(semester) => {
            info!(
                semester_number = semester.semester_number,
                academic_year = %semester.academic_year,
                "创建学期"
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(semester, "学期创建成功")))
        }
        Err(e) => Ok(storage_error("创建学期失败", e)),
    }
}
