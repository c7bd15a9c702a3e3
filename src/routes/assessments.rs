use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::actors::entities::Role;
use crate::models::assessments::requests::{
    ApproveClassRequest, FinalizeFacultyRequest, FinalizeStudentRequest, RemindClassRequest,
};
use crate::models::scores::requests::{
    RejectStudentScoreRequest, SubmitSelfScoreRequest, UpdateStudentScoreRequest,
};
use crate::models::semesters::requests::SemesterQuery;
use crate::services::AssessmentService;
use crate::utils::{SafeClassIdI64, SafeFacultyIdI64, SafeStudentIdI64};

// 懒加载的全局 AssessmentService 实例
static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

// 学生查看个人评分表
pub async fn get_score_sheet(
    req: HttpRequest,
    query: web::Query<SemesterQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_score_sheet(&req, query.into_inner().semester_id)
        .await
}

// 学生提交自评
pub async fn submit_self_score(
    req: HttpRequest,
    body: web::Json<SubmitSelfScoreRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .submit_self_score(&req, body.into_inner())
        .await
}

// 班级测评进度
pub async fn get_class_status(
    req: HttpRequest,
    path: SafeClassIdI64,
    query: web::Query<SemesterQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_class_status(&req, path.0, query.into_inner().semester_id)
        .await
}

// 团支书查看学生评分表
pub async fn get_secretary_sheet(
    req: HttpRequest,
    path: SafeStudentIdI64,
    query: web::Query<SemesterQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_secretary_sheet(&req, path.0, query.into_inner().semester_id)
        .await
}

// 团支书批准学生分数
pub async fn update_student_score(
    req: HttpRequest,
    query: web::Query<SemesterQuery>,
    body: web::Json<UpdateStudentScoreRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_student_score(&req, query.into_inner().semester_id, body.into_inner())
        .await
}

// 团支书驳回学生自评
pub async fn reject_student_score(
    req: HttpRequest,
    query: web::Query<SemesterQuery>,
    body: web::Json<RejectStudentScoreRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .reject_student_score(&req, query.into_inner().semester_id, body.into_inner())
        .await
}

// 团支书确认学生总分
pub async fn finalize_student(
    req: HttpRequest,
    body: web::Json<FinalizeStudentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .finalize_student(&req, body.into_inner())
        .await
}

// 学院各班级完成度
pub async fn get_faculty_status(
    req: HttpRequest,
    path: SafeFacultyIdI64,
    query: web::Query<SemesterQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_faculty_status(&req, path.0, query.into_inner().semester_id)
        .await
}

// 学院审批班级
pub async fn approve_class(
    req: HttpRequest,
    body: web::Json<ApproveClassRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.approve_class(&req, body.into_inner()).await
}

// 提醒团支书
pub async fn remind_class(
    req: HttpRequest,
    body: web::Json<RemindClassRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.remind_class(&req, body.into_inner()).await
}

// 全校各学院完成度
pub async fn get_school_status(
    req: HttpRequest,
    query: web::Query<SemesterQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .get_school_status(&req, query.into_inner().semester_id)
        .await
}

// 学校确认学院测评
pub async fn finalize_faculty(
    req: HttpRequest,
    body: web::Json<FinalizeFacultyRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .finalize_faculty(&req, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assessments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assessments")
            .wrap(middlewares::RequireJWT)
            // 学生自评
            .service(
                web::resource("/score-sheet")
                    .route(web::get().to(get_score_sheet))
                    .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
            )
            .service(
                web::resource("/submit")
                    .route(web::post().to(submit_self_score))
                    .wrap(middlewares::RequireRole::new_any(Role::student_roles())),
            )
            // 团支书审核（学院、学校管理员同样可用，范围在业务层检查）
            .service(
                web::resource("/class/{class_id}")
                    .route(web::get().to(get_class_status))
                    .wrap(middlewares::RequireRole::new_any(Role::secretary_roles())),
            )
            .service(
                web::resource("/secretary/students/{student_id}")
                    .route(web::get().to(get_secretary_sheet))
                    .wrap(middlewares::RequireRole::new_any(Role::secretary_roles())),
            )
            .service(
                web::resource("/secretary/update-score")
                    .route(web::post().to(update_student_score))
                    .wrap(middlewares::RequireRole::new_any(Role::secretary_roles())),
            )
            .service(
                web::resource("/secretary/reject-score")
                    .route(web::post().to(reject_student_score))
                    .wrap(middlewares::RequireRole::new_any(Role::secretary_roles())),
            )
            .service(
                web::resource("/secretary/finalize")
                    .route(web::post().to(finalize_student))
                    .wrap(middlewares::RequireRole::new_any(Role::secretary_roles())),
            )
            // 学院审核
            .service(
                web::resource("/faculty/{faculty_id}/classes")
                    .route(web::get().to(get_faculty_status))
                    .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
            )
            .service(
                web::resource("/faculty/approve-class")
                    .route(web::post().to(approve_class))
                    .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
            )
            .service(
                web::resource("/faculty/remind")
                    .route(web::post().to(remind_class))
                    .wrap(middlewares::RequireRole::new_any(Role::admin_roles())),
            )
            // 学校确认
            .service(
                web::resource("/school/faculties")
                    .route(web::get().to(get_school_status))
                    .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
            )
            .service(
                web::resource("/school/finalize-faculty")
                    .route(web::post().to(finalize_faculty))
                    .wrap(middlewares::RequireRole::new_any(Role::university_roles())),
            ),
    );
}
