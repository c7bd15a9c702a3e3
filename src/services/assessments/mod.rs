pub mod approve_class;
pub mod class_status;
pub mod faculty_status;
pub mod finalize_faculty;
pub mod finalize_student;
pub mod remind;
pub mod review;
pub mod school_status;
pub mod score_sheet;
pub mod secretary_sheet;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assessments::requests::{
    ApproveClassRequest, FinalizeFacultyRequest, FinalizeStudentRequest, RemindClassRequest,
};
use crate::models::scores::requests::{
    RejectStudentScoreRequest, SubmitSelfScoreRequest, UpdateStudentScoreRequest,
};
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn get_score_sheet(
        &self,
        request: &HttpRequest,
        semester_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        score_sheet::get_score_sheet(self, request, semester_id).await
    }

    pub async fn submit_self_score(
        &self,
        request: &HttpRequest,
        req: SubmitSelfScoreRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_self_score(self, request, req).await
    }

    pub async fn get_class_status(
        &self,
        request: &HttpRequest,
        class_id: i64,
        semester_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        class_status::get_class_status(self, request, class_id, semester_id).await
    }

    pub async fn get_secretary_sheet(
        &self,
        request: &HttpRequest,
        student_id: i64,
        semester_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        secretary_sheet::get_secretary_sheet(self, request, student_id, semester_id).await
    }

    pub async fn update_student_score(
        &self,
        request: &HttpRequest,
        semester_id: Option<i64>,
        req: UpdateStudentScoreRequest,
    ) -> ActixResult<HttpResponse> {
        review::update_student_score(self, request, semester_id, req).await
    }

    pub async fn reject_student_score(
        &self,
        request: &HttpRequest,
        semester_id: Option<i64>,
        req: RejectStudentScoreRequest,
    ) -> ActixResult<HttpResponse> {
        review::reject_student_score(self, request, semester_id, req).await
    }

    pub async fn finalize_student(
        &self,
        request: &HttpRequest,
        req: FinalizeStudentRequest,
    ) -> ActixResult<HttpResponse> {
        finalize_student::finalize_student(self, request, req).await
    }

    pub async fn get_faculty_status(
        &self,
        request: &HttpRequest,
        faculty_id: i64,
        semester_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        faculty_status::get_faculty_status(self, request, faculty_id, semester_id).await
    }

    pub async fn approve_class(
        &self,
        request: &HttpRequest,
        req: ApproveClassRequest,
    ) -> ActixResult<HttpResponse> {
        approve_class::approve_class(self, request, req).await
    }

    pub async fn remind_class(
        &self,
        request: &HttpRequest,
        req: RemindClassRequest,
    ) -> ActixResult<HttpResponse> {
        remind::remind_class(self, request, req).await
    }

    pub async fn get_school_status(
        &self,
        request: &HttpRequest,
        semester_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        school_status::get_school_status(self, request, semester_id).await
    }

    pub async fn finalize_faculty(
        &self,
        request: &HttpRequest,
        req: FinalizeFacultyRequest,
    ) -> ActixResult<HttpResponse> {
        finalize_faculty::finalize_faculty(self, request, req).await
    }
}
