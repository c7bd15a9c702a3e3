pub mod create;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::semesters::requests::{CreateSemesterRequest, UpdateSemesterRequest};
use crate::storage::Storage;

pub struct SemesterService {
    storage: Option<Arc<dyn Storage>>,
}

impl SemesterService {
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

    pub async fn list_semesters(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_semesters(self, request).await
    }

    pub async fn get_current_semester(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::get_current_semester(self, request).await
    }

    pub async fn get_semester(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_semester(self, request, id).await
    }

    pub async fn create_semester(
        &self,
        request: &HttpRequest,
        req: CreateSemesterRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_semester(self, request, req).await
    }

    pub async fn update_semester(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateSemesterRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_semester(self, request, id, req).await
    }
}
