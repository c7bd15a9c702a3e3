pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::criteria::requests::{
    CreateCategoryRequest, CreateCriteriaRequest, CriteriaListQuery, UpdateCategoryRequest,
    UpdateCriteriaRequest,
};
use crate::storage::Storage;

/// 评分大类与评分标准的维护
pub struct CriteriaService {
    storage: Option<Arc<dyn Storage>>,
}

impl CriteriaService {
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

    pub async fn list_categories(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_categories(self, request).await
    }

    pub async fn get_category(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_category(self, request, id).await
    }

    pub async fn create_category(
        &self,
        request: &HttpRequest,
        req: CreateCategoryRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_category(self, request, req).await
    }

    pub async fn update_category(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateCategoryRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_category(self, request, id, req).await
    }

    pub async fn delete_category(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_category(self, request, id).await
    }

    pub async fn list_criteria(
        &self,
        request: &HttpRequest,
        query: CriteriaListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_criteria(self, request, query).await
    }

    pub async fn get_criteria(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_criteria(self, request, id).await
    }

    pub async fn create_criteria(
        &self,
        request: &HttpRequest,
        req: CreateCriteriaRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_criteria(self, request, req).await
    }

    pub async fn update_criteria(
        &self,
        request: &HttpRequest,
        id: i64,
        req: UpdateCriteriaRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_criteria(self, request, id, req).await
    }

    pub async fn delete_criteria(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_criteria(self, request, id).await
    }
}
