//! 评分大类与评分标准存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{Categories, CategoryActiveModel, Criteria as CriteriaEntity, CriteriaActiveModel};
use crate::entity::{categories, criteria, to_micros};
use crate::errors::{DRLSystemError, Result};
use crate::models::criteria::{
    entities::{Category, Criteria},
    requests::{
        CreateCategoryRequest, CreateCriteriaRequest, CriteriaListQuery, UpdateCategoryRequest,
        UpdateCriteriaRequest,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 有效大类，按顺序排列
    pub async fn list_categories_impl(&self) -> Result<Vec<Category>> {
        let result = Categories::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by_asc(categories::Column::DisplayOrder)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询评分大类失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_category()).collect())
    }

    pub async fn get_category_by_id_impl(&self, id: i64) -> Result<Option<Category>> {
        let result = Categories::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询评分大类失败: {e}")))?;

        Ok(result.map(|m| m.into_category()))
    }

    pub async fn count_categories_impl(&self) -> Result<u64> {
        Categories::find()
            .count(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("统计评分大类失败: {e}")))
    }

    pub async fn create_category_impl(
        &self,
        req: CreateCategoryRequest,
        code: String,
    ) -> Result<Category> {
        let now = to_micros(chrono::Utc::now());

        let model = CategoryActiveModel {
            category_code: Set(code),
            category_name: Set(req.category_name),
            description: Set(req.description),
            max_score: Set(req.max_score),
            display_order: Set(req.order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("创建评分大类失败: {e}")))?;

        Ok(result.into_category())
    }

    pub async fn update_category_impl(
        &self,
        id: i64,
        update: UpdateCategoryRequest,
    ) -> Result<Option<Category>> {
        if self.get_category_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = CategoryActiveModel {
            id: Set(id),
            updated_at: Set(to_micros(chrono::Utc::now())),
            ..Default::default()
        };

        if let Some(name) = update.category_name {
            model.category_name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }
        if let Some(order) = update.order {
            model.display_order = Set(order);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("更新评分大类失败: {e}")))?;

        self.get_category_by_id_impl(id).await
    }

    pub async fn deactivate_category_impl(&self, id: i64) -> Result<bool> {
        let result = Categories::update_many()
            .col_expr(categories::Column::IsActive, false.into())
            .col_expr(
                categories::Column::UpdatedAt,
                to_micros(chrono::Utc::now()).into(),
            )
            .filter(categories::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("删除评分大类失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 有效标准，按大类与顺序排列
    pub async fn list_criteria_impl(&self, query: CriteriaListQuery) -> Result<Vec<Criteria>> {
        let mut select = CriteriaEntity::find().filter(criteria::Column::IsActive.eq(true));

        if let Some(category_id) = query.category_id {
            select = select.filter(criteria::Column::CategoryId.eq(category_id));
        }

        let result = select
            .order_by_asc(criteria::Column::CategoryId)
            .order_by_asc(criteria::Column::DisplayOrder)
            .order_by_asc(criteria::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询评分标准失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_criteria()).collect())
    }

    pub async fn get_criteria_by_id_impl(&self, id: i64) -> Result<Option<Criteria>> {
        let result = CriteriaEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询评分标准失败: {e}")))?;

        Ok(result.map(|m| m.into_criteria()))
    }

    pub async fn count_criteria_in_category_impl(&self, category_id: i64) -> Result<u64> {
        CriteriaEntity::find()
            .filter(criteria::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("统计评分标准失败: {e}")))
    }

    pub async fn create_criteria_impl(
        &self,
        req: CreateCriteriaRequest,
        code: String,
    ) -> Result<Criteria> {
        let now = to_micros(chrono::Utc::now());

        let model = CriteriaActiveModel {
            category_id: Set(req.category_id),
            criteria_code: Set(code),
            content: Set(req.content),
            scoring_type: Set(req.scoring_type.to_string()),
            unit: Set(req.unit.to_string()),
            plus_score: Set(req.plus_score),
            minus_score: Set(req.minus_score),
            max_times: Set(req.max_times),
            require_evidence: Set(req.require_evidence),
            display_order: Set(req.order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("创建评分标准失败: {e}")))?;

        Ok(result.into_criteria())
    }

    pub async fn update_criteria_impl(
        &self,
        id: i64,
        update: UpdateCriteriaRequest,
    ) -> Result<Option<Criteria>> {
        if self.get_criteria_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = CriteriaActiveModel {
            id: Set(id),
            updated_at: Set(to_micros(chrono::Utc::now())),
            ..Default::default()
        };

        if let Some(content) = update.content {
            model.content = Set(content);
        }
        if let Some(scoring_type) = update.scoring_type {
            model.scoring_type = Set(scoring_type.to_string());
        }
        if let Some(unit) = update.unit {
            model.unit = Set(unit.to_string());
        }
        if let Some(plus_score) = update.plus_score {
            model.plus_score = Set(plus_score);
        }
        if let Some(minus_score) = update.minus_score {
            model.minus_score = Set(minus_score);
        }
        if let Some(max_times) = update.max_times {
            model.max_times = Set(Some(max_times));
        }
        if let Some(require_evidence) = update.require_evidence {
            model.require_evidence = Set(require_evidence);
        }
        if let Some(order) = update.order {
            model.display_order = Set(order);
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("更新评分标准失败: {e}")))?;

        self.get_criteria_by_id_impl(id).await
    }

    pub async fn deactivate_criteria_impl(&self, id: i64) -> Result<bool> {
        let result = CriteriaEntity::update_many()
            .col_expr(criteria::Column::IsActive, false.into())
            .col_expr(
                criteria::Column::UpdatedAt,
                to_micros(chrono::Utc::now()).into(),
            )
            .filter(criteria::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("删除评分标准失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
