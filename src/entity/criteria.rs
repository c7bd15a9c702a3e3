//! 评分标准实体

use sea_orm::entity::prelude::*;

use super::from_micros;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_id: i64,
    pub criteria_code: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub scoring_type: String,
    pub unit: String,
    #[sea_orm(column_type = "Double")]
    pub plus_score: f64,
    #[sea_orm(column_type = "Double")]
    pub minus_score: f64,
    pub max_times: Option<i32>,
    pub require_evidence: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_criteria(self) -> crate::models::criteria::entities::Criteria {
        use crate::models::criteria::entities::{Criteria, CriteriaUnit, ScoringType};

        Criteria {
            id: self.id,
            category_id: self.category_id,
            criteria_code: self.criteria_code,
            content: self.content,
            scoring_type: self
                .scoring_type
                .parse::<ScoringType>()
                .unwrap_or(ScoringType::Manual),
            unit: self
                .unit
                .parse::<CriteriaUnit>()
                .unwrap_or(CriteriaUnit::PerSemester),
            plus_score: self.plus_score,
            minus_score: self.minus_score,
            max_times: self.max_times,
            require_evidence: self.require_evidence,
            order: self.display_order,
            is_active: self.is_active,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}
