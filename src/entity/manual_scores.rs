//! 自评分数实体

use sea_orm::entity::prelude::*;

use super::from_micros;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "manual_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub criteria_id: i64,
    pub semester_number: i32,
    pub academic_year: String,
    #[sea_orm(column_type = "Double")]
    pub self_score: f64,
    // 佐证材料 JSON 数组
    #[sea_orm(column_type = "Text")]
    pub evidence: String,
    pub approval_status: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub approved_score: Option<f64>,
    pub approved_by_kind: Option<String>,
    pub approved_by_id: Option<i64>,
    pub approved_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::criteria::Entity",
        from = "Column::CriteriaId",
        to = "super::criteria::Column::Id"
    )]
    Criteria,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_manual_score(self) -> crate::models::scores::entities::ManualScore {
        use crate::models::actors::entities::ActorRef;
        use crate::models::scores::entities::{ApprovalStatus, ManualScore};

        ManualScore {
            id: self.id,
            student_id: self.student_id,
            criteria_id: self.criteria_id,
            semester_number: self.semester_number,
            academic_year: self.academic_year,
            self_score: self.self_score,
            evidence: serde_json::from_str(&self.evidence).unwrap_or_default(),
            approval_status: self
                .approval_status
                .parse::<ApprovalStatus>()
                .unwrap_or(ApprovalStatus::Pending),
            approved_score: self.approved_score,
            approved_by: ActorRef::from_columns(self.approved_by_kind.as_deref(), self.approved_by_id),
            approved_at: self.approved_at.map(from_micros),
            rejection_reason: self.rejection_reason,
            description: self.description,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}
