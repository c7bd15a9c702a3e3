//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_id: i64,
    pub faculty_id: i64,
    pub is_secretary: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(has_many = "super::manual_scores::Entity")]
    ManualScores,
    #[sea_orm(has_many = "super::event_participations::Entity")]
    EventParticipations,
    #[sea_orm(has_many = "super::student_assessments::Entity")]
    StudentAssessments,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::manual_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManualScores.def()
    }
}

impl Related<super::event_participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventParticipations.def()
    }
}

impl Related<super::student_assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentAssessments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::actors::entities::Student {
        crate::models::actors::entities::Student {
            id: self.id,
            student_code: self.student_code,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            class_id: self.class_id,
            faculty_id: self.faculty_id,
            is_secretary: self.is_secretary,
            is_active: self.is_active,
        }
    }
}
