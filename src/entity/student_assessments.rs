//! 学生测评实体

use sea_orm::entity::prelude::*;

use super::from_micros;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub semester_number: i32,
    pub academic_year: String,
    pub status: String,
    #[sea_orm(column_type = "Double")]
    pub total_score: f64,
    pub classification: Option<String>,
    pub class_reviewed_by_kind: Option<String>,
    pub class_reviewed_by_id: Option<i64>,
    pub class_reviewed_at: Option<i64>,
    pub faculty_reviewed_by_kind: Option<String>,
    pub faculty_reviewed_by_id: Option<i64>,
    pub faculty_reviewed_at: Option<i64>,
    pub finalized_at: Option<i64>,
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
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::StudentAssessment {
        use crate::models::actors::entities::ActorRef;
        use crate::models::assessments::entities::{
            AssessmentStatus, Classification, StudentAssessment,
        };

        StudentAssessment {
            id: self.id,
            student_id: self.student_id,
            semester_number: self.semester_number,
            academic_year: self.academic_year,
            status: self
                .status
                .parse::<AssessmentStatus>()
                .unwrap_or(AssessmentStatus::Draft),
            total_score: self.total_score,
            classification: self
                .classification
                .and_then(|c| c.parse::<Classification>().ok()),
            class_reviewed_by: ActorRef::from_columns(
                self.class_reviewed_by_kind.as_deref(),
                self.class_reviewed_by_id,
            ),
            class_reviewed_at: self.class_reviewed_at.map(from_micros),
            faculty_reviewed_by: ActorRef::from_columns(
                self.faculty_reviewed_by_kind.as_deref(),
                self.faculty_reviewed_by_id,
            ),
            faculty_reviewed_at: self.faculty_reviewed_at.map(from_micros),
            finalized_at: self.finalized_at.map(from_micros),
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}
