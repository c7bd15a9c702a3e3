//! 学期实体

use sea_orm::entity::prelude::*;

use super::from_micros;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "semesters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub semester_number: i32,
    pub academic_year: String,
    pub start_date: i64,
    pub end_date: i64,
    pub grading_start_date: Option<i64>,
    pub grading_deadline: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_semester(self) -> crate::models::semesters::entities::Semester {
        crate::models::semesters::entities::Semester {
            id: self.id,
            semester_number: self.semester_number,
            academic_year: self.academic_year,
            start_date: from_micros(self.start_date),
            end_date: from_micros(self.end_date),
            grading_start_date: self.grading_start_date.map(from_micros),
            grading_deadline: self.grading_deadline.map(from_micros),
            is_active: self.is_active,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}
