//! 活动实体

use sea_orm::entity::prelude::*;

use super::from_micros;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub event_code: String,
    pub event_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub criteria_id: i64,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    pub event_date: i64,
    pub end_date: Option<i64>,
    pub semester_id: i64,
    pub organizer_type: String,
    pub scope: String,
    pub target_class_id: Option<i64>,
    pub target_faculty_id: Option<i64>,
    pub max_participants: Option<i32>,
    pub location: Option<String>,
    pub approval_status: String,
    pub approved_by_kind: Option<String>,
    pub approved_by_id: Option<i64>,
    pub approved_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
    pub created_by_kind: Option<String>,
    pub created_by_id: Option<i64>,
    pub is_active: bool,
    pub attendance_password: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::criteria::Entity",
        from = "Column::CriteriaId",
        to = "super::criteria::Column::Id"
    )]
    Criteria,
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id"
    )]
    Semester,
    #[sea_orm(has_many = "super::event_participations::Entity")]
    Participations,
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criteria.def()
    }
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl Related<super::event_participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::events::entities::Event {
        use crate::models::actors::entities::ActorRef;
        use crate::models::events::entities::{Event, EventScope, OrganizerType};
        use crate::models::scores::entities::ApprovalStatus;

        let organizer_type = self
            .organizer_type
            .parse::<OrganizerType>()
            .unwrap_or(OrganizerType::School);

        Event {
            id: self.id,
            event_code: self.event_code,
            event_name: self.event_name,
            description: self.description,
            criteria_id: self.criteria_id,
            score: self.score,
            event_date: from_micros(self.event_date),
            end_date: self.end_date.map(from_micros),
            semester_id: self.semester_id,
            organizer_type,
            scope: self
                .scope
                .parse::<EventScope>()
                .unwrap_or_else(|_| EventScope::from(organizer_type)),
            target_class_id: self.target_class_id,
            target_faculty_id: self.target_faculty_id,
            max_participants: self.max_participants,
            location: self.location,
            approval_status: self
                .approval_status
                .parse::<ApprovalStatus>()
                .unwrap_or(ApprovalStatus::Pending),
            approved_by: ActorRef::from_columns(self.approved_by_kind.as_deref(), self.approved_by_id),
            approved_at: self.approved_at.map(from_micros),
            rejection_reason: self.rejection_reason,
            created_by: ActorRef::from_columns(self.created_by_kind.as_deref(), self.created_by_id),
            is_active: self.is_active,
            attendance_password: self.attendance_password,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}
