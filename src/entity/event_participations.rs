//! 活动参与实体

use sea_orm::entity::prelude::*;

use super::from_micros;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "event_participations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub status: String,
    pub registered_at: i64,
    pub attended_at: Option<i64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub score_received: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_participation(self) -> crate::models::events::entities::EventParticipation {
        use crate::models::events::entities::{EventParticipation, ParticipationStatus};

        EventParticipation {
            id: self.id,
            event_id: self.event_id,
            student_id: self.student_id,
            status: self
                .status
                .parse::<ParticipationStatus>()
                .unwrap_or(ParticipationStatus::Registered),
            registered_at: from_micros(self.registered_at),
            attended_at: self.attended_at.map(from_micros),
            score_received: self.score_received,
            created_at: from_micros(self.created_at),
            updated_at: from_micros(self.updated_at),
        }
    }
}
