//! 管理员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub admin_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub level: String,
    pub faculty_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_admin(self) -> crate::models::actors::entities::Admin {
        use crate::models::actors::entities::{Admin, AdminLevel};

        Admin {
            id: self.id,
            admin_code: self.admin_code,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            // 无法识别的级别按学院级处理，权限更小
            level: self
                .level
                .parse::<AdminLevel>()
                .unwrap_or(AdminLevel::Department),
            faculty_id: self.faculty_id,
            is_active: self.is_active,
        }
    }
}
