use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::enums::define_string_enum;

define_string_enum! {
    /// 参与者类型（审批人、创建人等多态引用的类型标签）
    pub enum ActorKind: "参与者类型" => "../frontend/src/types/generated/actor.ts" {
        Admin => "admin",
        Student => "student",
    }
}

define_string_enum! {
    /// 管理员级别
    pub enum AdminLevel: "管理员级别" => "../frontend/src/types/generated/actor.ts" {
        University => "university",
        Department => "department",
    }
}

define_string_enum! {
    /// 访问角色，由学生/管理员身份推导
    pub enum Role: "角色" => "../frontend/src/types/generated/actor.ts" {
        Student => "student",
        Secretary => "secretary",
        DepartmentAdmin => "department_admin",
        UniversityAdmin => "university_admin",
    }
}

impl Role {
    pub fn student_roles() -> &'static [&'static Role] {
        &[&Self::Student, &Self::Secretary]
    }
    pub fn secretary_roles() -> &'static [&'static Role] {
        &[&Self::Secretary, &Self::DepartmentAdmin, &Self::UniversityAdmin]
    }
    pub fn admin_roles() -> &'static [&'static Role] {
        &[&Self::DepartmentAdmin, &Self::UniversityAdmin]
    }
    pub fn university_roles() -> &'static [&'static Role] {
        &[&Self::UniversityAdmin]
    }
    pub fn event_creator_roles() -> &'static [&'static Role] {
        &[&Self::Secretary, &Self::DepartmentAdmin, &Self::UniversityAdmin]
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::DepartmentAdmin | Role::UniversityAdmin)
    }
}

/// 多态参与者引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct ActorRef {
    pub kind: ActorKind,
    pub id: i64,
}

impl ActorRef {
    pub fn admin(id: i64) -> Self {
        Self {
            kind: ActorKind::Admin,
            id,
        }
    }

    pub fn student(id: i64) -> Self {
        Self {
            kind: ActorKind::Student,
            id,
        }
    }

    /// 从数据库中的 (kind, id) 两列还原，任一缺失或类型无法识别时返回 None
    pub fn from_columns(kind: Option<&str>, id: Option<i64>) -> Option<Self> {
        let kind = kind?.parse().ok()?;
        Some(Self { kind, id: id? })
    }

    /// 拆分为数据库存储的 (kind, id) 两列
    pub fn into_columns(this: Option<Self>) -> (Option<String>, Option<i64>) {
        match this {
            Some(actor) => (Some(actor.kind.to_string()), Some(actor.id)),
            None => (None, None),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct Faculty {
    pub id: i64,
    pub faculty_code: String,
    pub faculty_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct Class {
    pub id: i64,
    pub class_code: String,
    pub class_name: String,
    pub faculty_id: i64,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct Student {
    pub id: i64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_id: i64,
    pub faculty_id: i64,
    // 是否为班级团支书
    pub is_secretary: bool,
    pub is_active: bool,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/actor.ts")]
pub struct Admin {
    pub id: i64,
    pub admin_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub level: AdminLevel,
    // 学院级管理员所属学院
    pub faculty_id: Option<i64>,
    pub is_active: bool,
}

/// 已认证的调用方
///
/// 由 RequireJWT 中间件解析后写入请求扩展，并以 JSON 形式缓存。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub actor: ActorRef,
    pub role: Role,
    pub display_name: String,
    pub email: String,
    pub class_id: Option<i64>,
    pub faculty_id: Option<i64>,
}

impl Principal {
    pub fn from_student(student: &Student) -> Self {
        Self {
            actor: ActorRef::student(student.id),
            role: if student.is_secretary {
                Role::Secretary
            } else {
                Role::Student
            },
            display_name: student.full_name(),
            email: student.email.clone(),
            class_id: Some(student.class_id),
            faculty_id: Some(student.faculty_id),
        }
    }

    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            actor: ActorRef::admin(admin.id),
            role: match admin.level {
                AdminLevel::University => Role::UniversityAdmin,
                AdminLevel::Department => Role::DepartmentAdmin,
            },
            display_name: format!("{} {}", admin.last_name, admin.first_name),
            email: admin.email.clone(),
            class_id: None,
            faculty_id: admin.faculty_id,
        }
    }

    /// 当前调用方为学生时返回学生 ID
    pub fn student_id(&self) -> Option<i64> {
        match self.actor.kind {
            ActorKind::Student => Some(self.actor.id),
            ActorKind::Admin => None,
        }
    }

    /// 是否可以管理指定班级（团支书限本班，学院管理员限本院，学校管理员不限）
    pub fn can_manage_class(&self, class: &Class) -> bool {
        match self.role {
            Role::UniversityAdmin => true,
            Role::DepartmentAdmin => self.faculty_id == Some(class.faculty_id),
            Role::Secretary => self.class_id == Some(class.id),
            Role::Student => false,
        }
    }

    /// 是否可以管理指定学院
    pub fn can_manage_faculty(&self, faculty_id: i64) -> bool {
        match self.role {
            Role::UniversityAdmin => true,
            Role::DepartmentAdmin => self.faculty_id == Some(faculty_id),
            Role::Secretary | Role::Student => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(is_secretary: bool) -> Student {
        Student {
            id: 7,
            student_code: "SV007".into(),
            first_name: "An".into(),
            last_name: "Nguyen".into(),
            email: "an@example.edu".into(),
            class_id: 3,
            faculty_id: 2,
            is_secretary,
            is_active: true,
        }
    }

    fn class(id: i64, faculty_id: i64) -> Class {
        Class {
            id,
            class_code: format!("C{id}"),
            class_name: format!("Class {id}"),
            faculty_id,
            academic_year: None,
        }
    }

    #[test]
    fn test_actor_ref_columns() {
        let actor = ActorRef::from_columns(Some("admin"), Some(5));
        assert_eq!(actor, Some(ActorRef::admin(5)));
        assert_eq!(ActorRef::from_columns(Some("lecturer"), Some(5)), None);
        assert_eq!(ActorRef::from_columns(Some("student"), None), None);
        assert_eq!(
            ActorRef::into_columns(Some(ActorRef::student(9))),
            (Some("student".to_string()), Some(9))
        );
    }

    #[test]
    fn test_principal_role_from_student() {
        assert_eq!(Principal::from_student(&student(false)).role, Role::Student);
        let secretary = Principal::from_student(&student(true));
        assert_eq!(secretary.role, Role::Secretary);
        assert_eq!(secretary.student_id(), Some(7));
    }

    #[test]
    fn test_class_management_scope() {
        let secretary = Principal::from_student(&student(true));
        assert!(secretary.can_manage_class(&class(3, 2)));
        assert!(!secretary.can_manage_class(&class(4, 2)));

        let dept = Principal::from_admin(&Admin {
            id: 1,
            admin_code: "AD01".into(),
            first_name: "Binh".into(),
            last_name: "Tran".into(),
            email: "binh@example.edu".into(),
            level: AdminLevel::Department,
            faculty_id: Some(2),
            is_active: true,
        });
        assert_eq!(dept.role, Role::DepartmentAdmin);
        assert!(dept.can_manage_class(&class(4, 2)));
        assert!(!dept.can_manage_class(&class(5, 9)));
        assert!(dept.can_manage_faculty(2));
        assert!(!dept.can_manage_faculty(9));
        assert_eq!(dept.student_id(), None);
    }
}
