//! 学院、班级、学生与管理员查询

use super::SeaOrmStorage;
use crate::entity::prelude::{Admins, Classes, Faculties, Students};
use crate::entity::{classes, faculties, students};
use crate::errors::{DRLSystemError, Result};
use crate::models::actors::entities::{Admin, Class, Faculty, Student};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_admin_by_id_impl(&self, id: i64) -> Result<Option<Admin>> {
        let result = Admins::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    pub async fn get_class_by_id_impl(&self, id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn get_faculty_by_id_impl(&self, id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学院失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    pub async fn list_faculties_impl(&self) -> Result<Vec<Faculty>> {
        let result = Faculties::find()
            .order_by_asc(faculties::Column::FacultyCode)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学院列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_faculty()).collect())
    }

    pub async fn list_classes_by_faculty_impl(&self, faculty_id: i64) -> Result<Vec<Class>> {
        let result = Classes::find()
            .filter(classes::Column::FacultyId.eq(faculty_id))
            .order_by_asc(classes::Column::ClassCode)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_class()).collect())
    }

    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let result = Students::find()
            .filter(students::Column::ClassId.eq(class_id))
            .filter(students::Column::IsActive.eq(true))
            .order_by_asc(students::Column::StudentCode)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn list_class_secretaries_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let result = Students::find()
            .filter(students::Column::ClassId.eq(class_id))
            .filter(students::Column::IsSecretary.eq(true))
            .filter(students::Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询团支书失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn count_active_students_impl(&self) -> Result<u64> {
        Students::find()
            .filter(students::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("统计学生人数失败: {e}")))
    }
}
