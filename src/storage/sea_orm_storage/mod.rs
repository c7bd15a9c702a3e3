//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod actors;
mod assessments;
mod criteria;
mod events;
mod participations;
mod scores;
mod semesters;

use crate::config::AppConfig;
use crate::errors::{DRLSystemError, Result};
use crate::models::{
    PaginatedResponse,
    actors::entities::{ActorRef, Admin, Class, Faculty, Student},
    assessments::entities::{ApprovalOutcome, FinalizeOutcome, ReviewCounts, StudentAssessment},
    criteria::{
        entities::{Category, Criteria},
        requests::{
            CreateCategoryRequest, CreateCriteriaRequest, CriteriaListQuery, UpdateCategoryRequest,
            UpdateCriteriaRequest,
        },
    },
    events::{
        entities::{
            AttendanceMark, Event, EventParticipant, EventParticipation, EventParticipationDetail,
            NewEvent,
        },
        requests::EventListQuery,
    },
    scores::entities::{Evidence, ManualScore, ManualScoreKey, ScoreReview},
    semesters::{
        entities::Semester,
        requests::{CreateSemesterRequest, UpdateSemesterRequest},
    },
};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 包装已有连接并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DRLSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DRLSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DRLSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DRLSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[async_trait::async_trait]
impl Storage for SeaOrmStorage {
    // 组织结构
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>> {
        self.get_admin_by_id_impl(id).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>> {
        self.get_faculty_by_id_impl(id).await
    }

    async fn list_faculties(&self) -> Result<Vec<Faculty>> {
        self.list_faculties_impl().await
    }

    async fn list_classes_by_faculty(&self, faculty_id: i64) -> Result<Vec<Class>> {
        self.list_classes_by_faculty_impl(faculty_id).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn list_class_secretaries(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_class_secretaries_impl(class_id).await
    }

    async fn count_active_students(&self) -> Result<u64> {
        self.count_active_students_impl().await
    }

    // 评分大类
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.list_categories_impl().await
    }

    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.get_category_by_id_impl(id).await
    }

    async fn count_categories(&self) -> Result<u64> {
        self.count_categories_impl().await
    }

    async fn create_category(&self, req: CreateCategoryRequest, code: String) -> Result<Category> {
        self.create_category_impl(req, code).await
    }

    async fn update_category(
        &self,
        id: i64,
        req: UpdateCategoryRequest,
    ) -> Result<Option<Category>> {
        self.update_category_impl(id, req).await
    }

    async fn deactivate_category(&self, id: i64) -> Result<bool> {
        self.deactivate_category_impl(id).await
    }

    // 评分标准
    async fn list_criteria(&self, query: CriteriaListQuery) -> Result<Vec<Criteria>> {
        self.list_criteria_impl(query).await
    }

    async fn get_criteria_by_id(&self, id: i64) -> Result<Option<Criteria>> {
        self.get_criteria_by_id_impl(id).await
    }

    async fn count_criteria_in_category(&self, category_id: i64) -> Result<u64> {
        self.count_criteria_in_category_impl(category_id).await
    }

    async fn create_criteria(&self, req: CreateCriteriaRequest, code: String) -> Result<Criteria> {
        self.create_criteria_impl(req, code).await
    }

    async fn update_criteria(
        &self,
        id: i64,
        req: UpdateCriteriaRequest,
    ) -> Result<Option<Criteria>> {
        self.update_criteria_impl(id, req).await
    }

    async fn deactivate_criteria(&self, id: i64) -> Result<bool> {
        self.deactivate_criteria_impl(id).await
    }

    // 学期
    async fn list_semesters(&self) -> Result<Vec<Semester>> {
        self.list_semesters_impl().await
    }

    async fn get_semester_by_id(&self, id: i64) -> Result<Option<Semester>> {
        self.get_semester_by_id_impl(id).await
    }

    async fn find_current_semester(&self, now: DateTime<Utc>) -> Result<Option<Semester>> {
        self.find_current_semester_impl(now).await
    }

    async fn find_semester(
        &self,
        semester_number: i32,
        academic_year: &str,
    ) -> Result<Option<Semester>> {
        self.find_semester_impl(semester_number, academic_year).await
    }

    async fn create_semester(
        &self,
        req: CreateSemesterRequest,
        grading_deadline: Option<DateTime<Utc>>,
    ) -> Result<Semester> {
        self.create_semester_impl(req, grading_deadline).await
    }

    async fn update_semester(
        &self,
        id: i64,
        req: UpdateSemesterRequest,
        grading_deadline: Option<DateTime<Utc>>,
    ) -> Result<Option<Semester>> {
        self.update_semester_impl(id, req, grading_deadline).await
    }

    // 自评分数
    async fn list_manual_scores(
        &self,
        student_id: i64,
        semester: &Semester,
    ) -> Result<Vec<ManualScore>> {
        self.list_manual_scores_impl(student_id, semester).await
    }

    async fn list_manual_scores_for_students(
        &self,
        student_ids: &[i64],
        semester: &Semester,
    ) -> Result<Vec<ManualScore>> {
        self.list_manual_scores_for_students_impl(student_ids, semester)
            .await
    }

    async fn upsert_self_score(
        &self,
        key: ManualScoreKey,
        self_score: f64,
        evidence: Vec<Evidence>,
        now: DateTime<Utc>,
    ) -> Result<ManualScore> {
        self.upsert_self_score_impl(key, self_score, evidence, now).await
    }

    async fn review_manual_score(
        &self,
        key: ManualScoreKey,
        review: ScoreReview,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<ManualScore> {
        self.review_manual_score_impl(key, review, reviewer, now).await
    }

    // 活动
    async fn count_events_with_code_prefix(&self, prefix: &str) -> Result<u64> {
        self.count_events_with_code_prefix_impl(prefix).await
    }

    async fn create_event(&self, event: NewEvent, now: DateTime<Utc>) -> Result<Event> {
        self.create_event_impl(event, now).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        self.get_event_by_id_impl(id).await
    }

    async fn list_events(&self, query: EventListQuery) -> Result<PaginatedResponse<Event>> {
        self.list_events_impl(query).await
    }

    async fn list_available_events(
        &self,
        student: &Student,
        semester_id: Option<i64>,
    ) -> Result<Vec<Event>> {
        self.list_available_events_impl(student, semester_id).await
    }

    async fn update_event(&self, event: Event, now: DateTime<Utc>) -> Result<Event> {
        self.update_event_impl(event, now).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    async fn cancel_event(&self, id: i64, now: DateTime<Utc>) -> Result<Option<(Event, u64)>> {
        self.cancel_event_impl(id, now).await
    }

    async fn list_events_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        self.list_events_between_impl(from, to).await
    }

    async fn list_open_events(&self) -> Result<Vec<Event>> {
        self.list_open_events_impl().await
    }

    // 活动参与
    async fn get_participation(
        &self,
        event_id: i64,
        student_id: i64,
    ) -> Result<Option<EventParticipation>> {
        self.get_participation_impl(event_id, student_id).await
    }

    async fn count_occupied_seats(&self, event_id: i64) -> Result<u64> {
        self.count_occupied_seats_impl(event_id).await
    }

    async fn count_attended_participations(&self) -> Result<u64> {
        self.count_attended_participations_impl().await
    }

    async fn create_participation(
        &self,
        event_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<EventParticipation> {
        self.create_participation_impl(event_id, student_id, now).await
    }

    async fn delete_participation(&self, id: i64) -> Result<bool> {
        self.delete_participation_impl(id).await
    }

    async fn mark_participation(
        &self,
        id: i64,
        mark: AttendanceMark,
    ) -> Result<Option<EventParticipation>> {
        self.mark_participation_impl(id, mark).await
    }

    async fn list_event_participants(&self, event_id: i64) -> Result<Vec<EventParticipant>> {
        self.list_event_participants_impl(event_id).await
    }

    async fn list_student_participations(
        &self,
        student_id: i64,
    ) -> Result<Vec<EventParticipationDetail>> {
        self.list_student_participations_impl(student_id).await
    }

    async fn list_scoring_participations(
        &self,
        student_id: i64,
    ) -> Result<Vec<EventParticipationDetail>> {
        self.list_scoring_participations_impl(student_id).await
    }

    async fn list_scoring_participations_for_students(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<EventParticipationDetail>> {
        self.list_scoring_participations_for_students_impl(student_ids)
            .await
    }

    // 学生测评
    async fn get_assessment(
        &self,
        student_id: i64,
        semester: &Semester,
    ) -> Result<Option<StudentAssessment>> {
        self.get_assessment_impl(student_id, semester).await
    }

    async fn list_class_assessments(
        &self,
        class_id: i64,
        semester: &Semester,
    ) -> Result<Vec<StudentAssessment>> {
        self.list_class_assessments_impl(class_id, semester).await
    }

    async fn class_review_counts(
        &self,
        class_id: i64,
        semester: &Semester,
    ) -> Result<ReviewCounts> {
        self.class_review_counts_impl(class_id, semester).await
    }

    async fn finalize_student(
        &self,
        student_id: i64,
        semester: &Semester,
        total_score: f64,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<FinalizeOutcome> {
        self.finalize_student_impl(student_id, semester, total_score, reviewer, now).await
    }

    async fn approve_class(
        &self,
        class_id: i64,
        semester: &Semester,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome> {
        self.approve_class_impl(class_id, semester, reviewer, now).await
    }

    async fn finalize_faculty(
        &self,
        faculty_id: i64,
        semester: &Semester,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome> {
        self.finalize_faculty_impl(faculty_id, semester, now).await
    }
}
