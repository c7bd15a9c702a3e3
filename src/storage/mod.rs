use std::sync::Arc;

use chrono::{DateTime, Utc};

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 组织结构
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn get_faculty_by_id(&self, id: i64) -> Result<Option<Faculty>>;
    async fn list_faculties(&self) -> Result<Vec<Faculty>>;
    async fn list_classes_by_faculty(&self, faculty_id: i64) -> Result<Vec<Class>>;
    // 班级中在读学生，按学号排序
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;
    async fn list_class_secretaries(&self, class_id: i64) -> Result<Vec<Student>>;
    async fn count_active_students(&self) -> Result<u64>;

    /// 评分大类
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn count_categories(&self) -> Result<u64>;
    async fn create_category(&self, req: CreateCategoryRequest, code: String) -> Result<Category>;
    async fn update_category(&self, id: i64, req: UpdateCategoryRequest) -> Result<Option<Category>>;
    // 软删除
    async fn deactivate_category(&self, id: i64) -> Result<bool>;

    /// 评分标准
    async fn list_criteria(&self, query: CriteriaListQuery) -> Result<Vec<Criteria>>;
    async fn get_criteria_by_id(&self, id: i64) -> Result<Option<Criteria>>;
    async fn count_criteria_in_category(&self, category_id: i64) -> Result<u64>;
    async fn create_criteria(&self, req: CreateCriteriaRequest, code: String) -> Result<Criteria>;
    async fn update_criteria(&self, id: i64, req: UpdateCriteriaRequest) -> Result<Option<Criteria>>;
    async fn deactivate_criteria(&self, id: i64) -> Result<bool>;

    /// 学期
    async fn list_semesters(&self) -> Result<Vec<Semester>>;
    async fn get_semester_by_id(&self, id: i64) -> Result<Option<Semester>>;
    // 覆盖 now 的有效学期
    async fn find_current_semester(&self, now: DateTime<Utc>) -> Result<Option<Semester>>;
    async fn find_semester(&self, semester_number: i32, academic_year: &str) -> Result<Option<Semester>>;
    async fn create_semester(
        &self,
        req: CreateSemesterRequest,
        grading_deadline: Option<DateTime<Utc>>,
    ) -> Result<Semester>;
    async fn update_semester(
        &self,
        id: i64,
        req: UpdateSemesterRequest,
        grading_deadline: Option<DateTime<Utc>>,
    ) -> Result<Option<Semester>>;

    /// 自评分数
    async fn list_manual_scores(&self, student_id: i64, semester: &Semester) -> Result<Vec<ManualScore>>;
    // 班级批量计算用
    async fn list_manual_scores_for_students(
        &self,
        student_ids: &[i64],
        semester: &Semester,
    ) -> Result<Vec<ManualScore>>;
    // 创建或覆盖自评，状态重置为待审批
    async fn upsert_self_score(
        &self,
        key: ManualScoreKey,
        self_score: f64,
        evidence: Vec<Evidence>,
        now: DateTime<Utc>,
    ) -> Result<ManualScore>;
    async fn review_manual_score(
        &self,
        key: ManualScoreKey,
        review: ScoreReview,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<ManualScore>;

    /// 活动
    async fn count_events_with_code_prefix(&self, prefix: &str) -> Result<u64>;
    async fn create_event(&self, event: NewEvent, now: DateTime<Utc>) -> Result<Event>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn list_events(&self, query: EventListQuery) -> Result<PaginatedResponse<Event>>;
    async fn list_available_events(
        &self,
        student: &Student,
        semester_id: Option<i64>,
    ) -> Result<Vec<Event>>;
    // 整行保存
    async fn update_event(&self, event: Event, now: DateTime<Utc>) -> Result<Event>;
    // 同时删除参与记录
    async fn delete_event(&self, id: i64) -> Result<bool>;
    // 同一事务内停用活动并把全部参与记录改为 cancelled
    async fn cancel_event(&self, id: i64, now: DateTime<Utc>) -> Result<Option<(Event, u64)>>;
    // 已审批、有效且在 [from, to) 内举行的活动
    async fn list_events_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Event>>;
    // 已审批且有效，按活动日期倒序
    async fn list_open_events(&self) -> Result<Vec<Event>>;

    /// 活动参与
    async fn get_participation(&self, event_id: i64, student_id: i64) -> Result<Option<EventParticipation>>;
    async fn count_occupied_seats(&self, event_id: i64) -> Result<u64>;
    async fn count_attended_participations(&self) -> Result<u64>;
    async fn create_participation(
        &self,
        event_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<EventParticipation>;
    async fn delete_participation(&self, id: i64) -> Result<bool>;
    async fn mark_participation(&self, id: i64, mark: AttendanceMark) -> Result<Option<EventParticipation>>;
    async fn list_event_participants(&self, event_id: i64) -> Result<Vec<EventParticipant>>;
    async fn list_student_participations(&self, student_id: i64) -> Result<Vec<EventParticipationDetail>>;
    // 仅 registered/attended，供自动计分使用
    async fn list_scoring_participations(&self, student_id: i64) -> Result<Vec<EventParticipationDetail>>;
    async fn list_scoring_participations_for_students(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<EventParticipationDetail>>;

    /// 学生测评
    async fn get_assessment(&self, student_id: i64, semester: &Semester) -> Result<Option<StudentAssessment>>;
    async fn list_class_assessments(&self, class_id: i64, semester: &Semester) -> Result<Vec<StudentAssessment>>;
    async fn class_review_counts(&self, class_id: i64, semester: &Semester) -> Result<ReviewCounts>;
    // 写入 class_reviewed，已进入学院审核的测评不会被修改
    async fn finalize_student(
        &self,
        student_id: i64,
        semester: &Semester,
        total_score: f64,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<FinalizeOutcome>;
    // 事务内复核完成度后批量推进到 faculty_reviewed
    async fn approve_class(
        &self,
        class_id: i64,
        semester: &Semester,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome>;
    // 事务内复核后批量推进到 finalized 并写入等级
    async fn finalize_faculty(
        &self,
        faculty_id: i64,
        semester: &Semester,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
