use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 自增主键列
fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学院表
        manager
            .create_table(
                Table::create()
                    .table(Faculties::Table)
                    .if_not_exists()
                    .col(pk(Faculties::Id))
                    .col(
                        ColumnDef::new(Faculties::FacultyCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Faculties::FacultyName).string().not_null())
                    .col(ColumnDef::new(Faculties::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Faculties::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(pk(Classes::Id))
                    .col(
                        ColumnDef::new(Classes::ClassCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Classes::ClassName).string().not_null())
                    .col(ColumnDef::new(Classes::FacultyId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::AcademicYear).string().null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::FacultyId)
                            .to(Faculties::Table, Faculties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk(Students::Id))
                    .col(
                        ColumnDef::new(Students::StudentCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Email).string().not_null())
                    .col(ColumnDef::new(Students::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Students::FacultyId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Students::IsSecretary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Students::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建管理员表
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk(Admins::Id))
                    .col(
                        ColumnDef::new(Admins::AdminCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::FirstName).string().not_null())
                    .col(ColumnDef::new(Admins::LastName).string().not_null())
                    .col(ColumnDef::new(Admins::Email).string().not_null())
                    .col(ColumnDef::new(Admins::Level).string().not_null())
                    .col(ColumnDef::new(Admins::FacultyId).big_integer().null())
                    .col(
                        ColumnDef::new(Admins::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Admins::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学期表
        manager
            .create_table(
                Table::create()
                    .table(Semesters::Table)
                    .if_not_exists()
                    .col(pk(Semesters::Id))
                    .col(
                        ColumnDef::new(Semesters::SemesterNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Semesters::AcademicYear).string().not_null())
                    .col(ColumnDef::new(Semesters::StartDate).big_integer().not_null())
                    .col(ColumnDef::new(Semesters::EndDate).big_integer().not_null())
                    .col(
                        ColumnDef::new(Semesters::GradingStartDate)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Semesters::GradingDeadline)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Semesters::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Semesters::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Semesters::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评分大类表
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk(Categories::Id))
                    .col(
                        ColumnDef::new(Categories::CategoryCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::CategoryName).string().not_null())
                    .col(ColumnDef::new(Categories::Description).text().null())
                    .col(ColumnDef::new(Categories::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(Categories::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Categories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Categories::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Categories::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评分标准表
        manager
            .create_table(
                Table::create()
                    .table(Criteria::Table)
                    .if_not_exists()
                    .col(pk(Criteria::Id))
                    .col(ColumnDef::new(Criteria::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Criteria::CriteriaCode).string().not_null())
                    .col(ColumnDef::new(Criteria::Content).text().not_null())
                    .col(ColumnDef::new(Criteria::ScoringType).string().not_null())
                    .col(ColumnDef::new(Criteria::Unit).string().not_null())
                    .col(
                        ColumnDef::new(Criteria::PlusScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Criteria::MinusScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Criteria::MaxTimes).integer().null())
                    .col(
                        ColumnDef::new(Criteria::RequireEvidence)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Criteria::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Criteria::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Criteria::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Criteria::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Criteria::Table, Criteria::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建自评分数表
        manager
            .create_table(
                Table::create()
                    .table(ManualScores::Table)
                    .if_not_exists()
                    .col(pk(ManualScores::Id))
                    .col(ColumnDef::new(ManualScores::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(ManualScores::CriteriaId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ManualScores::SemesterNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ManualScores::AcademicYear).string().not_null())
                    .col(
                        ColumnDef::new(ManualScores::SelfScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(ManualScores::Evidence).text().not_null())
                    .col(ColumnDef::new(ManualScores::ApprovalStatus).string().not_null())
                    .col(ColumnDef::new(ManualScores::ApprovedScore).double().null())
                    .col(ColumnDef::new(ManualScores::ApprovedByKind).string().null())
                    .col(ColumnDef::new(ManualScores::ApprovedById).big_integer().null())
                    .col(ColumnDef::new(ManualScores::ApprovedAt).big_integer().null())
                    .col(ColumnDef::new(ManualScores::RejectionReason).text().null())
                    .col(ColumnDef::new(ManualScores::Description).text().null())
                    .col(ColumnDef::new(ManualScores::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ManualScores::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ManualScores::Table, ManualScores::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ManualScores::Table, ManualScores::CriteriaId)
                            .to(Criteria::Table, Criteria::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建活动表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk(Events::Id))
                    .col(
                        ColumnDef::new(Events::EventCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Events::EventName).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::CriteriaId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Events::Score)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Events::EventDate).big_integer().not_null())
                    .col(ColumnDef::new(Events::EndDate).big_integer().null())
                    .col(ColumnDef::new(Events::SemesterId).big_integer().not_null())
                    .col(ColumnDef::new(Events::OrganizerType).string().not_null())
                    .col(ColumnDef::new(Events::Scope).string().not_null())
                    .col(ColumnDef::new(Events::TargetClassId).big_integer().null())
                    .col(ColumnDef::new(Events::TargetFacultyId).big_integer().null())
                    .col(ColumnDef::new(Events::MaxParticipants).integer().null())
                    .col(ColumnDef::new(Events::Location).string().null())
                    .col(ColumnDef::new(Events::ApprovalStatus).string().not_null())
                    .col(ColumnDef::new(Events::ApprovedByKind).string().null())
                    .col(ColumnDef::new(Events::ApprovedById).big_integer().null())
                    .col(ColumnDef::new(Events::ApprovedAt).big_integer().null())
                    .col(ColumnDef::new(Events::RejectionReason).text().null())
                    .col(ColumnDef::new(Events::CreatedByKind).string().null())
                    .col(ColumnDef::new(Events::CreatedById).big_integer().null())
                    .col(
                        ColumnDef::new(Events::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Events::AttendancePassword)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Events::Table, Events::CriteriaId)
                            .to(Criteria::Table, Criteria::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Events::Table, Events::SemesterId)
                            .to(Semesters::Table, Semesters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建活动参与表
        manager
            .create_table(
                Table::create()
                    .table(EventParticipations::Table)
                    .if_not_exists()
                    .col(pk(EventParticipations::Id))
                    .col(
                        ColumnDef::new(EventParticipations::EventId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventParticipations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventParticipations::Status).string().not_null())
                    .col(
                        ColumnDef::new(EventParticipations::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventParticipations::AttendedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EventParticipations::ScoreReceived)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EventParticipations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventParticipations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventParticipations::Table, EventParticipations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventParticipations::Table, EventParticipations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生测评表
        manager
            .create_table(
                Table::create()
                    .table(StudentAssessments::Table)
                    .if_not_exists()
                    .col(pk(StudentAssessments::Id))
                    .col(
                        ColumnDef::new(StudentAssessments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::SemesterNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::AcademicYear)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentAssessments::Status).string().not_null())
                    .col(
                        ColumnDef::new(StudentAssessments::TotalScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::Classification)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::ClassReviewedByKind)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::ClassReviewedById)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::ClassReviewedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::FacultyReviewedByKind)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::FacultyReviewedById)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::FacultyReviewedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::FinalizedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssessments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentAssessments::Table, StudentAssessments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_semesters_number_year")
                    .table(Semesters::Table)
                    .col(Semesters::SemesterNumber)
                    .col(Semesters::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_manual_scores_student_criteria_semester")
                    .table(ManualScores::Table)
                    .col(ManualScores::StudentId)
                    .col(ManualScores::CriteriaId)
                    .col(ManualScores::SemesterNumber)
                    .col(ManualScores::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_event_participations_event_student")
                    .table(EventParticipations::Table)
                    .col(EventParticipations::EventId)
                    .col(EventParticipations::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_student_assessments_student_semester")
                    .table(StudentAssessments::Table)
                    .col(StudentAssessments::StudentId)
                    .col(StudentAssessments::SemesterNumber)
                    .col(StudentAssessments::AcademicYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_id")
                    .table(Students::Table)
                    .col(Students::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_faculty_id")
                    .table(Classes::Table)
                    .col(Classes::FacultyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_criteria_category_id")
                    .table(Criteria::Table)
                    .col(Criteria::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_criteria_id")
                    .table(Events::Table)
                    .col(Events::CriteriaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_event_date")
                    .table(Events::Table)
                    .col(Events::EventDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_event_participations_student_id")
                    .table(EventParticipations::Table)
                    .col(EventParticipations::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudentAssessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventParticipations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ManualScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Criteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculties::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Faculties {
    #[sea_orm(iden = "faculties")]
    Table,
    Id,
    FacultyCode,
    FacultyName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    ClassCode,
    ClassName,
    FacultyId,
    AcademicYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    StudentCode,
    FirstName,
    LastName,
    Email,
    ClassId,
    FacultyId,
    IsSecretary,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    AdminCode,
    FirstName,
    LastName,
    Email,
    Level,
    FacultyId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Semesters {
    #[sea_orm(iden = "semesters")]
    Table,
    Id,
    SemesterNumber,
    AcademicYear,
    StartDate,
    EndDate,
    GradingStartDate,
    GradingDeadline,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    #[sea_orm(iden = "categories")]
    Table,
    Id,
    CategoryCode,
    CategoryName,
    Description,
    MaxScore,
    DisplayOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Criteria {
    #[sea_orm(iden = "criteria")]
    Table,
    Id,
    CategoryId,
    CriteriaCode,
    Content,
    ScoringType,
    Unit,
    PlusScore,
    MinusScore,
    MaxTimes,
    RequireEvidence,
    DisplayOrder,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ManualScores {
    #[sea_orm(iden = "manual_scores")]
    Table,
    Id,
    StudentId,
    CriteriaId,
    SemesterNumber,
    AcademicYear,
    SelfScore,
    Evidence,
    ApprovalStatus,
    ApprovedScore,
    ApprovedByKind,
    ApprovedById,
    ApprovedAt,
    RejectionReason,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    EventCode,
    EventName,
    Description,
    CriteriaId,
    Score,
    EventDate,
    EndDate,
    SemesterId,
    OrganizerType,
    Scope,
    TargetClassId,
    TargetFacultyId,
    MaxParticipants,
    Location,
    ApprovalStatus,
    ApprovedByKind,
    ApprovedById,
    ApprovedAt,
    RejectionReason,
    CreatedByKind,
    CreatedById,
    IsActive,
    AttendancePassword,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EventParticipations {
    #[sea_orm(iden = "event_participations")]
    Table,
    Id,
    EventId,
    StudentId,
    Status,
    RegisteredAt,
    AttendedAt,
    ScoreReceived,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentAssessments {
    #[sea_orm(iden = "student_assessments")]
    Table,
    Id,
    StudentId,
    SemesterNumber,
    AcademicYear,
    Status,
    TotalScore,
    Classification,
    ClassReviewedByKind,
    ClassReviewedById,
    ClassReviewedAt,
    FacultyReviewedByKind,
    FacultyReviewedById,
    FacultyReviewedAt,
    FinalizedAt,
    CreatedAt,
    UpdatedAt,
}
