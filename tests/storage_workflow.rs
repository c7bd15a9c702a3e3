use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_drlsystem::engine::Violation;
use rust_drlsystem::engine::participation::check_attendance_mark;
use rust_drlsystem::engine::resolvers::SheetView;
use rust_drlsystem::engine::score_sheet::{SheetInputs, build_score_sheet};
use rust_drlsystem::engine::structure::CriteriaStructure;
use rust_drlsystem::engine::time_window::GradingPolicy;
use rust_drlsystem::entity::prelude::{ClassActiveModel, FacultyActiveModel, StudentActiveModel};
use rust_drlsystem::entity::to_micros;
use rust_drlsystem::models::actors::entities::ActorRef;
use rust_drlsystem::models::assessments::entities::{
    ApprovalOutcome, AssessmentStatus, Classification, FinalizeOutcome,
};
use rust_drlsystem::models::criteria::entities::{Criteria, CriteriaUnit, ScoringType};
use rust_drlsystem::models::criteria::requests::{
    CreateCategoryRequest, CreateCriteriaRequest, CriteriaListQuery,
};
use rust_drlsystem::models::events::entities::{
    AttendanceMark, Event, EventApproval, EventScope, NewEvent, OrganizerType, ParticipationStatus,
};
use rust_drlsystem::models::scores::entities::{ApprovalStatus, ManualScoreKey, ScoreReview};
use rust_drlsystem::models::semesters::entities::Semester;
use rust_drlsystem::models::semesters::requests::CreateSemesterRequest;
use rust_drlsystem::storage::Storage;
use rust_drlsystem::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
}

async fn setup() -> (SeaOrmStorage, DatabaseConnection) {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    let storage = SeaOrmStorage::from_connection(db.clone()).await.unwrap();
    (storage, db)
}

async fn seed_faculty(db: &DatabaseConnection, code: &str) -> i64 {
    let at = to_micros(now());
    FacultyActiveModel {
        faculty_code: Set(code.to_string()),
        faculty_name: Set(format!("学院 {code}")),
        created_at: Set(at),
        updated_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn seed_class(db: &DatabaseConnection, faculty_id: i64, code: &str) -> i64 {
    let at = to_micros(now());
    ClassActiveModel {
        class_code: Set(code.to_string()),
        class_name: Set(format!("班级 {code}")),
        faculty_id: Set(faculty_id),
        academic_year: Set(Some("2023-2024".to_string())),
        created_at: Set(at),
        updated_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn seed_student(
    db: &DatabaseConnection,
    class_id: i64,
    faculty_id: i64,
    code: &str,
    is_secretary: bool,
) -> i64 {
    let at = to_micros(now());
    StudentActiveModel {
        student_code: Set(code.to_string()),
        first_name: Set("An".to_string()),
        last_name: Set("Nguyen".to_string()),
        email: Set(format!("{code}@student.example.edu")),
        class_id: Set(class_id),
        faculty_id: Set(faculty_id),
        is_secretary: Set(is_secretary),
        is_active: Set(true),
        created_at: Set(at),
        updated_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

async fn seed_semester(storage: &SeaOrmStorage) -> Semester {
    let grading_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    storage
        .create_semester(
            CreateSemesterRequest {
                semester_number: 2,
                academic_year: "2023-2024".to_string(),
                start_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap(),
                grading_start_date: Some(grading_start),
            },
            Some(grading_start + Duration::days(14)),
        )
        .await
        .unwrap()
}

async fn seed_criteria(
    storage: &SeaOrmStorage,
    max_score: f64,
    scoring_type: ScoringType,
) -> Criteria {
    let category = storage
        .create_category(
            CreateCategoryRequest {
                category_name: "学习态度".to_string(),
                description: None,
                max_score,
                order: 1,
            },
            "DM1".to_string(),
        )
        .await
        .unwrap();

    storage
        .create_criteria(
            CreateCriteriaRequest {
                category_id: category.id,
                content: "按时上课".to_string(),
                scoring_type,
                unit: CriteriaUnit::PerSemester,
                plus_score: 10.0,
                minus_score: 0.0,
                max_times: None,
                require_evidence: false,
                order: 1,
            },
            "TC1.1".to_string(),
        )
        .await
        .unwrap()
}

async fn student_sheet_total(storage: &SeaOrmStorage, student_id: i64, semester: &Semester) -> f64 {
    let categories = storage.list_categories().await.unwrap();
    let criteria = storage
        .list_criteria(CriteriaListQuery::default())
        .await
        .unwrap();
    let structure = CriteriaStructure::build(categories, criteria);
    let manual_scores = storage.list_manual_scores(student_id, semester).await.unwrap();
    let participations = storage
        .list_scoring_participations(student_id)
        .await
        .unwrap();

    let sheet = build_score_sheet(
        &SheetInputs {
            semester,
            structure: &structure,
            manual_scores: &manual_scores,
            participations: &participations,
        },
        &GradingPolicy::default(),
        SheetView::Student,
        now(),
    );
    sheet.grand_total
}

async fn seed_event(
    storage: &SeaOrmStorage,
    criteria_id: i64,
    semester: &Semester,
    event_date: DateTime<Utc>,
    max_participants: Option<i32>,
) -> Event {
    storage
        .create_event(
            NewEvent {
                event_code: format!("SK2024-{}", event_date.timestamp()),
                event_name: "志愿服务".to_string(),
                description: None,
                criteria_id,
                score: 3.0,
                event_date,
                end_date: None,
                semester_id: semester.id,
                organizer_type: OrganizerType::School,
                scope: EventScope::University,
                target_class_id: None,
                target_faculty_id: None,
                max_participants,
                location: None,
                approval: EventApproval {
                    status: ApprovalStatus::Approved,
                    approved_by: Some(ActorRef::admin(1)),
                    approved_at: Some(now()),
                },
                created_by: ActorRef::admin(1),
                attendance_password: "123456".to_string(),
            },
            now(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_self_score_counts_after_approval() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "CNTT").await;
    let class_id = seed_class(&db, faculty_id, "K65A").await;
    let student_id = seed_student(&db, class_id, faculty_id, "SV001", false).await;
    let secretary_id = seed_student(&db, class_id, faculty_id, "SV002", true).await;
    let semester = seed_semester(&storage).await;
    let criteria = seed_criteria(&storage, 5.0, ScoringType::Manual).await;
    let key = ManualScoreKey::new(student_id, criteria.id, &semester);

    let submitted = storage
        .upsert_self_score(key.clone(), 8.0, vec![], now())
        .await
        .unwrap();
    assert_eq!(submitted.approval_status, ApprovalStatus::Pending);
    assert_eq!(student_sheet_total(&storage, student_id, &semester).await, 0.0);

    let reviewed = storage
        .review_manual_score(
            key.clone(),
            ScoreReview::Approve {
                approved_score: 6.0,
                note: None,
            },
            ActorRef::student(secretary_id),
            now(),
        )
        .await
        .unwrap();
    assert_eq!(reviewed.approval_status, ApprovalStatus::Approved);
    assert_eq!(reviewed.approved_by, Some(ActorRef::student(secretary_id)));

    // 大类封顶 5 分
    assert_eq!(student_sheet_total(&storage, student_id, &semester).await, 5.0);

    // 重新提交后回到待审批
    let resubmitted = storage
        .upsert_self_score(key, 3.0, vec![], now() + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(resubmitted.approval_status, ApprovalStatus::Pending);
    assert_eq!(resubmitted.self_score, 3.0);
    assert_eq!(resubmitted.id, submitted.id);
    assert_eq!(student_sheet_total(&storage, student_id, &semester).await, 0.0);
}

#[tokio::test]
async fn test_class_approval_requires_every_student() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "KT").await;
    let class_id = seed_class(&db, faculty_id, "K66B").await;
    let semester = seed_semester(&storage).await;

    let mut student_ids = Vec::new();
    for i in 0..10 {
        student_ids.push(seed_student(&db, class_id, faculty_id, &format!("KT{i:03}"), i == 0).await);
    }
    let reviewer = ActorRef::student(student_ids[0]);

    for id in &student_ids[..9] {
        let outcome = storage
            .finalize_student(*id, &semester, 75.0, reviewer, now())
            .await
            .unwrap();
        assert!(matches!(outcome, FinalizeOutcome::Saved(_)));
    }

    let outcome = storage
        .approve_class(class_id, &semester, ActorRef::admin(1), now())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ApprovalOutcome::Incomplete {
            students: 10,
            reviewed: 9
        }
    );

    // 未通过时不修改任何测评
    let assessments = storage
        .list_class_assessments(class_id, &semester)
        .await
        .unwrap();
    assert_eq!(assessments.len(), 9);
    assert!(assessments.iter().all(|a| a.status == AssessmentStatus::ClassReviewed));
    assert!(assessments.iter().all(|a| a.faculty_reviewed_at.is_none()));

    storage
        .finalize_student(student_ids[9], &semester, 81.0, reviewer, now())
        .await
        .unwrap();
    let outcome = storage
        .approve_class(class_id, &semester, ActorRef::admin(1), now())
        .await
        .unwrap();
    assert_eq!(outcome, ApprovalOutcome::Approved { updated: 10 });

    // 学院审核后团支书不能再修改
    let outcome = storage
        .finalize_student(student_ids[9], &semester, 90.0, reviewer, now())
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        FinalizeOutcome::Locked(AssessmentStatus::FacultyReviewed)
    ));
}

#[tokio::test]
async fn test_empty_class_counts_as_complete() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "NN").await;
    let class_id = seed_class(&db, faculty_id, "K67C").await;
    let semester = seed_semester(&storage).await;

    let counts = storage.class_review_counts(class_id, &semester).await.unwrap();
    assert_eq!(counts.students, 0);

    let outcome = storage
        .approve_class(class_id, &semester, ActorRef::admin(1), now())
        .await
        .unwrap();
    assert_eq!(outcome, ApprovalOutcome::Approved { updated: 0 });

    let outcome = storage
        .finalize_faculty(faculty_id, &semester, now())
        .await
        .unwrap();
    assert_eq!(outcome, ApprovalOutcome::Approved { updated: 0 });
}

#[tokio::test]
async fn test_faculty_finalization_sets_classification() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "QT").await;
    let class_id = seed_class(&db, faculty_id, "K64D").await;
    let top = seed_student(&db, class_id, faculty_id, "QT001", true).await;
    let average = seed_student(&db, class_id, faculty_id, "QT002", false).await;
    let semester = seed_semester(&storage).await;
    let reviewer = ActorRef::student(top);

    storage
        .finalize_student(top, &semester, 92.0, reviewer, now())
        .await
        .unwrap();
    storage
        .finalize_student(average, &semester, 70.0, reviewer, now())
        .await
        .unwrap();

    // 班级尚未经学院审批
    let outcome = storage
        .finalize_faculty(faculty_id, &semester, now())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        ApprovalOutcome::Incomplete {
            students: 2,
            reviewed: 0
        }
    );

    storage
        .approve_class(class_id, &semester, ActorRef::admin(1), now())
        .await
        .unwrap();
    let outcome = storage
        .finalize_faculty(faculty_id, &semester, now())
        .await
        .unwrap();
    assert_eq!(outcome, ApprovalOutcome::Approved { updated: 2 });

    let top_assessment = storage.get_assessment(top, &semester).await.unwrap().unwrap();
    assert_eq!(top_assessment.status, AssessmentStatus::Finalized);
    assert_eq!(top_assessment.classification, Some(Classification::Excellent));
    assert!(top_assessment.finalized_at.is_some());

    let average_assessment = storage
        .get_assessment(average, &semester)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(average_assessment.classification, Some(Classification::Average));
}

#[tokio::test]
async fn test_registration_is_unique_per_student() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "DL").await;
    let class_id = seed_class(&db, faculty_id, "K65E").await;
    let student_id = seed_student(&db, class_id, faculty_id, "DL001", false).await;
    let other_id = seed_student(&db, class_id, faculty_id, "DL002", false).await;
    let semester = seed_semester(&storage).await;
    let criteria = seed_criteria(&storage, 10.0, ScoringType::Auto).await;
    let event = seed_event(&storage, criteria.id, &semester, now() + Duration::days(3), Some(2)).await;

    storage
        .create_participation(event.id, student_id, now())
        .await
        .unwrap();
    assert!(
        storage
            .create_participation(event.id, student_id, now())
            .await
            .is_err()
    );
    storage
        .create_participation(event.id, other_id, now())
        .await
        .unwrap();
    assert_eq!(storage.count_occupied_seats(event.id).await.unwrap(), 2);

    let (cancelled_event, cancelled) = storage
        .cancel_event(event.id, now())
        .await
        .unwrap()
        .unwrap();
    assert!(!cancelled_event.is_active);
    assert_eq!(cancelled, 2);
    assert_eq!(storage.count_occupied_seats(event.id).await.unwrap(), 0);
    assert!(
        storage
            .list_scoring_participations(student_id)
            .await
            .unwrap()
            .is_empty()
    );

    let stored = storage.get_event_by_id(event.id).await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert!(storage.cancel_event(9999, now()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_cancelled_event_stops_scoring_attendance() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "XH").await;
    let class_id = seed_class(&db, faculty_id, "K65F").await;
    let student_id = seed_student(&db, class_id, faculty_id, "XH001", false).await;
    let semester = seed_semester(&storage).await;
    let criteria = seed_criteria(&storage, 10.0, ScoringType::Auto).await;
    let event = seed_event(&storage, criteria.id, &semester, now() - Duration::days(2), None).await;

    let participation = storage
        .create_participation(event.id, student_id, now() - Duration::days(3))
        .await
        .unwrap();
    storage
        .mark_participation(
            participation.id,
            AttendanceMark {
                status: ParticipationStatus::Attended,
                score_received: None,
                at: now() - Duration::days(2),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(student_sheet_total(&storage, student_id, &semester).await, 3.0);

    let (cancelled_event, cancelled) = storage
        .cancel_event(event.id, now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cancelled, 1);

    let participation = storage
        .get_participation(event.id, student_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(participation.status, ParticipationStatus::Cancelled);
    assert_eq!(student_sheet_total(&storage, student_id, &semester).await, 0.0);

    // 已取消的活动不能再登记出勤
    assert_eq!(
        check_attendance_mark(&cancelled_event, ParticipationStatus::Attended, None, now()),
        Err(Violation::EventNotOpen)
    );
}

#[tokio::test]
async fn test_class_batch_queries_match_per_student() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "NN").await;
    let class_id = seed_class(&db, faculty_id, "K65G").await;
    let first = seed_student(&db, class_id, faculty_id, "NN001", false).await;
    let second = seed_student(&db, class_id, faculty_id, "NN002", false).await;
    let semester = seed_semester(&storage).await;
    let criteria = seed_criteria(&storage, 10.0, ScoringType::Manual).await;
    let event = seed_event(&storage, criteria.id, &semester, now() - Duration::days(1), None).await;

    for (student_id, score) in [(first, 4.0), (second, 7.0)] {
        storage
            .upsert_self_score(
                ManualScoreKey::new(student_id, criteria.id, &semester),
                score,
                vec![],
                now(),
            )
            .await
            .unwrap();
    }
    storage
        .create_participation(event.id, second, now() - Duration::days(2))
        .await
        .unwrap();

    let scores = storage
        .list_manual_scores_for_students(&[first, second], &semester)
        .await
        .unwrap();
    assert_eq!(scores.len(), 2);
    let own = storage.list_manual_scores(second, &semester).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].self_score, 7.0);

    let participations = storage
        .list_scoring_participations_for_students(&[first, second])
        .await
        .unwrap();
    assert_eq!(participations.len(), 1);
    assert_eq!(participations[0].participation.student_id, second);

    assert!(
        storage
            .list_manual_scores_for_students(&[], &semester)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        storage
            .list_scoring_participations_for_students(&[])
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_dashboard_counts_skip_cancelled_events() {
    let (storage, db) = setup().await;
    let faculty_id = seed_faculty(&db, "TK").await;
    let class_id = seed_class(&db, faculty_id, "K65H").await;
    let student_id = seed_student(&db, class_id, faculty_id, "TK001", false).await;
    seed_student(&db, class_id, faculty_id, "TK002", false).await;
    let semester = seed_semester(&storage).await;
    let criteria = seed_criteria(&storage, 10.0, ScoringType::Auto).await;

    let kept = seed_event(&storage, criteria.id, &semester, now() - Duration::days(1), None).await;
    let dropped = seed_event(&storage, criteria.id, &semester, now() - Duration::days(4), None).await;

    let participation = storage
        .create_participation(kept.id, student_id, now() - Duration::days(2))
        .await
        .unwrap();
    storage
        .mark_participation(
            participation.id,
            AttendanceMark {
                status: ParticipationStatus::Attended,
                score_received: None,
                at: now() - Duration::days(1),
            },
        )
        .await
        .unwrap();
    storage.cancel_event(dropped.id, now()).await.unwrap();

    assert_eq!(storage.count_active_students().await.unwrap(), 2);
    assert_eq!(storage.count_attended_participations().await.unwrap(), 1);
    let open: Vec<i64> = storage
        .list_open_events()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(open, vec![kept.id]);
}
