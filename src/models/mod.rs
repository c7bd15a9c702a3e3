pub mod actors;
pub mod assessments;
pub mod common;
pub mod criteria;
pub mod events;
pub mod scores;
pub mod semesters;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1999
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationFailed = 1006,

    // 组织结构 2000-2999
    StudentNotFound = 2001,
    ClassNotFound = 2002,
    FacultyNotFound = 2003,
    ClassPermissionDenied = 2004,
    FacultyPermissionDenied = 2005,

    // 学期 3000-3099
    SemesterNotFound = 3001,
    SemesterAlreadyExists = 3002,
    NoActiveSemester = 3003,

    // 评分标准 3100-3199
    CategoryNotFound = 3101,
    CriteriaNotFound = 3102,
    CriteriaAutoScored = 3103,

    // 测评 4000-4999
    GradingPeriodClosed = 4001,
    AssessmentLocked = 4002,
    ClassNotComplete = 4003,
    FacultyNotComplete = 4004,
    ScoreInvalid = 4005,

    // 活动 5000-5999
    EventNotFound = 5001,
    EventNotOpen = 5002,
    EventAlreadyStarted = 5003,
    EventScopeMismatch = 5004,
    EventAlreadyRegistered = 5005,
    EventNotRegistered = 5006,
    EventFull = 5007,
    AttendanceNotOpen = 5008,
    AttendancePasswordInvalid = 5009,
    EventAlreadyReviewed = 5010,
    EventDeleteForbidden = 5011,
    EventCreateForbidden = 5012,

    // 通知 6000-6999
    NotificationFailed = 6001,
}
