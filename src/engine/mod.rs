//! 评分核心规则
//!
//! 这里的函数都是纯函数：所有输入（包括当前时间）由调用方显式传入，
//! 不访问数据库，也不读取系统时钟。

pub mod completion;
pub mod participation;
pub mod resolvers;
pub mod score_sheet;
pub mod statistics;
pub mod structure;
pub mod time_window;
pub mod workflow;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt;

use crate::models::ErrorCode;

/// 业务规则被违反
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    GradingPeriodClosed,
    AutoScoredCriteria,
    NegativeScore,
    AssessmentLocked,
    ClassIncomplete { students: u64, reviewed: u64 },
    FacultyIncomplete { students: u64, reviewed: u64 },
    ClassPermissionDenied,
    FacultyPermissionDenied,
    EventCreateForbidden(&'static str),
    EventNotOpen,
    EventAlreadyStarted,
    EventScopeMismatch,
    EventAlreadyRegistered,
    EventNotRegistered,
    EventFull,
    AttendanceNotOpen,
    AttendancePasswordInvalid,
    EventAlreadyReviewed,
    EventDeleteForbidden,
    NotEventOwner,
    InvalidAttendanceStatus,
}

impl Violation {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Violation::GradingPeriodClosed => ErrorCode::GradingPeriodClosed,
            Violation::AutoScoredCriteria => ErrorCode::CriteriaAutoScored,
            Violation::NegativeScore => ErrorCode::ScoreInvalid,
            Violation::AssessmentLocked => ErrorCode::AssessmentLocked,
            Violation::ClassIncomplete { .. } => ErrorCode::ClassNotComplete,
            Violation::FacultyIncomplete { .. } => ErrorCode::FacultyNotComplete,
            Violation::ClassPermissionDenied => ErrorCode::ClassPermissionDenied,
            Violation::FacultyPermissionDenied => ErrorCode::FacultyPermissionDenied,
            Violation::EventCreateForbidden(_) => ErrorCode::EventCreateForbidden,
            Violation::EventNotOpen => ErrorCode::EventNotOpen,
            Violation::EventAlreadyStarted => ErrorCode::EventAlreadyStarted,
            Violation::EventScopeMismatch => ErrorCode::EventScopeMismatch,
            Violation::EventAlreadyRegistered => ErrorCode::EventAlreadyRegistered,
            Violation::EventNotRegistered => ErrorCode::EventNotRegistered,
            Violation::EventFull => ErrorCode::EventFull,
            Violation::AttendanceNotOpen => ErrorCode::AttendanceNotOpen,
            Violation::AttendancePasswordInvalid => ErrorCode::AttendancePasswordInvalid,
            Violation::EventAlreadyReviewed => ErrorCode::EventAlreadyReviewed,
            Violation::EventDeleteForbidden => ErrorCode::EventDeleteForbidden,
            Violation::NotEventOwner => ErrorCode::Forbidden,
            Violation::InvalidAttendanceStatus => ErrorCode::ValidationFailed,
        }
    }

    /// 是否应以 403 响应
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Violation::ClassPermissionDenied
                | Violation::FacultyPermissionDenied
                | Violation::EventCreateForbidden(_)
                | Violation::EventScopeMismatch
                | Violation::NotEventOwner
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::GradingPeriodClosed => write!(f, "不在自评时间内"),
            Violation::AutoScoredCriteria => write!(f, "该评分标准由活动自动计分，不能自评"),
            Violation::NegativeScore => write!(f, "分数不能为负数"),
            Violation::AssessmentLocked => write!(f, "测评已进入学院审核，不能再修改"),
            Violation::ClassIncomplete { students, reviewed } => {
                write!(f, "班级尚未全部完成评分: {reviewed}/{students}")
            }
            Violation::FacultyIncomplete { students, reviewed } => {
                write!(f, "学院尚未全部完成审核: {reviewed}/{students}")
            }
            Violation::ClassPermissionDenied => write!(f, "无权管理该班级"),
            Violation::FacultyPermissionDenied => write!(f, "无权管理该学院"),
            Violation::EventCreateForbidden(reason) => write!(f, "无权创建活动: {reason}"),
            Violation::EventNotOpen => write!(f, "活动未开放"),
            Violation::EventAlreadyStarted => write!(f, "活动已开始"),
            Violation::EventScopeMismatch => write!(f, "不在活动范围内"),
            Violation::EventAlreadyRegistered => write!(f, "已报名该活动"),
            Violation::EventNotRegistered => write!(f, "未报名该活动"),
            Violation::EventFull => write!(f, "活动报名人数已满"),
            Violation::AttendanceNotOpen => write!(f, "活动尚未开始，不能签到"),
            Violation::AttendancePasswordInvalid => write!(f, "签到口令错误"),
            Violation::EventAlreadyReviewed => write!(f, "活动已审批"),
            Violation::EventDeleteForbidden => write!(f, "已审批且未举行的活动不能删除，请先取消活动"),
            Violation::NotEventOwner => write!(f, "只有活动创建者或管理员可以操作该活动"),
            Violation::InvalidAttendanceStatus => write!(f, "考勤状态只能是 attended 或 absent"),
        }
    }
}

impl std::error::Error for Violation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_classification() {
        assert!(Violation::EventScopeMismatch.is_forbidden());
        assert!(Violation::ClassPermissionDenied.is_forbidden());
        assert!(!Violation::GradingPeriodClosed.is_forbidden());
        assert!(
            !Violation::ClassIncomplete {
                students: 10,
                reviewed: 9
            }
            .is_forbidden()
        );
    }

    #[test]
    fn test_incomplete_message_carries_counts() {
        let v = Violation::ClassIncomplete {
            students: 10,
            reviewed: 9,
        };
        assert_eq!(v.error_code(), ErrorCode::ClassNotComplete);
        assert!(v.to_string().contains("9/10"));
    }
}
