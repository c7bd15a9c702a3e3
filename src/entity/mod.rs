//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间戳统一以 Unix 微秒存储。

pub mod prelude;

pub mod admins;
pub mod categories;
pub mod classes;
pub mod criteria;
pub mod event_participations;
pub mod events;
pub mod faculties;
pub mod manual_scores;
pub mod semesters;
pub mod student_assessments;
pub mod students;

use chrono::{DateTime, Utc};

/// 微秒时间戳转为 UTC 时间
pub fn from_micros(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(ts).unwrap_or_default()
}

pub fn to_micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_micros_keep_sub_second_precision() {
        let at = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap() + Duration::microseconds(1);
        assert_eq!(from_micros(to_micros(at)), at);
    }
}
