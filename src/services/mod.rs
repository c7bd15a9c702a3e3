/// 解包 `Result<T, HttpResponse>`，错误时直接作为处理函数的响应返回
macro_rules! try_respond {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}

pub(crate) mod common;

pub mod assessments;
pub mod criteria;
pub mod events;
pub mod semesters;

pub use assessments::AssessmentService;
pub use criteria::CriteriaService;
pub use events::EventService;
pub use semesters::SemesterService;
