//! 路径参数提取器
//!
//! 只接受正整数 ID，解析失败时直接返回统一格式的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|id| *id > 0)
}

macro_rules! define_safe_id_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(match parse_positive_id(req.match_info().get($param)) {
                    Some(id) => Ok($name(id)),
                    None => Err(InternalError::from_response(
                        concat!("invalid path parameter: ", $param),
                        HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            concat!("路径参数无效: ", $param),
                        )),
                    )
                    .into()),
                })
            }
        }
    };
}

define_safe_id_extractor!(
    /// `{id}`
    SafeIDI64,
    "id"
);
define_safe_id_extractor!(SafeClassIdI64, "class_id");
define_safe_id_extractor!(SafeFacultyIdI64, "faculty_id");
define_safe_id_extractor!(SafeStudentIdI64, "student_id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("42")), Some(42));
        assert_eq!(parse_positive_id(Some("0")), None);
        assert_eq!(parse_positive_id(Some("-3")), None);
        assert_eq!(parse_positive_id(Some("abc")), None);
        assert_eq!(parse_positive_id(None), None);
    }
}
