//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_drlsystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DRLSystemError {
            $($variant(String),)*
        }

        impl DRLSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(DRLSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DRLSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(DRLSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl DRLSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DRLSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_drlsystem_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    PolicyViolation("E008", "Policy Violation"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Notification("E013", "Notification Error"),
}

impl DRLSystemError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于调用方可修正的错误（校验失败、资源不存在、流程约束）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DRLSystemError::Validation(_)
                | DRLSystemError::NotFound(_)
                | DRLSystemError::PolicyViolation(_)
                | DRLSystemError::Authentication(_)
                | DRLSystemError::Authorization(_)
        )
    }
}

impl fmt::Display for DRLSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DRLSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for DRLSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        DRLSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for DRLSystemError {
    fn from(err: std::io::Error) -> Self {
        DRLSystemError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for DRLSystemError {
    fn from(err: serde_json::Error) -> Self {
        DRLSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DRLSystemError {
    fn from(err: chrono::ParseError) -> Self {
        DRLSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DRLSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DRLSystemError::cache_connection("test").code(), "E001");
        assert_eq!(DRLSystemError::database_config("test").code(), "E003");
        assert_eq!(DRLSystemError::validation("test").code(), "E006");
        assert_eq!(DRLSystemError::policy_violation("test").code(), "E008");
        assert_eq!(DRLSystemError::authentication("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            DRLSystemError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            DRLSystemError::policy_violation("test").error_type(),
            "Policy Violation"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DRLSystemError::validation("x").is_client_error());
        assert!(DRLSystemError::policy_violation("x").is_client_error());
        assert!(!DRLSystemError::database_operation("x").is_client_error());
        assert!(!DRLSystemError::notification("x").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = DRLSystemError::policy_violation("班级尚未全部完成评分");
        let formatted = err.format_simple();
        assert!(formatted.contains("Policy Violation"));
        assert!(formatted.contains("班级尚未全部完成评分"));
    }
}
