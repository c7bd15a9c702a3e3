//! 字符串枚举定义宏
//!
//! 数据库与 API 中的枚举值统一以 snake_case 字符串存储，
//! 该宏为每个枚举生成字符串常量、Display、FromStr 以及 serde 实现。

macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $label:literal => $ts_path:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ts_rs::TS)]
        #[ts(export, export_to = $ts_path)]
        $vis enum $name {
            $(
                #[ts(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "无效的{}: '{}'. 支持: {}",
                        $label,
                        s,
                        [$($value),+].join(", ")
                    )),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use define_string_enum;

#[cfg(test)]
mod tests {
    define_string_enum! {
        enum Light: "信号灯" => "../frontend/src/types/generated/test_light.ts" {
            Red => "red",
            AmberFlash => "amber_flash",
        }
    }

    #[test]
    fn test_round_trip_through_str() {
        assert_eq!(Light::AmberFlash.to_string(), "amber_flash");
        assert_eq!("red".parse::<Light>(), Ok(Light::Red));
        assert_eq!(Light::ALL.len(), 2);
    }

    #[test]
    fn test_invalid_value_lists_supported() {
        let err = "green".parse::<Light>().unwrap_err();
        assert!(err.contains("信号灯"));
        assert!(err.contains("red, amber_flash"));
    }

    #[test]
    fn test_serde_uses_snake_case_value() {
        let json = serde_json::to_string(&Light::AmberFlash).unwrap();
        assert_eq!(json, "\"amber_flash\"");
        let parsed: Light = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, Light::Red);
        assert!(serde_json::from_str::<Light>("\"blue\"").is_err());
    }
}
