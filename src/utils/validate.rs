use once_cell::sync::Lazy;
use regex::Regex;

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid academic year regex"));

/// 学年格式 YYYY-YYYY，且后一年等于前一年加一
pub fn validate_academic_year(year: &str) -> Result<(), &'static str> {
    let caps = ACADEMIC_YEAR_RE
        .captures(year)
        .ok_or("学年格式应为 YYYY-YYYY")?;
    let start: i32 = caps[1].parse().map_err(|_| "学年格式应为 YYYY-YYYY")?;
    let end: i32 = caps[2].parse().map_err(|_| "学年格式应为 YYYY-YYYY")?;
    if end != start + 1 {
        return Err("学年的两个年份必须相邻");
    }
    Ok(())
}

/// 学期序号：1、2 或 3（夏季）
pub fn validate_semester_number(number: i32) -> Result<(), &'static str> {
    if (1..=3).contains(&number) {
        Ok(())
    } else {
        Err("学期序号必须为 1、2 或 3")
    }
}

/// 分数必须是非负有限数
pub fn validate_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() {
        return Err("分数必须是有效数字");
    }
    if score < 0.0 {
        return Err("分数不能为负数");
    }
    Ok(())
}

pub fn validate_required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_academic_year() {
        assert!(validate_academic_year("2023-2024").is_ok());
        assert!(validate_academic_year("2023-2025").is_err());
        assert!(validate_academic_year("2023/2024").is_err());
        assert!(validate_academic_year("23-24").is_err());
    }

    #[test]
    fn test_semester_number() {
        assert!(validate_semester_number(1).is_ok());
        assert!(validate_semester_number(3).is_ok());
        assert!(validate_semester_number(0).is_err());
        assert!(validate_semester_number(4).is_err());
    }

    #[test]
    fn test_score() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(7.5).is_ok());
        assert!(validate_score(-1.0).is_err());
        assert!(validate_score(f64::NAN).is_err());
        assert!(validate_score(f64::INFINITY).is_err());
    }

    #[test]
    fn test_required() {
        assert!(validate_required("  ", "必填").is_err());
        assert!(validate_required("x", "必填").is_ok());
    }
}
