use rand::Rng;

/// 6 位数字签到口令
pub fn generate_attendance_password() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_six_digits() {
        for _ in 0..50 {
            let code = generate_attendance_password();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }
}
