use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static ROLL_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/-]+$").expect("Invalid roll number regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_roll_no(roll_no: &str) -> Result<(), &'static str> {
    if roll_no.is_empty() || roll_no.len() > 32 {
        return Err("Roll number length must be between 1 and 32 characters");
    }
    if !ROLL_NO_RE.is_match(roll_no) {
        return Err("Roll number must contain only letters, numbers, slashes or hyphens");
    }
    Ok(())
}

/// 校验档案字段（姓名、课程、年级）
///
/// 未完善档案的账号以 "None" 占位，该值不允许由客户端显式提交。
pub fn validate_profile_field(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Profile field must not be empty");
    }
    if trimmed.eq_ignore_ascii_case("none") {
        return Err("Profile field must not be the placeholder value");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_weak_password() {
        assert!(!validate_password("Password1").is_valid);
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("student@college.edu").is_ok());
        assert!(validate_email("a.b+c@dept.example.org").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_roll_no() {
        assert!(validate_roll_no("CS2021/042").is_ok());
        assert!(validate_roll_no("18BCE-1024").is_ok());
        assert!(validate_roll_no("").is_err());
        assert!(validate_roll_no("roll no with spaces").is_err());
    }

    #[test]
    fn test_profile_field_placeholder() {
        assert!(validate_profile_field("B.Tech CSE").is_ok());
        assert!(validate_profile_field("None").is_err());
        assert!(validate_profile_field("none").is_err());
        assert!(validate_profile_field("   ").is_err());
    }
}
