/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => None,
        _ => Some("Email must be a valid address".to_string()),
    }
}

/// Phone numbers: digits with optional leading '+' and spaces or dashes, 6-20 digits.
pub fn validate_phone(phone: &str) -> Option<String> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return Some("Phone number is required".to_string());
    }
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return Some("Phone number may only contain digits, spaces and dashes".to_string());
    }
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if !(6..=20).contains(&digits) {
        return Some("Phone number must have between 6 and 20 digits".to_string());
    }
    None
}

/// Employee identifier: letters, digits, dots and dashes, max 40 chars.
pub fn validate_identifier(value: &str) -> Option<String> {
    if let Some(err) = validate_required(value, "Employee ID", 40) {
        return Some(err);
    }
    if !value.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
        return Some("Employee ID may only contain letters, digits, dots and dashes".to_string());
    }
    None
}

/// Optional positive whole number. Returns the parsed value on success.
pub fn parse_optional_positive(value: &str, field_name: &str) -> Result<Option<i32>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(format!("{field_name} must be a positive whole number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_and_optional() {
        assert!(validate_required("  ", "Title", 10).is_some());
        assert!(validate_required("Budget", "Title", 10).is_none());
        assert!(validate_required("Budget review", "Title", 10).is_some());
        assert!(validate_optional("", "Notes", 3).is_none());
        assert!(validate_optional("abcd", "Notes", 3).is_some());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("dewi@example.go.id").is_none());
        assert!(validate_email("").is_some());
        assert!(validate_email("dewi.example.com").is_some());
        assert!(validate_email("@example.com").is_some());
        assert!(validate_email("dewi@localhost").is_some());
    }

    #[test]
    fn phone_numbers() {
        assert!(validate_phone("081234567890").is_none());
        assert!(validate_phone("+62 812-3456-7890").is_none());
        assert!(validate_phone("12345").is_some());
        assert!(validate_phone("0812abc").is_some());
    }

    #[test]
    fn identifiers() {
        assert!(validate_identifier("198501012010011001").is_none());
        assert!(validate_identifier("EMP-042").is_none());
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("id with space").is_some());
    }

    #[test]
    fn positive_numbers() {
        assert_eq!(parse_optional_positive("", "Capacity"), Ok(None));
        assert_eq!(parse_optional_positive(" 25 ", "Capacity"), Ok(Some(25)));
        assert!(parse_optional_positive("0", "Capacity").is_err());
        assert!(parse_optional_positive("-3", "Capacity").is_err());
        assert!(parse_optional_positive("ten", "Capacity").is_err());
    }
}
