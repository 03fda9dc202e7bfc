use crate::utils::error::{EduError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> EduError {
    EduError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

/// A data file name is joined onto the data directory, so it must be a bare file name.
pub fn validate_file_name(field_name: &str, file_name: &str) -> Result<()> {
    validate_non_empty_string(field_name, file_name)?;
    validate_path(field_name, file_name)?;

    if file_name.contains('/') || file_name.contains('\\') {
        return Err(invalid(
            field_name,
            file_name,
            "File name cannot contain path separators; use data_dir for the directory",
        ));
    }

    if !file_name.ends_with(".json") {
        return Err(invalid(field_name, file_name, "File name must end with .json"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        return Ok(());
    }
    Err(invalid(
        field_name,
        value,
        format!("Allowed values: {}", allowed.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_dir", "./data").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_path("data_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("students_file", "students.json").is_ok());
        assert!(validate_file_name("students_file", "   ").is_err());
        assert!(validate_file_name("students_file", "nested/students.json").is_err());
        assert!(validate_file_name("students_file", "students.txt").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("log_format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("log_format", "JSON", &["compact", "json"]).is_ok());

        let err = validate_one_of("log_format", "xml", &["compact", "json"]).unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }
}
