use crate::domain::ids::{CourseId, StudentId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EduError {
    #[error("Unknown command")]
    UnknownCommand { word: String },

    #[error("Invalid command format! \n{usage}")]
    InvalidCommandFormat { usage: String },

    #[error("Multiple values specified for the following single-valued field(s): {prefixes}")]
    DuplicatePrefix { prefixes: String },

    #[error("Error: Invalid student ID.")]
    InvalidStudentId { value: String },

    #[error("Error: Invalid course ID.")]
    InvalidCourseId { value: String },

    #[error("{message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Error: Student with student ID {0} does not exist.")]
    StudentNotFound(StudentId),

    #[error("Student with student ID {0} not in addressbook.")]
    StudentNotRegistered(StudentId),

    #[error("Course with course ID {0} not found.")]
    CourseNotFound(CourseId),

    #[error("Student with student ID {student} not in course.")]
    StudentNotInCourse { student: StudentId, course: CourseId },

    #[error("Student with student ID {student} already in course.")]
    StudentAlreadyInCourse { student: StudentId, course: CourseId },

    #[error("Operation would result in duplicate {entity}: {key}")]
    DuplicateEntity { entity: &'static str, key: String },

    #[error("No such {entity} in the store: {key}")]
    MissingEntity { entity: &'static str, key: String },

    #[error("No more {entity} identifiers available (capacity {capacity})")]
    IdentifiersExhausted { entity: &'static str, capacity: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data file {path} could not be loaded: {message}")]
    DataLoadingError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Execution,
    Storage,
    Config,
}

impl EduError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EduError::UnknownCommand { .. }
            | EduError::InvalidCommandFormat { .. }
            | EduError::DuplicatePrefix { .. }
            | EduError::InvalidStudentId { .. }
            | EduError::InvalidCourseId { .. }
            | EduError::InvalidValue { .. } => ErrorCategory::Parse,
            EduError::StudentNotFound(_)
            | EduError::StudentNotRegistered(_)
            | EduError::CourseNotFound(_)
            | EduError::StudentNotInCourse { .. }
            | EduError::StudentAlreadyInCourse { .. }
            | EduError::DuplicateEntity { .. }
            | EduError::MissingEntity { .. }
            | EduError::IdentifiersExhausted { .. } => ErrorCategory::Execution,
            EduError::IoError(_)
            | EduError::SerializationError(_)
            | EduError::DataLoadingError { .. } => ErrorCategory::Storage,
            EduError::ConfigError { .. } | EduError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    /// Storage and config failures end the session; everything else is reported and the REPL carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Storage | ErrorCategory::Config
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EduError::IoError(e) => format!("Could not access the data files: {}", e),
            EduError::SerializationError(e) => format!("Could not encode or decode data: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Parse => "Type 'help' to see the accepted command formats",
            ErrorCategory::Execution => "Check the identifiers with 'list' or 'view_courses'",
            ErrorCategory::Storage => match self {
                EduError::DataLoadingError { .. } => {
                    "Fix or move away the corrupt data file; eduBase starts empty when it is absent"
                }
                _ => "Check that the data directory exists and is writable",
            },
            ErrorCategory::Config => "Check the command line flags and the TOML configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, EduError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_feedback_format() {
        let err = EduError::StudentNotFound(StudentId::new(1));
        assert_eq!(
            err.to_string(),
            "Error: Student with student ID S00001 does not exist."
        );

        let err = EduError::CourseNotFound(CourseId::new(12));
        assert_eq!(err.to_string(), "Course with course ID C0012 not found.");

        let err = EduError::InvalidCommandFormat {
            usage: "deregister: usage".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid command format! \nderegister: usage");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            EduError::InvalidStudentId {
                value: "X".to_string()
            }
            .category(),
            ErrorCategory::Parse
        );
        assert_eq!(
            EduError::StudentNotRegistered(StudentId::new(3)).category(),
            ErrorCategory::Execution
        );

        let corrupt = EduError::DataLoadingError {
            path: "students.json".to_string(),
            message: "bad".to_string(),
        };
        assert_eq!(corrupt.category(), ErrorCategory::Storage);
        assert!(corrupt.is_fatal());
        assert!(!EduError::CourseNotFound(CourseId::new(1)).is_fatal());
    }
}
