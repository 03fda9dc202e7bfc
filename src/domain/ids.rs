use crate::utils::error::{EduError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static STUDENT_ID_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S[0-9]{5}$").expect("student id pattern is valid"));
static COURSE_ID_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^C[0-9]{4}$").expect("course id pattern is valid"));

/// Identifier of a student, printed as `S` followed by five zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(u32);

impl StudentId {
    /// Largest value the `S#####` display format can hold.
    pub const MAX: u32 = 99_999;

    /// Builds an id from an explicit value. Does not touch any generator.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:05}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !STUDENT_ID_FORMAT.is_match(trimmed) {
            return Err(EduError::InvalidStudentId {
                value: trimmed.to_string(),
            });
        }
        trimmed[1..]
            .parse::<u32>()
            .map(StudentId)
            .map_err(|_| EduError::InvalidStudentId {
                value: trimmed.to_string(),
            })
    }
}

/// Identifier of a course, printed as `C` followed by four zero-padded digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseId(u32);

impl CourseId {
    pub const MAX: u32 = 9_999;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{:04}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = EduError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !COURSE_ID_FORMAT.is_match(trimmed) {
            return Err(EduError::InvalidCourseId {
                value: trimmed.to_string(),
            });
        }
        trimmed[1..]
            .parse::<u32>()
            .map(CourseId)
            .map_err(|_| EduError::InvalidCourseId {
                value: trimmed.to_string(),
            })
    }
}

/// Monotonic counter handing out fresh identifier values.
///
/// Every successful `next_value` is strictly greater than every value handed out before it.
/// Values past `capacity` are refused rather than wrapped, so the display format never collides.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    entity: &'static str,
    next: u32,
    capacity: u32,
}

impl IdGenerator {
    pub fn new(entity: &'static str, capacity: u32) -> Self {
        Self {
            entity,
            next: 1,
            capacity,
        }
    }

    pub fn for_students() -> Self {
        Self::new("student", StudentId::MAX)
    }

    pub fn for_courses() -> Self {
        Self::new("course", CourseId::MAX)
    }

    /// The value the next call to `next_value` would return.
    pub fn peek(&self) -> u32 {
        self.next
    }

    pub fn next_value(&mut self) -> Result<u32> {
        if self.next > self.capacity {
            return Err(EduError::IdentifiersExhausted {
                entity: self.entity,
                capacity: self.capacity,
            });
        }
        let value = self.next;
        self.next += 1;
        Ok(value)
    }

    /// Moves the counter past `highest_used` so loaded identifiers are never handed out again.
    /// Never moves the counter backwards.
    pub fn reconcile(&mut self, highest_used: u32) {
        let candidate = highest_used.saturating_add(1);
        if candidate > self.next {
            tracing::debug!(
                "Reconciling {} id counter from {} to {}",
                self.entity,
                self.next,
                candidate
            );
            self.next = candidate;
        }
    }
}
