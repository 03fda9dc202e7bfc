//! Argument tokenizing and the per-command parsers.
//!
//! Prefixed commands (`register`, `create_course`) go through [`tokenize`] and an
//! [`ArgumentMultimap`]. Identifier-only commands match the fixed id patterns directly.

use crate::core::command::{self, Command};
use crate::domain::ids::{CourseId, StudentId};
use crate::domain::values::{Gender, Name, Phone};
use crate::utils::error::{EduError, Result};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(marker: &'static str) -> Self {
        Self(marker)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_GENDER: Prefix = Prefix::new("g/");

/// Values found for each prefix, in the order they appeared, plus the unprefixed preamble.
#[derive(Debug, Default)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`, if any.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when every prefix has at least one non-empty value.
    pub fn are_prefixes_present(&self, prefixes: &[Prefix]) -> bool {
        prefixes
            .iter()
            .all(|p| self.value(*p).is_some_and(|v| !v.is_empty()))
    }

    pub fn verify_no_duplicate_prefixes_for(&self, prefixes: &[Prefix]) -> Result<()> {
        let duplicated: Vec<&str> = prefixes
            .iter()
            .filter(|p| self.all_values(**p).len() > 1)
            .map(Prefix::as_str)
            .collect();

        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(EduError::DuplicatePrefix {
                prefixes: duplicated.join(" "),
            })
        }
    }
}

/// Splits `args` on the given prefixes. A prefix only counts at the start of `args` or right
/// after whitespace, so `n/` inside a value such as `a/n/a` is left alone.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for prefix in prefixes {
        for (index, _) in args.match_indices(prefix.as_str()) {
            let at_boundary = args[..index]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if at_boundary {
                positions.push((index, *prefix));
            }
        }
    }
    positions.sort_by_key(|(index, _)| *index);

    let mut multimap = ArgumentMultimap::default();
    let preamble_end = positions.first().map(|(index, _)| *index).unwrap_or(args.len());
    multimap.preamble = args[..preamble_end].trim().to_string();

    for (i, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(args.len());
        let value = args[value_start..value_end].trim().to_string();
        multimap.values.entry(*prefix).or_default().push(value);
    }

    multimap
}

fn invalid_format(usage: &str) -> EduError {
    EduError::InvalidCommandFormat {
        usage: usage.to_string(),
    }
}

/// Tokenizes `args`, requiring every prefix exactly once with a value and no preamble.
fn tokenize_required(args: &str, prefixes: &[Prefix], usage: &str) -> Result<ArgumentMultimap> {
    let multimap = tokenize(args, prefixes);
    if !multimap.are_prefixes_present(prefixes) || !multimap.preamble().is_empty() {
        return Err(invalid_format(usage));
    }
    multimap.verify_no_duplicate_prefixes_for(prefixes)?;
    Ok(multimap)
}

fn required_value(multimap: &ArgumentMultimap, prefix: Prefix, usage: &str) -> Result<String> {
    multimap
        .value(prefix)
        .map(str::to_string)
        .ok_or_else(|| invalid_format(usage))
}

pub fn parse_register(args: &str) -> Result<Command> {
    let prefixes = [PREFIX_NAME, PREFIX_PHONE, PREFIX_GENDER];
    let multimap = tokenize_required(args, &prefixes, command::REGISTER_USAGE)?;

    let name: Name = required_value(&multimap, PREFIX_NAME, command::REGISTER_USAGE)?.parse()?;
    let phone: Phone = required_value(&multimap, PREFIX_PHONE, command::REGISTER_USAGE)?.parse()?;
    let gender: Gender =
        required_value(&multimap, PREFIX_GENDER, command::REGISTER_USAGE)?.parse()?;

    Ok(Command::Register {
        name,
        phone,
        gender,
    })
}

pub fn parse_create_course(args: &str) -> Result<Command> {
    let multimap = tokenize_required(args, &[PREFIX_NAME], command::CREATE_COURSE_USAGE)?;
    let name: Name =
        required_value(&multimap, PREFIX_NAME, command::CREATE_COURSE_USAGE)?.parse()?;
    Ok(Command::CreateCourse { name })
}

pub fn parse_deregister(args: &str) -> Result<Command> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(invalid_format(command::DEREGISTER_USAGE));
    }
    Ok(Command::Deregister {
        student_id: trimmed.parse()?,
    })
}

pub fn parse_delete_course(args: &str) -> Result<Command> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(invalid_format(command::DELETE_COURSE_USAGE));
    }
    Ok(Command::DeleteCourse {
        course_id: trimmed.parse()?,
    })
}

/// Parses `STUDENT_ID COURSE_ID`.
fn parse_student_course_pair(args: &str, usage: &str) -> Result<(StudentId, CourseId)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.as_slice() {
        [student, course] => Ok((student.parse()?, course.parse()?)),
        _ => Err(invalid_format(usage)),
    }
}

pub fn parse_add_student(args: &str) -> Result<Command> {
    let (student_id, course_id) = parse_student_course_pair(args, command::ADD_STUDENT_USAGE)?;
    Ok(Command::AddStudentToCourse {
        student_id,
        course_id,
    })
}

pub fn parse_remove_student(args: &str) -> Result<Command> {
    let (student_id, course_id) =
        parse_student_course_pair(args, command::REMOVE_STUDENT_USAGE)?;
    Ok(Command::RemoveStudentFromCourse {
        student_id,
        course_id,
    })
}

pub fn parse_view_courses(args: &str) -> Result<Command> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Ok(Command::ViewCourses { student_id: None });
    }
    Ok(Command::ViewCourses {
        student_id: Some(trimmed.parse()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_preamble_and_values() {
        let multimap = tokenize(
            " some preamble n/John Doe p/ 99887766 g/Male",
            &[PREFIX_NAME, PREFIX_PHONE, PREFIX_GENDER],
        );
        assert_eq!(multimap.preamble(), "some preamble");
        assert_eq!(multimap.value(PREFIX_NAME), Some("John Doe"));
        assert_eq!(multimap.value(PREFIX_PHONE), Some("99887766"));
        assert_eq!(multimap.value(PREFIX_GENDER), Some("Male"));
    }

    #[test]
    fn test_tokenize_ignores_prefix_inside_value() {
        let multimap = tokenize("n/Ann/Marie p/123", &[PREFIX_NAME, PREFIX_PHONE]);
        assert_eq!(multimap.value(PREFIX_NAME), Some("Ann/Marie"));
        assert_eq!(multimap.all_values(PREFIX_NAME).len(), 1);
    }

    #[test]
    fn test_tokenize_collects_repeated_prefixes() {
        let multimap = tokenize(" n/Amy n/Bob", &[PREFIX_NAME]);
        assert_eq!(multimap.all_values(PREFIX_NAME), ["Amy", "Bob"]);
        assert_eq!(multimap.value(PREFIX_NAME), Some("Bob"));

        let err = multimap
            .verify_no_duplicate_prefixes_for(&[PREFIX_NAME])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Multiple values specified for the following single-valued field(s): n/"
        );
    }

    #[test]
    fn test_parse_register_success() {
        let command = parse_register(" n/John Doe p/99887766 g/male").unwrap();
        assert_eq!(
            command,
            Command::Register {
                name: "John Doe".parse().unwrap(),
                phone: "99887766".parse().unwrap(),
                gender: Gender::Male,
            }
        );
    }

    #[test]
    fn test_parse_register_format_errors() {
        // missing prefix
        assert!(matches!(
            parse_register(" n/John Doe p/99887766"),
            Err(EduError::InvalidCommandFormat { .. })
        ));
        // empty value
        assert!(matches!(
            parse_register(" n/ p/99887766 g/Male"),
            Err(EduError::InvalidCommandFormat { .. })
        ));
        // non-empty preamble
        assert!(matches!(
            parse_register(" hello n/John p/99887766 g/Male"),
            Err(EduError::InvalidCommandFormat { .. })
        ));
        // duplicate prefix
        assert!(matches!(
            parse_register(" n/John p/123 p/456 g/Male"),
            Err(EduError::DuplicatePrefix { .. })
        ));
    }

    #[test]
    fn test_parse_register_value_errors() {
        let err = parse_register(" n/John p/12 g/Male").unwrap_err();
        assert_eq!(err.to_string(), Phone::MESSAGE_CONSTRAINTS);

        let err = parse_register(" n/John p/123 g/robot").unwrap_err();
        assert_eq!(err.to_string(), Gender::MESSAGE_CONSTRAINTS);

        let err = parse_register(" n/J*hn p/123 g/Male").unwrap_err();
        assert_eq!(err.to_string(), Name::MESSAGE_CONSTRAINTS);
    }

    #[test]
    fn test_parse_deregister() {
        assert_eq!(
            parse_deregister(" S00001").unwrap(),
            Command::Deregister {
                student_id: StudentId::new(1)
            }
        );
        assert!(matches!(
            parse_deregister("   "),
            Err(EduError::InvalidCommandFormat { .. })
        ));
        let err = parse_deregister(" 12345").unwrap_err();
        assert_eq!(err.to_string(), "Error: Invalid student ID.");
    }

    #[test]
    fn test_parse_student_course_pair() {
        assert_eq!(
            parse_remove_student(" S00001 C0001").unwrap(),
            Command::RemoveStudentFromCourse {
                student_id: StudentId::new(1),
                course_id: CourseId::new(1),
            }
        );
        assert_eq!(
            parse_add_student("S00002   C0003 ").unwrap(),
            Command::AddStudentToCourse {
                student_id: StudentId::new(2),
                course_id: CourseId::new(3),
            }
        );
        assert!(matches!(
            parse_remove_student(" S00001"),
            Err(EduError::InvalidCommandFormat { .. })
        ));
        assert!(matches!(
            parse_remove_student(" C0001 S00001"),
            Err(EduError::InvalidStudentId { .. })
        ));
        assert!(matches!(
            parse_remove_student(" S00001 C001"),
            Err(EduError::InvalidCourseId { .. })
        ));
    }

    #[test]
    fn test_parse_view_courses() {
        assert_eq!(
            parse_view_courses("").unwrap(),
            Command::ViewCourses { student_id: None }
        );
        assert_eq!(
            parse_view_courses("   ").unwrap(),
            Command::ViewCourses { student_id: None }
        );
        assert_eq!(
            parse_view_courses("  S00001  ").unwrap(),
            Command::ViewCourses {
                student_id: Some(StudentId::new(1))
            }
        );
        assert!(parse_view_courses(" S1").is_err());
    }

    #[test]
    fn test_parse_course_commands() {
        assert_eq!(
            parse_create_course(" n/Mathematics").unwrap(),
            Command::CreateCourse {
                name: "Mathematics".parse().unwrap()
            }
        );
        assert!(matches!(
            parse_create_course(" Mathematics"),
            Err(EduError::InvalidCommandFormat { .. })
        ));
        assert_eq!(
            parse_delete_course(" C0002").unwrap(),
            Command::DeleteCourse {
                course_id: CourseId::new(2)
            }
        );
    }
}
