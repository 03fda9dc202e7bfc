use crate::domain::ids::{CourseId, StudentId};
use crate::domain::model::{Contact, Course, Person, Student};
use crate::domain::values::Tag;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{EduError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonAdaptedPerson {
    Student {
        student_id: String,
        name: String,
        phone: String,
        gender: String,
    },
    Contact {
        name: String,
        phone: String,
        email: String,
        address: String,
        #[serde(default)]
        tags: Vec<String>,
    },
}

impl From<&Person> for JsonAdaptedPerson {
    fn from(person: &Person) -> Self {
        match person {
            Person::Student(s) => JsonAdaptedPerson::Student {
                student_id: s.student_id.to_string(),
                name: s.name.to_string(),
                phone: s.phone.to_string(),
                gender: s.gender.to_string(),
            },
            Person::Contact(c) => JsonAdaptedPerson::Contact {
                name: c.name.to_string(),
                phone: c.phone.to_string(),
                email: c.email.to_string(),
                address: c.address.to_string(),
                tags: c.tags.iter().map(|t| t.to_string()).collect(),
            },
        }
    }
}

impl JsonAdaptedPerson {
    fn to_model(&self) -> Result<Person> {
        match self {
            JsonAdaptedPerson::Student {
                student_id,
                name,
                phone,
                gender,
            } => Ok(Person::Student(Student::new(
                student_id.parse()?,
                name.parse()?,
                phone.parse()?,
                gender.parse()?,
            ))),
            JsonAdaptedPerson::Contact {
                name,
                phone,
                email,
                address,
                tags,
            } => Ok(Person::Contact(Contact {
                name: name.parse()?,
                phone: phone.parse()?,
                email: email.parse()?,
                address: address.parse()?,
                tags: tags
                    .iter()
                    .map(|t| t.parse::<Tag>())
                    .collect::<Result<_>>()?,
            })),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonAdaptedCourse {
    course_id: String,
    name: String,
    #[serde(default)]
    students: Vec<String>,
}

impl From<&Course> for JsonAdaptedCourse {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id.to_string(),
            name: course.name.to_string(),
            students: course.student_ids().map(|id| id.to_string()).collect(),
        }
    }
}

impl JsonAdaptedCourse {
    fn to_model(&self) -> Result<Course> {
        let course_id: CourseId = self.course_id.parse()?;
        let students = self
            .students
            .iter()
            .map(|s| s.parse::<StudentId>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Course::with_students(course_id, self.name.parse()?, students))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StudentsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
    persons: Vec<JsonAdaptedPerson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CoursesFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
    courses: Vec<JsonAdaptedCourse>,
}

/// Stores students and courses as two JSON documents on the local file system.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    students_path: PathBuf,
    courses_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(students_path: impl Into<PathBuf>, courses_path: impl Into<PathBuf>) -> Self {
        Self {
            students_path: students_path.into(),
            courses_path: courses_path.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.students_path(), config.courses_path())
    }

    pub fn students_path(&self) -> &Path {
        &self.students_path
    }

    pub fn courses_path(&self) -> &Path {
        &self.courses_path
    }

    /// Reads a file, mapping "not found" to `None`.
    async fn read_optional(path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EduError::IoError(e)),
        }
    }

    async fn write(path: &Path, content: String) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

fn corrupt(path: &Path, message: impl std::fmt::Display) -> EduError {
    EduError::DataLoadingError {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load_students(&self) -> Result<Option<Vec<Person>>> {
        let path = &self.students_path;
        let Some(content) = Self::read_optional(path).await? else {
            return Ok(None);
        };

        let file: StudentsFile =
            serde_json::from_str(&content).map_err(|e| corrupt(path, e))?;
        let persons = file
            .persons
            .iter()
            .map(JsonAdaptedPerson::to_model)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| corrupt(path, e))?;

        tracing::debug!("Read {} persons from {}", persons.len(), path.display());
        Ok(Some(persons))
    }

    async fn load_courses(&self, students: &[Person]) -> Result<Option<Vec<Course>>> {
        let path = &self.courses_path;
        let Some(content) = Self::read_optional(path).await? else {
            return Ok(None);
        };

        let file: CoursesFile = serde_json::from_str(&content).map_err(|e| corrupt(path, e))?;
        let courses = file
            .courses
            .iter()
            .map(JsonAdaptedCourse::to_model)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| corrupt(path, e))?;

        let known: HashSet<StudentId> = students.iter().filter_map(Person::student_id).collect();
        for course in &courses {
            for student_id in course.student_ids().filter(|id| !known.contains(id)) {
                tracing::warn!(
                    "Course {} lists student {} who is not registered",
                    course.course_id,
                    student_id
                );
            }
        }

        tracing::debug!("Read {} courses from {}", courses.len(), path.display());
        Ok(Some(courses))
    }

    async fn save_students(&self, students: &[Person]) -> Result<()> {
        let file = StudentsFile {
            saved_at: Some(Utc::now()),
            persons: students.iter().map(JsonAdaptedPerson::from).collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        Self::write(&self.students_path, json).await
    }

    async fn save_courses(&self, courses: &[Course]) -> Result<()> {
        let file = CoursesFile {
            saved_at: Some(Utc::now()),
            courses: courses.iter().map(JsonAdaptedCourse::from).collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        Self::write(&self.courses_path, json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> JsonFileStorage {
        JsonFileStorage::new(
            dir.path().join("data").join("students.json"),
            dir.path().join("data").join("courses.json"),
        )
    }

    fn sample_persons() -> Vec<Person> {
        vec![
            Person::Student(Student::new(
                StudentId::new(1),
                "John Doe".parse().unwrap(),
                "99887766".parse().unwrap(),
                "Male".parse().unwrap(),
            )),
            Person::Contact(Contact {
                name: "Alex Yeoh".parse().unwrap(),
                phone: "87438807".parse().unwrap(),
                email: "alexyeoh@example.com".parse().unwrap(),
                address: "Blk 30 Geylang Street 29".parse().unwrap(),
                tags: BTreeSet::from(["friends".parse::<Tag>().unwrap()]),
            }),
        ]
    }

    #[tokio::test]
    async fn test_missing_files_load_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        assert!(storage.load_students().await.unwrap().is_none());
        assert!(storage.load_courses(&[]).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let persons = sample_persons();
        let courses = vec![Course::with_students(
            CourseId::new(1),
            "Mathematics".parse().unwrap(),
            [StudentId::new(1)],
        )];

        storage.save_students(&persons).await.unwrap();
        storage.save_courses(&courses).await.unwrap();

        let loaded_persons = storage.load_students().await.unwrap().unwrap();
        let loaded_courses = storage.load_courses(&loaded_persons).await.unwrap().unwrap();
        assert_eq!(loaded_persons, persons);
        assert_eq!(loaded_courses, courses);
    }

    #[tokio::test]
    async fn test_invalid_field_is_corrupt_data() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            storage.students_path(),
            r#"{"persons":[{"student_id":"S00001","name":"John","phone":"12","gender":"Male"}]}"#,
        )
        .unwrap();

        let err = storage.load_students().await.unwrap_err();
        assert!(matches!(err, EduError::DataLoadingError { .. }));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_malformed_json_is_corrupt_data() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(storage.courses_path(), "{ not json").unwrap();

        let err = storage.load_courses(&[]).await.unwrap_err();
        assert!(matches!(err, EduError::DataLoadingError { .. }));
    }

    #[tokio::test]
    async fn test_dangling_membership_is_kept() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            storage.courses_path(),
            r#"{"courses":[{"course_id":"C0001","name":"Mathematics","students":["S00009"]}]}"#,
        )
        .unwrap();

        let courses = storage.load_courses(&[]).await.unwrap().unwrap();
        assert!(courses[0].contains_student(StudentId::new(9)));
    }
}
