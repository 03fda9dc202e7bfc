use crate::domain::ids::{CourseId, StudentId};
use crate::domain::values::{Address, Email, Gender, Name, Phone, Tag};
use std::collections::BTreeSet;
use std::fmt;

/// Anything the store keeps in a uniqueness-checked collection.
pub trait Entity {
    type Key: PartialEq + fmt::Display;

    /// Human-readable kind used in store error messages.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;

    fn is_same_entity(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub student_id: StudentId,
    pub name: Name,
    pub phone: Phone,
    pub gender: Gender,
}

impl Student {
    pub fn new(student_id: StudentId, name: Name, phone: Phone, gender: Gender) -> Self {
        Self {
            student_id,
            name,
            phone,
            gender,
        }
    }
}

/// Address-book record kept from the older data format. It has no student id, so its name is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    pub tags: BTreeSet<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Person {
    Student(Student),
    Contact(Contact),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonKey {
    Student(StudentId),
    Contact(Name),
}

impl fmt::Display for PersonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonKey::Student(id) => write!(f, "{}", id),
            PersonKey::Contact(name) => write!(f, "{}", name),
        }
    }
}

impl Person {
    pub fn name(&self) -> &Name {
        match self {
            Person::Student(s) => &s.name,
            Person::Contact(c) => &c.name,
        }
    }

    pub fn phone(&self) -> &Phone {
        match self {
            Person::Student(s) => &s.phone,
            Person::Contact(c) => &c.phone,
        }
    }

    pub fn student_id(&self) -> Option<StudentId> {
        match self {
            Person::Student(s) => Some(s.student_id),
            Person::Contact(_) => None,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Person::Student(s) => Some(s),
            Person::Contact(_) => None,
        }
    }
}

impl Entity for Person {
    type Key = PersonKey;

    const KIND: &'static str = "person";

    fn key(&self) -> PersonKey {
        match self {
            Person::Student(s) => PersonKey::Student(s.student_id),
            Person::Contact(c) => PersonKey::Contact(c.name.clone()),
        }
    }
}

impl From<Student> for Person {
    fn from(student: Student) -> Self {
        Person::Student(student)
    }
}

impl From<Contact> for Person {
    fn from(contact: Contact) -> Self {
        Person::Contact(contact)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Person::Student(s) => write!(
                f,
                "{} {}; Phone: {}; Gender: {}",
                s.student_id, s.name, s.phone, s.gender
            ),
            Person::Contact(c) => {
                write!(
                    f,
                    "{}; Phone: {}; Email: {}; Address: {}",
                    c.name, c.phone, c.email, c.address
                )?;
                if !c.tags.is_empty() {
                    let tags: Vec<&str> = c.tags.iter().map(Tag::as_str).collect();
                    write!(f, "; Tags: [{}]", tags.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub course_id: CourseId,
    pub name: Name,
    students: BTreeSet<StudentId>,
}

impl Course {
    pub fn new(course_id: CourseId, name: Name) -> Self {
        Self {
            course_id,
            name,
            students: BTreeSet::new(),
        }
    }

    pub fn with_students(
        course_id: CourseId,
        name: Name,
        students: impl IntoIterator<Item = StudentId>,
    ) -> Self {
        Self {
            course_id,
            name,
            students: students.into_iter().collect(),
        }
    }

    pub fn contains_student(&self, student_id: StudentId) -> bool {
        self.students.contains(&student_id)
    }

    /// Enrolled student ids in ascending order.
    pub fn student_ids(&self) -> impl Iterator<Item = StudentId> + '_ {
        self.students.iter().copied()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    // Membership is only changed through the store's enroll/unenroll operations.
    pub(crate) fn add_student(&mut self, student_id: StudentId) -> bool {
        self.students.insert(student_id)
    }

    pub(crate) fn remove_student(&mut self, student_id: StudentId) -> bool {
        self.students.remove(&student_id)
    }
}

impl Entity for Course {
    type Key = CourseId;

    const KIND: &'static str = "course";

    fn key(&self) -> CourseId {
        self.course_id
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.course_id, self.name)?;
        if self.students.is_empty() {
            write!(f, "; Students: none")
        } else {
            let ids: Vec<String> = self.students.iter().map(|id| id.to_string()).collect();
            write!(f, "; Students: {}", ids.join(", "))
        }
    }
}
