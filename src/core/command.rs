use crate::core::store::Store;
use crate::domain::ids::{CourseId, StudentId};
use crate::domain::model::{Course, Person, Student};
use crate::domain::values::{Gender, Name, Phone};
use crate::utils::error::{EduError, Result};

pub const REGISTER_WORD: &str = "register";
pub const DEREGISTER_WORD: &str = "deregister";
pub const CREATE_COURSE_WORD: &str = "create_course";
pub const DELETE_COURSE_WORD: &str = "delete_course";
pub const ADD_STUDENT_WORD: &str = "add_student";
pub const REMOVE_STUDENT_WORD: &str = "remove_student";
pub const VIEW_COURSES_WORD: &str = "view_courses";
pub const LIST_WORD: &str = "list";
pub const HELP_WORD: &str = "help";
pub const EXIT_WORD: &str = "exit";

pub const REGISTER_USAGE: &str = "register: Registers a new student.\n\
     Parameters: n/NAME p/PHONE g/GENDER\n\
     Example: register n/John Doe p/99887766 g/Male";
pub const DEREGISTER_USAGE: &str = "deregister: Deletes the student identified by their Student ID.\n\
     Parameters: STUDENT_ID (e.g., S00001)\n\
     Example: deregister S00001";
pub const CREATE_COURSE_USAGE: &str = "create_course: Creates a new course.\n\
     Parameters: n/NAME\n\
     Example: create_course n/Mathematics";
pub const DELETE_COURSE_USAGE: &str = "delete_course: Deletes the course identified by its Course ID.\n\
     Parameters: COURSE_ID (e.g., C0001)\n\
     Example: delete_course C0001";
pub const ADD_STUDENT_USAGE: &str = "add_student: Adds a student to a course.\n\
     Parameters: STUDENT_ID COURSE_ID\n\
     Example: add_student S00001 C0001";
pub const REMOVE_STUDENT_USAGE: &str = "remove_student: Removes a student from a course.\n\
     Parameters: STUDENT_ID COURSE_ID\n\
     Example: remove_student S00001 C0001";
pub const VIEW_COURSES_USAGE: &str = "view_courses: Lists all courses, or only the courses of one student.\n\
     Parameters: [STUDENT_ID]\n\
     Example: view_courses S00001";
pub const LIST_USAGE: &str = "list: Lists all students.";
pub const HELP_USAGE: &str = "help: Shows the format of every command.";
pub const EXIT_USAGE: &str = "exit: Saves the data and exits eduBase.";

pub const MESSAGE_LISTED_ALL_COURSES: &str = "Listed all courses";
pub const MESSAGE_NO_COURSES: &str = "No courses have been created yet.";
pub const MESSAGE_LISTED_ALL_STUDENTS: &str = "Listed all students";
pub const MESSAGE_EXIT: &str = "Exiting eduBase as requested ...";

/// Outcome of a successful command, handed back to whatever front end is driving the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: false,
        }
    }

    pub fn exit(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            exit: true,
        }
    }
}

/// Every operation the tool understands, carrying its already-validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        name: Name,
        phone: Phone,
        gender: Gender,
    },
    Deregister {
        student_id: StudentId,
    },
    CreateCourse {
        name: Name,
    },
    DeleteCourse {
        course_id: CourseId,
    },
    AddStudentToCourse {
        student_id: StudentId,
        course_id: CourseId,
    },
    RemoveStudentFromCourse {
        student_id: StudentId,
        course_id: CourseId,
    },
    ViewCourses {
        student_id: Option<StudentId>,
    },
    List,
    Help,
    Exit,
}

impl Command {
    pub fn word(&self) -> &'static str {
        match self {
            Command::Register { .. } => REGISTER_WORD,
            Command::Deregister { .. } => DEREGISTER_WORD,
            Command::CreateCourse { .. } => CREATE_COURSE_WORD,
            Command::DeleteCourse { .. } => DELETE_COURSE_WORD,
            Command::AddStudentToCourse { .. } => ADD_STUDENT_WORD,
            Command::RemoveStudentFromCourse { .. } => REMOVE_STUDENT_WORD,
            Command::ViewCourses { .. } => VIEW_COURSES_WORD,
            Command::List => LIST_WORD,
            Command::Help => HELP_WORD,
            Command::Exit => EXIT_WORD,
        }
    }

    /// Whether a successful run of this command can change the collections.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Register { .. }
                | Command::Deregister { .. }
                | Command::CreateCourse { .. }
                | Command::DeleteCourse { .. }
                | Command::AddStudentToCourse { .. }
                | Command::RemoveStudentFromCourse { .. }
        )
    }

    /// Runs the command against `store`.
    ///
    /// All lookups and relational checks happen before the single mutation, so an `Err` always
    /// leaves the collections exactly as they were.
    pub fn execute(&self, store: &mut Store) -> Result<CommandResult> {
        match self {
            Command::Register {
                name,
                phone,
                gender,
            } => {
                let student_id = store.next_student_id()?;
                let student = Student::new(student_id, name.clone(), phone.clone(), *gender);
                store.add_person(Person::Student(student))?;
                tracing::info!("Registered student {} ({})", name, student_id);
                Ok(CommandResult::new(format!(
                    "Success! {} with {}",
                    name, student_id
                )))
            }

            Command::Deregister { student_id } => {
                let target = store
                    .student_by_id(*student_id)
                    .cloned()
                    .ok_or(EduError::StudentNotFound(*student_id))?;
                store.remove_person(&Person::Student(target.clone()))?;
                tracing::info!("Deregistered student {} ({})", target.name, student_id);
                Ok(CommandResult::new(format!(
                    "Student '{}' ({}) deleted successfully.",
                    target.name, student_id
                )))
            }

            Command::CreateCourse { name } => {
                let course_id = store.next_course_id()?;
                store.add_course(Course::new(course_id, name.clone()))?;
                tracing::info!("Created course {} ({})", name, course_id);
                Ok(CommandResult::new(format!(
                    "New course added: {} ({})",
                    name, course_id
                )))
            }

            Command::DeleteCourse { course_id } => {
                let target = store
                    .course_by_id(*course_id)
                    .cloned()
                    .ok_or(EduError::CourseNotFound(*course_id))?;
                store.remove_course(&target)?;
                tracing::info!("Deleted course {} ({})", target.name, course_id);
                Ok(CommandResult::new(format!(
                    "Course '{}' ({}) deleted successfully.",
                    target.name, course_id
                )))
            }

            Command::AddStudentToCourse {
                student_id,
                course_id,
            } => {
                let (student_name, course_name) =
                    lookup_pair(store, *student_id, *course_id)?;
                store.enroll(*course_id, *student_id)?;
                tracing::info!("Enrolled {} in {}", student_id, course_id);
                Ok(CommandResult::new(format!(
                    "Student '{}' ({}) added to Course '{}' ({}) successfully.",
                    student_name, student_id, course_name, course_id
                )))
            }

            Command::RemoveStudentFromCourse {
                student_id,
                course_id,
            } => {
                let (student_name, course_name) =
                    lookup_pair(store, *student_id, *course_id)?;
                store.unenroll(*course_id, *student_id)?;
                tracing::info!("Removed {} from {}", student_id, course_id);
                Ok(CommandResult::new(format!(
                    "Student '{}' ({}) removed from Course '{}' ({}) successfully.",
                    student_name, student_id, course_name, course_id
                )))
            }

            Command::ViewCourses { student_id: None } => {
                store.show_all_courses();
                store.show_all_persons();
                if store.filtered_courses().is_empty() {
                    Ok(CommandResult::new(MESSAGE_NO_COURSES))
                } else {
                    Ok(CommandResult::new(MESSAGE_LISTED_ALL_COURSES))
                }
            }

            Command::ViewCourses {
                student_id: Some(student_id),
            } => {
                let id = *student_id;
                store.update_filtered_courses(move |course| course.contains_student(id));
                store.update_filtered_persons(move |person| person.student_id() == Some(id));
                if store.filtered_courses().is_empty() {
                    Ok(CommandResult::new(format!(
                        "Student {} is not enrolled in any courses.",
                        id
                    )))
                } else {
                    Ok(CommandResult::new(format!(
                        "Listed all courses for student: {}",
                        id
                    )))
                }
            }

            Command::List => {
                store.show_all_persons();
                store.show_all_courses();
                Ok(CommandResult::new(MESSAGE_LISTED_ALL_STUDENTS))
            }

            Command::Help => Ok(CommandResult::new(help_text())),

            Command::Exit => Ok(CommandResult::exit(MESSAGE_EXIT)),
        }
    }
}

/// Looks up the course first, then the student, and returns both names for the feedback line.
fn lookup_pair(
    store: &Store,
    student_id: StudentId,
    course_id: CourseId,
) -> Result<(Name, Name)> {
    let course = store
        .course_by_id(course_id)
        .ok_or(EduError::CourseNotFound(course_id))?;
    let student = store
        .student_by_id(student_id)
        .ok_or(EduError::StudentNotRegistered(student_id))?;
    Ok((student.name.clone(), course.name.clone()))
}

pub fn help_text() -> String {
    [
        REGISTER_USAGE,
        DEREGISTER_USAGE,
        CREATE_COURSE_USAGE,
        DELETE_COURSE_USAGE,
        ADD_STUDENT_USAGE,
        REMOVE_STUDENT_USAGE,
        VIEW_COURSES_USAGE,
        LIST_USAGE,
        HELP_USAGE,
        EXIT_USAGE,
    ]
    .join("\n\n")
}
