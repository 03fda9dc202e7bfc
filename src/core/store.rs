use crate::core::filtered_view::{FilteredView, Predicate};
use crate::core::unique_list::UniqueList;
use crate::domain::ids::{CourseId, IdGenerator, StudentId};
use crate::domain::model::{Course, Person, Student};
use crate::utils::error::{EduError, Result};
use std::sync::Arc;

/// In-memory owner of the person and course collections.
///
/// Commands only ever mutate through these methods. The identifier generators live here too,
/// so a fresh store always starts numbering from `S00001` / `C0001`.
#[derive(Debug)]
pub struct Store {
    persons: UniqueList<Person>,
    courses: UniqueList<Course>,
    person_view: FilteredView<Person>,
    course_view: FilteredView<Course>,
    student_ids: IdGenerator,
    course_ids: IdGenerator,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            persons: UniqueList::new(),
            courses: UniqueList::new(),
            person_view: FilteredView::show_all(),
            course_view: FilteredView::show_all(),
            student_ids: IdGenerator::for_students(),
            course_ids: IdGenerator::for_courses(),
        }
    }

    /// Builds a store from loaded collections and moves both id counters past the highest
    /// identifier already in use.
    pub fn from_parts(persons: Vec<Person>, courses: Vec<Course>) -> Result<Self> {
        let mut store = Self::new();
        store.persons = UniqueList::from_vec(persons)?;
        store.courses = UniqueList::from_vec(courses)?;

        // Deregistering leaves memberships behind, so course rosters count as used ids too.
        let registered = store.persons.iter().filter_map(Person::student_id);
        let enrolled = store.courses.iter().flat_map(Course::student_ids);
        if let Some(max) = registered.chain(enrolled).map(|id| id.value()).max() {
            store.student_ids.reconcile(max);
        }
        if let Some(max) = store.courses.iter().map(|c| c.course_id.value()).max() {
            store.course_ids.reconcile(max);
        }

        tracing::debug!(
            "Store initialised with {} persons and {} courses, next ids {} and {}",
            store.persons.len(),
            store.courses.len(),
            StudentId::new(store.student_ids.peek()),
            CourseId::new(store.course_ids.peek())
        );
        Ok(store)
    }

    pub fn next_student_id(&mut self) -> Result<StudentId> {
        self.student_ids.next_value().map(StudentId::new)
    }

    pub fn next_course_id(&mut self) -> Result<CourseId> {
        self.course_ids.next_value().map(CourseId::new)
    }

    // ---- persons ----

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    pub fn add_person(&mut self, person: Person) -> Result<()> {
        self.persons.add(person)?;
        self.person_view.reset();
        Ok(())
    }

    pub fn remove_person(&mut self, person: &Person) -> Result<Person> {
        self.persons.remove(person)
    }

    pub fn replace_person(&mut self, target: &Person, edited: Person) -> Result<()> {
        self.persons.set(target, edited)
    }

    pub fn persons(&self) -> &[Person] {
        self.persons.as_slice()
    }

    pub fn student_by_id(&self, student_id: StudentId) -> Option<&Student> {
        self.persons
            .iter()
            .filter_map(Person::as_student)
            .find(|s| s.student_id == student_id)
    }

    // ---- courses ----

    pub fn has_course(&self, course: &Course) -> bool {
        self.courses.contains(course)
    }

    pub fn add_course(&mut self, course: Course) -> Result<()> {
        self.courses.add(course)?;
        self.course_view.reset();
        Ok(())
    }

    pub fn remove_course(&mut self, course: &Course) -> Result<Course> {
        self.courses.remove(course)
    }

    pub fn replace_course(&mut self, target: &Course, edited: Course) -> Result<()> {
        self.courses.set(target, edited)
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.as_slice()
    }

    pub fn course_by_id(&self, course_id: CourseId) -> Option<&Course> {
        self.courses.get(&course_id)
    }

    /// Adds `student_id` to the membership set of `course_id`.
    pub fn enroll(&mut self, course_id: CourseId, student_id: StudentId) -> Result<()> {
        let course = self
            .courses
            .get_mut(&course_id)
            .ok_or(EduError::CourseNotFound(course_id))?;
        if !course.add_student(student_id) {
            return Err(EduError::StudentAlreadyInCourse {
                student: student_id,
                course: course_id,
            });
        }
        Ok(())
    }

    /// Removes `student_id` from the membership set of `course_id`.
    pub fn unenroll(&mut self, course_id: CourseId, student_id: StudentId) -> Result<()> {
        let course = self
            .courses
            .get_mut(&course_id)
            .ok_or(EduError::CourseNotFound(course_id))?;
        if !course.remove_student(student_id) {
            return Err(EduError::StudentNotInCourse {
                student: student_id,
                course: course_id,
            });
        }
        Ok(())
    }

    // ---- filtered views ----

    pub fn filtered_persons(&self) -> Vec<&Person> {
        self.person_view.apply(self.persons.as_slice())
    }

    pub fn filtered_courses(&self) -> Vec<&Course> {
        self.course_view.apply(self.courses.as_slice())
    }

    pub fn update_filtered_persons<F>(&mut self, predicate: F)
    where
        F: Fn(&Person) -> bool + Send + Sync + 'static,
    {
        self.person_view.set_predicate(Arc::new(predicate) as Predicate<Person>);
    }

    pub fn update_filtered_courses<F>(&mut self, predicate: F)
    where
        F: Fn(&Course) -> bool + Send + Sync + 'static,
    {
        self.course_view.set_predicate(Arc::new(predicate) as Predicate<Course>);
    }

    pub fn show_all_persons(&mut self) {
        self.person_view.reset();
    }

    pub fn show_all_courses(&mut self) {
        self.course_view.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: u32, name: &str) -> Person {
        Person::Student(Student::new(
            StudentId::new(id),
            name.parse().unwrap(),
            "12345678".parse().unwrap(),
            "Female".parse().unwrap(),
        ))
    }

    fn course(id: u32, name: &str, students: &[u32]) -> Course {
        Course::with_students(
            CourseId::new(id),
            name.parse().unwrap(),
            students.iter().map(|s| StudentId::new(*s)),
        )
    }

    #[test]
    fn test_fresh_store_starts_numbering_at_one() {
        let mut store = Store::new();
        assert_eq!(store.next_student_id().unwrap().to_string(), "S00001");
        assert_eq!(store.next_student_id().unwrap().to_string(), "S00002");
        assert_eq!(store.next_course_id().unwrap().to_string(), "C0001");
    }

    #[test]
    fn test_from_parts_reconciles_counters() {
        let mut store = Store::from_parts(
            vec![student(3, "Alice"), student(7, "Bob")],
            vec![course(12, "Mathematics", &[3])],
        )
        .unwrap();

        assert_eq!(store.next_student_id().unwrap(), StudentId::new(8));
        assert_eq!(store.next_course_id().unwrap(), CourseId::new(13));
    }

    #[test]
    fn test_from_parts_skips_ids_left_in_course_rosters() {
        let mut store =
            Store::from_parts(vec![student(1, "Alice")], vec![course(1, "Maths", &[1, 7])]).unwrap();
        assert_eq!(store.next_student_id().unwrap(), StudentId::new(8));
    }

    #[test]
    fn test_from_parts_rejects_duplicate_ids() {
        let result = Store::from_parts(vec![student(1, "Alice"), student(1, "Bob")], vec![]);
        assert!(matches!(result, Err(EduError::DuplicateEntity { .. })));
    }

    #[test]
    fn test_add_resets_person_view() {
        let mut store = Store::new();
        store.add_person(student(1, "Alice")).unwrap();
        store.update_filtered_persons(|_| false);
        assert!(store.filtered_persons().is_empty());

        store.add_person(student(2, "Bob")).unwrap();
        assert_eq!(store.filtered_persons().len(), 2);
    }

    #[test]
    fn test_view_tracks_mutations_without_reinstall() {
        let mut store = Store::new();
        store.add_course(course(1, "Mathematics", &[1])).unwrap();
        store.add_course(course(2, "Physics", &[])).unwrap();

        let target = StudentId::new(1);
        store.update_filtered_courses(move |c| c.contains_student(target));
        assert_eq!(store.filtered_courses().len(), 1);

        store.enroll(CourseId::new(2), target).unwrap();
        assert_eq!(store.filtered_courses().len(), 2);

        store.unenroll(CourseId::new(1), target).unwrap();
        let visible: Vec<CourseId> = store.filtered_courses().iter().map(|c| c.course_id).collect();
        assert_eq!(visible, vec![CourseId::new(2)]);

        let physics = store.course_by_id(CourseId::new(2)).cloned().unwrap();
        store.remove_course(&physics).unwrap();
        assert!(store.filtered_courses().is_empty());
    }

    #[test]
    fn test_enroll_and_unenroll_report_membership_errors() {
        let mut store = Store::new();
        store.add_course(course(1, "Mathematics", &[1])).unwrap();

        assert!(matches!(
            store.enroll(CourseId::new(1), StudentId::new(1)),
            Err(EduError::StudentAlreadyInCourse { .. })
        ));
        assert!(matches!(
            store.unenroll(CourseId::new(1), StudentId::new(2)),
            Err(EduError::StudentNotInCourse { .. })
        ));
        assert!(matches!(
            store.enroll(CourseId::new(9), StudentId::new(1)),
            Err(EduError::CourseNotFound(_))
        ));
    }

    #[test]
    fn test_replace_person() {
        let mut store = Store::new();
        store.add_person(student(1, "Alice")).unwrap();
        store.add_person(student(2, "Bob")).unwrap();

        store
            .replace_person(&student(1, "Alice"), student(1, "Alice Tan"))
            .unwrap();
        assert_eq!(store.persons()[0].name().as_str(), "Alice Tan");

        assert!(store
            .replace_person(&student(1, "Alice Tan"), student(2, "Bob"))
            .is_err());
        assert!(store.has_person(&student(2, "anyone")));
    }

    #[test]
    fn test_lookup_by_id_never_fails() {
        let store = Store::new();
        assert!(store.course_by_id(CourseId::new(1)).is_none());
        assert!(store.student_by_id(StudentId::new(1)).is_none());
    }
}
