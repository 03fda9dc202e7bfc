use crate::domain::model::{Course, Person};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Persistence boundary for the two collections.
///
/// `Ok(None)` from a load means there is no saved data yet and the store starts empty.
/// Corrupt data is an error and is never repaired silently.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load_students(&self) -> Result<Option<Vec<Person>>>;
    async fn load_courses(&self, students: &[Person]) -> Result<Option<Vec<Course>>>;
    async fn save_students(&self, students: &[Person]) -> Result<()>;
    async fn save_courses(&self, courses: &[Course]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn students_file(&self) -> &str;
    fn courses_file(&self) -> &str;

    fn students_path(&self) -> PathBuf {
        PathBuf::from(self.data_dir()).join(self.students_file())
    }

    fn courses_path(&self) -> PathBuf {
        PathBuf::from(self.data_dir()).join(self.courses_file())
    }
}
