use crate::core::command::CommandResult;
use crate::core::dispatcher::parse_command;
use crate::core::store::Store;
use crate::core::Storage;
use crate::utils::error::{EduError, Result};

/// Couples the in-memory store with a storage backend: loads once, then runs one command line at
/// a time and saves after every command that changed the data.
pub struct EduBase<S: Storage> {
    store: Store,
    storage: S,
}

impl<S: Storage> EduBase<S> {
    pub fn new(store: Store, storage: S) -> Self {
        Self { store, storage }
    }

    /// Loads both collections. Missing files start empty; corrupt files are returned as errors.
    pub async fn load(storage: S) -> Result<Self> {
        let persons = match storage.load_students().await? {
            Some(persons) => persons,
            None => {
                tracing::info!("No student data found, starting with an empty student list");
                Vec::new()
            }
        };
        let courses = match storage.load_courses(&persons).await? {
            Some(courses) => courses,
            None => {
                tracing::info!("No course data found, starting with an empty course list");
                Vec::new()
            }
        };

        tracing::info!(
            "Loaded {} persons and {} courses",
            persons.len(),
            courses.len()
        );
        // Duplicate identities can only come from a hand-edited file.
        let store = Store::from_parts(persons, courses).map_err(|e| EduError::DataLoadingError {
            path: "saved data".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(store, storage))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Parses and executes one line of input. Parse and execution failures come back as `Err`
    /// with the store untouched; storage failures while saving are also returned.
    pub async fn run_command(&mut self, input: &str) -> Result<CommandResult> {
        let command = parse_command(input)?;
        tracing::debug!("Executing {}", command.word());
        let result = command.execute(&mut self.store)?;

        if command.mutates() {
            self.save().await?;
        }
        Ok(result)
    }

    pub async fn save(&self) -> Result<()> {
        self.storage.save_students(self.store.persons()).await?;
        self.storage.save_courses(self.store.courses()).await?;
        tracing::debug!("Saved data after command");
        Ok(())
    }
}
