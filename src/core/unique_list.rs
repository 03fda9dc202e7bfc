use crate::domain::model::Entity;
use crate::utils::error::{EduError, Result};

/// Ordered collection in which no two elements share an identity key.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueList<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from loaded data, rejecting the first duplicate identity.
    pub fn from_vec(items: Vec<T>) -> Result<Self> {
        let mut list = Self::new();
        for item in items {
            list.add(item)?;
        }
        Ok(list)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    pub(crate) fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.key() == *key)
    }

    pub fn add(&mut self, item: T) -> Result<()> {
        if self.contains(&item) {
            return Err(EduError::DuplicateEntity {
                entity: T::KIND,
                key: item.key().to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, item: &T) -> Result<T> {
        match self.position(item) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(self.missing(item)),
        }
    }

    /// Replaces `target` with `edited` in place. `edited` may keep the identity of `target`
    /// but must not take the identity of any other element.
    pub fn set(&mut self, target: &T, edited: T) -> Result<()> {
        let index = self.position(target).ok_or_else(|| self.missing(target))?;

        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing.is_same_entity(&edited));
        if collides {
            return Err(EduError::DuplicateEntity {
                entity: T::KIND,
                key: edited.key().to_string(),
            });
        }

        self.items[index] = edited;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|existing| existing.is_same_entity(item))
    }

    fn missing(&self, item: &T) -> EduError {
        EduError::MissingEntity {
            entity: T::KIND,
            key: item.key().to_string(),
        }
    }
}
