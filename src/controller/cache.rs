use crate::domain::entity::Entity;
use crate::domain::types::EntityId;

/// What the list screen renders: the last successfully fetched page.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultCache<E> {
    pub items: Vec<E>,
    /// `None` when the backend sent no pagination metadata.
    pub total_pages: Option<u32>,
    pub loading: bool,
}

impl<E> Default for ResultCache<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_pages: None,
            loading: false,
        }
    }
}

impl<E: Entity> ResultCache<E> {
    pub fn find(&self, id: &EntityId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
