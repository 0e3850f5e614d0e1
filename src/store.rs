/// Owned entity arena.
///
/// Entities live in insertion order next to the identifier they were given
/// on `add`.  Identifiers are never reused while the store lives; `clear`
/// restarts numbering so a restarted game compares equal to a fresh one.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct EntityStore<T> {
    entries: Vec<(EntityId, T)>,
    next_id: u64,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add(&mut self, entity: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, entity));
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let pos = self.entries.iter().position(|(eid, _)| *eid == id)?;
        Some(self.entries.remove(pos).1)
    }

    /// Drop every entity matching `pred`.  Returns how many were removed.
    pub fn remove_all<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(EntityId, &T) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|(id, e)| !pred(*id, e));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 0;
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.iter().any(|(eid, _)| *eid == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().map(|(id, e)| (*id, e))
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }
}
