//! Attribute snapshots across two consecutive render passes.

use indexmap::IndexMap;

use crate::ids::LabelId;
use crate::value::LabelAttributes;

/// What was (or is) on screen: label identity to resolved attributes.
/// Iteration follows insertion order, i.e. drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelConfigMap {
    entries: IndexMap<LabelId, LabelAttributes>,
}

impl LabelConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced entry keeps its original position.
    pub fn insert(&mut self, id: LabelId, attrs: LabelAttributes) -> Option<LabelAttributes> {
        self.entries.insert(id, attrs)
    }

    pub fn get(&self, id: &LabelId) -> Option<&LabelAttributes> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &LabelId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&mut self, id: &LabelId) -> Option<LabelAttributes> {
        self.entries.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LabelId, &LabelAttributes)> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &LabelId> {
        self.entries.keys()
    }
}

impl FromIterator<(LabelId, LabelAttributes)> for LabelConfigMap {
    fn from_iter<T: IntoIterator<Item = (LabelId, LabelAttributes)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Previous/current snapshot pair.
///
/// `begin_pass` resets `current`; `commit` moves it into `previous`, so after
/// a full pass `previous` is exactly what that pass captured.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    previous: LabelConfigMap,
    current: LabelConfigMap,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_pass(&mut self) {
        self.current.clear();
    }

    pub fn previous(&self) -> &LabelConfigMap {
        &self.previous
    }

    pub fn current(&self) -> &LabelConfigMap {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut LabelConfigMap {
        &mut self.current
    }

    /// Both maps at once, for reconciliation.
    pub fn pair(&self) -> (&LabelConfigMap, &LabelConfigMap) {
        (&self.previous, &self.current)
    }

    pub fn commit(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    /// Forget everything, e.g. on teardown.
    pub fn reset(&mut self) {
        self.previous.clear();
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_replaces_previous_with_current() {
        let mut store = SnapshotStore::new();
        store.begin_pass();
        store
            .current_mut()
            .insert("a".into(), LabelAttributes::new(1.0, 1.0, "a"));
        store.commit();
        assert_eq!(store.previous().len(), 1);
        assert!(store.current().is_empty());

        store.begin_pass();
        store
            .current_mut()
            .insert("b".into(), LabelAttributes::new(2.0, 2.0, "b"));
        let expected = store.current().clone();
        store.commit();
        assert_eq!(store.previous(), &expected);
        assert!(!store.previous().contains(&"a".into()));
    }

    #[test]
    fn insert_keeps_first_position() {
        let mut map = LabelConfigMap::new();
        map.insert("a".into(), LabelAttributes::new(0.0, 0.0, "1"));
        map.insert("b".into(), LabelAttributes::new(0.0, 0.0, "2"));
        map.insert("a".into(), LabelAttributes::new(5.0, 0.0, "3"));
        let ids: Vec<&str> = map.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(map.get(&"a".into()).map(|a| a.x), Some(5.0));
    }
}
