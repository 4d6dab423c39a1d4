//! Inventory registry operations (character -> slot -> item)

use std::collections::BTreeMap;

use super::{RegistryError, RegistryStore, normalize_key};

impl RegistryStore {
    /// Set the item in a slot, creating the character entry on demand.
    /// Returns the previous item if the slot was occupied.
    pub fn set_item(
        &mut self,
        character: &str,
        slot: &str,
        item: &str,
    ) -> Result<Option<String>, RegistryError> {
        let character = normalize_key(character);
        let slot = normalize_key(slot);
        let previous = self
            .inventory_mut()
            .entry(character)
            .or_default()
            .insert(slot, item.to_string());
        self.persist()?;
        Ok(previous)
    }

    pub fn get_item(&self, character: &str, slot: &str) -> Result<String, RegistryError> {
        let character = normalize_key(character);
        let slot = normalize_key(slot);
        self.inventory()
            .get(&character)
            .and_then(|slots| slots.get(&slot))
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    /// Remove the item in a slot. Removing the last slot deletes the
    /// character entry entirely, so no empty entries persist.
    pub fn remove_item(&mut self, character: &str, slot: &str) -> Result<String, RegistryError> {
        let character = normalize_key(character);
        let slot = normalize_key(slot);
        let slots = self
            .inventory_mut()
            .get_mut(&character)
            .ok_or(RegistryError::NotFound)?;
        let removed = slots.remove(&slot).ok_or(RegistryError::NotFound)?;
        if slots.is_empty() {
            self.inventory_mut().remove(&character);
        }
        self.persist()?;
        Ok(removed)
    }

    /// All slots for one character, with the normalized character name.
    pub fn inventory_of(
        &self,
        character: &str,
    ) -> Result<(String, BTreeMap<String, String>), RegistryError> {
        let character = normalize_key(character);
        let slots = self
            .inventory()
            .get(&character)
            .ok_or(RegistryError::NotFound)?
            .clone();
        Ok((character, slots))
    }

    /// Every character's slots, sorted by character name.
    pub fn all_inventories(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.inventory()
            .iter()
            .map(|(character, slots)| (character.clone(), slots.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, RegistryStore) {
        let dir = TempDir::new().unwrap();
        let store = RegistryStore::load(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let (_dir, mut store) = store();
        store.set_item("aria", "head", "circlet").unwrap();
        assert_eq!(store.get_item("Aria", "Head").unwrap(), "circlet");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (_dir, mut store) = store();
        store.set_item("ARIA", "HEAD", "circlet").unwrap();
        for name in ["aria", "Aria", "ARIA"] {
            assert_eq!(store.get_item(name, "head").unwrap(), "circlet");
        }
    }

    #[test]
    fn test_set_returns_previous_item() {
        let (_dir, mut store) = store();
        assert_eq!(store.set_item("aria", "head", "circlet").unwrap(), None);
        assert_eq!(
            store.set_item("aria", "head", "crown").unwrap(),
            Some("circlet".to_string())
        );
        assert_eq!(store.get_item("aria", "head").unwrap(), "crown");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.get_item("aria", "head"),
            Err(RegistryError::NotFound)
        ));
    }

    #[test]
    fn test_remove_last_slot_prunes_character() {
        let (_dir, mut store) = store();
        store.set_item("aria", "head", "circlet").unwrap();
        store.set_item("aria", "belt", "sash").unwrap();

        store.remove_item("aria", "belt").unwrap();
        assert_eq!(store.character_count(), 1);

        let removed = store.remove_item("aria", "head").unwrap();
        assert_eq!(removed, "circlet");
        assert_eq!(store.character_count(), 0);
        assert!(store.all_inventories().is_empty());
        assert!(matches!(
            store.inventory_of("aria"),
            Err(RegistryError::NotFound)
        ));
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let (_dir, mut store) = store();
        store.set_item("aria", "head", "circlet").unwrap();
        assert!(matches!(
            store.remove_item("aria", "belt"),
            Err(RegistryError::NotFound)
        ));
        assert!(matches!(
            store.remove_item("kato", "head"),
            Err(RegistryError::NotFound)
        ));
    }

    #[test]
    fn test_all_inventories_sorted_by_character() {
        let (_dir, mut store) = store();
        store.set_item("zola", "head", "hat").unwrap();
        store.set_item("aria", "head", "circlet").unwrap();
        store.set_item("kato", "belt", "sash").unwrap();

        let names: Vec<String> = store
            .all_inventories()
            .into_iter()
            .map(|(character, _)| character)
            .collect();
        assert_eq!(names, vec!["Aria", "Kato", "Zola"]);
    }
}
