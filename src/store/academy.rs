//! Academy registry operations (name -> role + branch)

use super::{RegistryError, RegistryStore, normalize_key};
use crate::models::{Branch, PersonRecord, Role};

impl RegistryStore {
    /// Register a person. Role and branch are validated against the closed
    /// enumerations before anything is touched; a duplicate name is a
    /// conflict and leaves the existing record unmodified.
    pub fn add_person(
        &mut self,
        name: &str,
        role: &str,
        branch: &str,
    ) -> Result<(String, Role, Branch), RegistryError> {
        let name = normalize_key(name);
        let role_key = normalize_key(role);
        let branch_key = normalize_key(branch);
        let role = Role::from_str(&role_key).ok_or(RegistryError::InvalidRole(role_key))?;
        let branch =
            Branch::from_str(&branch_key).ok_or(RegistryError::InvalidBranch(branch_key))?;

        if let Some(existing) = self.academy().get(&name) {
            return Err(RegistryError::Conflict {
                name,
                existing: *existing,
            });
        }

        self.academy_mut()
            .insert(name.clone(), PersonRecord { role, branch });
        self.persist()?;
        Ok((name, role, branch))
    }

    pub fn remove_person(&mut self, name: &str) -> Result<(String, PersonRecord), RegistryError> {
        let name = normalize_key(name);
        let removed = self
            .academy_mut()
            .remove(&name)
            .ok_or(RegistryError::NotFound)?;
        self.persist()?;
        Ok((name, removed))
    }

    pub fn person(&self, name: &str) -> Result<(String, PersonRecord), RegistryError> {
        let name = normalize_key(name);
        let record = *self.academy().get(&name).ok_or(RegistryError::NotFound)?;
        Ok((name, record))
    }

    /// Everyone in one branch, sorted by name.
    pub fn people_in_branch(&self, branch: Branch) -> Vec<(String, Role)> {
        self.academy()
            .iter()
            .filter(|(_, record)| record.branch == branch)
            .map(|(name, record)| (name.clone(), record.role))
            .collect()
    }

    /// Move a person to another branch, returning (old, new). A failed
    /// validation or lookup leaves the record unchanged.
    pub fn move_person(
        &mut self,
        name: &str,
        new_branch: &str,
    ) -> Result<(String, Branch, Branch), RegistryError> {
        let name = normalize_key(name);
        let branch_key = normalize_key(new_branch);
        let new_branch =
            Branch::from_str(&branch_key).ok_or(RegistryError::InvalidBranch(branch_key))?;
        let record = self
            .academy_mut()
            .get_mut(&name)
            .ok_or(RegistryError::NotFound)?;
        let old_branch = record.branch;
        record.branch = new_branch;
        self.persist()?;
        Ok((name, old_branch, new_branch))
    }

    /// The whole roster grouped by branch, branches sorted by name and
    /// members rendered as "Name (Role)" strings, sorted within each branch.
    pub fn academy_roster(&self) -> Vec<(Branch, Vec<String>)> {
        let mut grouped: std::collections::BTreeMap<&'static str, (Branch, Vec<String>)> =
            std::collections::BTreeMap::new();
        for (name, record) in self.academy() {
            grouped
                .entry(record.branch.as_str())
                .or_insert_with(|| (record.branch, Vec::new()))
                .1
                .push(format!("{} ({})", name, record.role));
        }
        grouped
            .into_values()
            .map(|(branch, mut members)| {
                members.sort();
                (branch, members)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, RegistryStore) {
        let dir = TempDir::new().unwrap();
        let store = RegistryStore::load(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_add_and_get_person() {
        let (_dir, mut store) = store();
        let (name, role, branch) = store.add_person("kato", "initiate", "uzunjati").unwrap();
        assert_eq!(name, "Kato");
        assert_eq!(role, Role::Initiate);
        assert_eq!(branch, Branch::Uzunjati);

        let (name, record) = store.person("KATO").unwrap();
        assert_eq!(name, "Kato");
        assert_eq!(record.role, Role::Initiate);
    }

    #[test]
    fn test_add_invalid_role_does_not_mutate() {
        let (_dir, mut store) = store();
        assert!(matches!(
            store.add_person("kato", "archmage", "uzunjati"),
            Err(RegistryError::InvalidRole(_))
        ));
        assert_eq!(store.person_count(), 0);
    }

    #[test]
    fn test_add_invalid_branch_does_not_mutate() {
        let (_dir, mut store) = store();
        assert!(matches!(
            store.add_person("kato", "initiate", "hogwarts"),
            Err(RegistryError::InvalidBranch(_))
        ));
        assert_eq!(store.person_count(), 0);
    }

    #[test]
    fn test_duplicate_add_is_conflict_and_preserves_first() {
        let (_dir, mut store) = store();
        store.add_person("Kato", "Initiate", "Uzunjati").unwrap();

        match store.add_person("kato", "Attendant", "Magaambya") {
            Err(RegistryError::Conflict { name, existing }) => {
                assert_eq!(name, "Kato");
                assert_eq!(existing.role, Role::Initiate);
                assert_eq!(existing.branch, Branch::Uzunjati);
            }
            other => panic!("expected Conflict, got {:?}", other.map(|_| ())),
        }

        let (_, record) = store.person("Kato").unwrap();
        assert_eq!(record.role, Role::Initiate);
        assert_eq!(record.branch, Branch::Uzunjati);
    }

    #[test]
    fn test_remove_unknown_leaves_snapshot_untouched() {
        let (dir, mut store) = store();
        store.add_person("kato", "initiate", "uzunjati").unwrap();
        let path = dir.path().join(super::super::ACADEMY_SNAPSHOT);
        let before = fs::read_to_string(&path).unwrap();

        assert!(matches!(
            store.remove_person("Unknown"),
            Err(RegistryError::NotFound)
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_remove_person_returns_record() {
        let (_dir, mut store) = store();
        store.add_person("kato", "conversant", "rain-scribes").unwrap();
        let (name, record) = store.remove_person("kato").unwrap();
        assert_eq!(name, "Kato");
        assert_eq!(record.role, Role::Conversant);
        assert_eq!(store.person_count(), 0);
    }

    #[test]
    fn test_move_to_invalid_branch_leaves_branch_unchanged() {
        let (_dir, mut store) = store();
        store.add_person("kato", "initiate", "uzunjati").unwrap();
        assert!(matches!(
            store.move_person("kato", "hogwarts"),
            Err(RegistryError::InvalidBranch(_))
        ));
        let (_, record) = store.person("kato").unwrap();
        assert_eq!(record.branch, Branch::Uzunjati);
    }

    #[test]
    fn test_move_person_returns_old_and_new() {
        let (_dir, mut store) = store();
        store.add_person("kato", "initiate", "uzunjati").unwrap();
        let (name, old_branch, new_branch) =
            store.move_person("kato", "emerald boughs").unwrap();
        assert_eq!(name, "Kato");
        assert_eq!(old_branch, Branch::Uzunjati);
        assert_eq!(new_branch, Branch::EmeraldBoughs);
        let (_, record) = store.person("kato").unwrap();
        assert_eq!(record.branch, Branch::EmeraldBoughs);
    }

    #[test]
    fn test_move_unknown_is_not_found() {
        let (_dir, mut store) = store();
        assert!(matches!(
            store.move_person("kato", "uzunjati"),
            Err(RegistryError::NotFound)
        ));
    }

    #[test]
    fn test_people_in_branch_sorted_exact_match() {
        let (_dir, mut store) = store();
        store.add_person("zola", "initiate", "magaambya").unwrap();
        store.add_person("abena", "attendant", "magaambya").unwrap();
        store.add_person("kato", "initiate", "uzunjati").unwrap();

        let people = store.people_in_branch(Branch::Magaambya);
        let names: Vec<&str> = people.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Abena", "Zola"]);

        assert!(store.people_in_branch(Branch::RainScribes).is_empty());
    }

    #[test]
    fn test_roster_grouped_and_sorted() {
        let (_dir, mut store) = store();
        store.add_person("zola", "initiate", "uzunjati").unwrap();
        store.add_person("abena", "lore-speaker", "uzunjati").unwrap();
        store.add_person("kato", "service", "cascade bearers").unwrap();

        let roster = store.academy_roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].0, Branch::CascadeBearers);
        assert_eq!(roster[0].1, vec!["Kato (Service)"]);
        assert_eq!(roster[1].0, Branch::Uzunjati);
        assert_eq!(
            roster[1].1,
            vec!["Abena (Lore-Speaker)", "Zola (Initiate)"]
        );
    }
}
