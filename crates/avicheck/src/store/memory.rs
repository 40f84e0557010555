use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::workflows::forms::{
    FormId, FormRepository, FormStatus, FormSubmission, RepositoryError,
};
use crate::workflows::users::{eq_ignore_case, UserAccount, UserId, UserRepository};

/// Forms kept in insertion order so owner listings preserve storage order.
#[derive(Debug, Clone)]
pub struct InMemoryFormRepository {
    records: Arc<Mutex<Vec<FormSubmission>>>,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryFormRepository {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl InMemoryFormRepository {
    pub fn len(&self) -> usize {
        self.records.lock().expect("form store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FormRepository for InMemoryFormRepository {
    fn save(&self, form: FormSubmission) -> Result<FormSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("form store mutex poisoned");
        if guard.iter().any(|existing| existing.id == form.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(form.clone());
        Ok(form)
    }

    fn find_by_id(&self, id: &FormId) -> Result<Option<FormSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("form store mutex poisoned");
        Ok(guard.iter().find(|form| &form.id == id).cloned())
    }

    fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<FormSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("form store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|form| form.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn find_by_status(&self, status: FormStatus) -> Result<Vec<FormSubmission>, RepositoryError> {
        let guard = self.records.lock().expect("form store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|form| form.status == status)
            .cloned()
            .collect())
    }

    fn update(&self, form: FormSubmission) -> Result<FormSubmission, RepositoryError> {
        let mut guard = self.records.lock().expect("form store mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == form.id) {
            Some(slot) => {
                *slot = form.clone();
                Ok(form)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &FormId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("form store mutex poisoned");
        let before = guard.len();
        guard.retain(|form| &form.id != id);
        Ok(guard.len() != before)
    }

    fn exists(&self, id: &FormId) -> Result<bool, RepositoryError> {
        let guard = self.records.lock().expect("form store mutex poisoned");
        Ok(guard.iter().any(|form| &form.id == id))
    }

    fn generate_id(&self) -> FormId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        FormId(format!("form-{id:06}"))
    }
}

/// Account directory keyed by id; e-mails are unique case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    accounts: Arc<Mutex<Vec<UserAccount>>>,
}

impl InMemoryUserRepository {
    pub fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = self.accounts.lock().expect("user store mutex poisoned");
        let duplicate = guard.iter().any(|existing| {
            existing.id() == account.id()
                || eq_ignore_case(&existing.profile.email, &account.profile.email)
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.push(account.clone());
        Ok(account)
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("user store mutex poisoned");
        Ok(guard.iter().find(|account| account.id() == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("user store mutex poisoned");
        Ok(guard
            .iter()
            .find(|account| eq_ignore_case(&account.profile.email, email))
            .cloned())
    }

    fn list_all(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("user store mutex poisoned");
        Ok(guard.clone())
    }

    fn find_by_state(&self, state: &str) -> Result<Vec<UserAccount>, RepositoryError> {
        let guard = self.accounts.lock().expect("user store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|account| {
                account
                    .profile
                    .address
                    .as_ref()
                    .is_some_and(|address| eq_ignore_case(&address.state, state))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::forms::SectionedAnswers;
    use crate::workflows::users::{Address, UserProfile, UserRole};
    use chrono::Utc;

    fn form(id: &str, owner: u32) -> FormSubmission {
        let now = Utc::now();
        FormSubmission {
            id: FormId(id.to_string()),
            owner_id: UserId(owner),
            answers: SectionedAnswers::default(),
            status: FormStatus::Draft,
            filled_at: now,
            updated_at: now,
            result: None,
        }
    }

    fn account(id: u32, email: &str, state: &str) -> UserAccount {
        UserAccount {
            profile: UserProfile {
                id: UserId(id),
                full_name: format!("User {id}"),
                email: email.to_string(),
                birth_date: None,
                address: Some(Address::new(state, "Uberlândia")),
            },
            role: UserRole::Producer,
        }
    }

    #[test]
    fn owner_listing_keeps_storage_order() {
        let repository = InMemoryFormRepository::default();
        for (id, owner) in [("b", 1), ("a", 2), ("c", 1)] {
            repository.save(form(id, owner)).expect("saved");
        }

        let ids: Vec<_> = repository
            .find_by_owner(UserId(1))
            .expect("listing")
            .into_iter()
            .map(|form| form.id.0)
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn save_rejects_duplicate_ids_and_update_requires_existing() {
        let repository = InMemoryFormRepository::default();
        repository.save(form("dup", 1)).expect("first save");
        assert!(matches!(
            repository.save(form("dup", 1)),
            Err(RepositoryError::Conflict)
        ));
        assert!(matches!(
            repository.update(form("ghost", 1)),
            Err(RepositoryError::NotFound)
        ));
        assert!(repository.delete(&FormId("dup".to_string())).expect("delete"));
        assert!(!repository.delete(&FormId("dup".to_string())).expect("delete"));
        assert!(repository.is_empty());
    }

    #[test]
    fn generated_ids_are_sequential() {
        let repository = InMemoryFormRepository::default();
        assert_eq!(repository.generate_id().0, "form-000001");
        assert_eq!(repository.generate_id().0, "form-000002");
    }

    #[test]
    fn users_are_found_by_email_and_state() {
        let repository = InMemoryUserRepository::default();
        repository
            .insert(account(1, "ana@farm.test", "MG"))
            .expect("insert");
        repository
            .insert(account(2, "rui@farm.test", "SP"))
            .expect("insert");
        assert!(matches!(
            repository.insert(account(3, "ANA@farm.test", "MG")),
            Err(RepositoryError::Conflict)
        ));

        let found = repository
            .find_by_email("Ana@Farm.test")
            .expect("lookup")
            .expect("present");
        assert_eq!(found.id(), UserId(1));
        assert_eq!(repository.find_by_state("mg").expect("state").len(), 1);
        assert_eq!(repository.list_all().expect("all").len(), 2);
    }
}
