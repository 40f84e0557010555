use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::domain::FormId;

/// Per-form mutual exclusion around fetch → mutate → persist sequences.
///
/// Slots are created on demand and dropped once no caller holds them, so the
/// table only grows with the number of forms being mutated concurrently.
#[derive(Debug, Default)]
pub(crate) struct FormLocks {
    slots: Mutex<HashMap<FormId, Arc<Mutex<()>>>>,
}

impl FormLocks {
    pub(crate) fn with<T>(&self, id: &FormId, op: impl FnOnce() -> T) -> T {
        let slot = self.slot(id);
        let result = {
            let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            op()
        };
        self.release(id, slot);
        result
    }

    fn slot(&self, id: &FormId) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(id.clone()).or_default().clone()
    }

    fn release(&self, id: &FormId, slot: Arc<Mutex<()>>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        drop(slot);
        if slots
            .get(id)
            .is_some_and(|existing| Arc::strong_count(existing) == 1)
        {
            slots.remove(id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn serializes_operations_on_same_form() {
        let locks = Arc::new(FormLocks::default());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));
        let id = FormId("form-000001".to_string());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let max_inside = max_inside.clone();
                let id = id.clone();
                thread::spawn(move || {
                    locks.with(&id, || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(2));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker finished");
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.tracked(), 0, "idle slots are pruned");
    }
}
