use super::Repository;
use consignment_core::Result;
use parking_lot::Mutex;

/// A process-local [`Repository`] holding records in a `Vec`.
///
/// The vector is guarded by a [`Mutex`] held for exactly one append or one
/// snapshot copy, so concurrent writers never lose updates and readers never
/// observe a partially written vector. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: Mutex<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Clone + Send,
{
    fn create(&self, record: T) -> Result<T> {
        self.records.lock().push(record.clone());
        Ok(record)
    }

    fn get_all(&self) -> Vec<T> {
        self.records.lock().clone()
    }

    fn len(&self) -> usize {
        self.records.lock().len()
    }
}
