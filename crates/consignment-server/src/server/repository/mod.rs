//! Storage abstraction for consignment records.
//!
//! The service talks to storage only through the [`Repository`] trait, which
//! is generic over the record type. Records are treated as opaque values: a
//! repository never inspects the fields of what it stores.
//!
//! ## Structure
//!
//! - [`memory`] - Process-local store backed by a mutex-guarded `Vec`.

pub mod memory;

pub use memory::InMemoryRepository;

use consignment_core::Result;

/// An append-only, insertion-ordered store of records.
///
/// Implementations must be safe to share across tasks: tonic dispatches each
/// call on its own task, so `create` and `get_all` may run concurrently.
pub trait Repository<T>: Send + Sync {
    /// Appends `record` to the end of the store and returns the stored value.
    ///
    /// Once this returns `Ok`, the record is visible to every later
    /// [`get_all`](Repository::get_all).
    ///
    /// # Errors
    ///
    /// Returns [`consignment_core::Error`] if the record was refused or could
    /// not be written. Nothing is stored in that case.
    fn create(&self, record: T) -> Result<T>;

    /// Returns a snapshot of every stored record in insertion order.
    ///
    /// An empty store yields an empty `Vec`; this never fails.
    fn get_all(&self) -> Vec<T>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
