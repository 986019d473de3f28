use std::collections::HashSet;
use std::sync::Mutex;

/// Key-existence capability backing webhook deduplication.
///
/// The check and the insert are one atomic step so that two simultaneous
/// deliveries of the same signature cannot both pass.
pub trait SignatureStore: Send + Sync {
    /// Record `signature`. Returns `false` if it was already present.
    fn insert_if_absent(&self, signature: &str) -> bool;
}

/// Process-lifetime store. Grows without bound; a restart clears it, after
/// which previously seen signatures are processed again.
#[derive(Default)]
pub struct InMemorySignatureStore {
    seen: Mutex<HashSet<String>>,
}

impl SignatureStore for InMemorySignatureStore {
    fn insert_if_absent(&self, signature: &str) -> bool {
        self.seen.lock().unwrap().insert(signature.to_owned())
    }
}
