use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh item ids. Injected into the store so tests can pin ids down.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random, URL-safe ids (UUID v4 in simple form, 32 hex chars).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic `"<prefix>-<n>"` ids, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicU64::new(1) }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
