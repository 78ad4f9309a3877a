use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEvent(pub u64);

/// Same shape as [`TestEvent`], different type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookalikeEvent(pub u64);

#[derive(Debug, PartialEq, Eq)]
pub struct Widget {
    pub name: &'static str,
}

/// Thread-safe record of what a callback observed.
#[derive(Debug, Clone)]
pub struct Recorder<T> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> Recorder<T> {
    pub fn new() -> Self {
        Self { seen: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn push(&self, value: T) {
        self.seen.lock().push(value);
    }

    pub fn values(&self) -> Vec<T> {
        self.seen.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
