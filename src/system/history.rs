use std::collections::VecDeque;

/// Samples kept per metric history.
pub const HISTORY_CAPACITY: usize = 50;
/// Lines kept in the reachability probe log.
pub const PROBE_LOG_CAPACITY: usize = 100;

/// Fixed-capacity sequence that evicts its oldest entry on overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

impl<T: Clone> BoundedHistory<T> {
    /// The most recent `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Vec<T> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

pub type MetricHistory = BoundedHistory<f64>;

/// Every history the sampler tracks, in one place so it can be published
/// as a single snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Histories {
    pub cpu: MetricHistory,
    pub ram: MetricHistory,
    pub gpu: MetricHistory,
    pub upload: MetricHistory,
    pub download: MetricHistory,
}

impl Histories {
    pub fn new(capacity: usize) -> Self {
        Self {
            cpu: MetricHistory::new(capacity),
            ram: MetricHistory::new(capacity),
            gpu: MetricHistory::new(capacity),
            upload: MetricHistory::new(capacity),
            download: MetricHistory::new(capacity),
        }
    }
}

impl Default for Histories {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}
