use feed_core::{FeedError, Result, Sample, Snapshot};
use std::collections::VecDeque;

/// Fixed-capacity history of the most recent samples, oldest first.
///
/// Appending to a full window evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples:  VecDeque<Sample>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window. A zero capacity is rejected up front.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FeedError::InvalidConfiguration(
                "window capacity must be at least 1".into(),
            ));
        }

        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Push a new sample, evicting from the front until the window fits.
    ///
    /// Returns how many samples were evicted (0 or 1 for one-at-a-time use).
    pub fn append(&mut self, sample: Sample) -> usize {
        self.samples.push_back(sample);

        let mut evicted = 0;
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.samples.iter().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}
