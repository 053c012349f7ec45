use crate::sample::Sample;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable, cheaply cloneable copy of a window's contents, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    samples: Arc<[Sample]>,
}

impl Snapshot {
    /// The values only, in arrival order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(Sample::value)
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self { samples: Arc::from(Vec::new()) }
    }
}

impl Deref for Snapshot {
    type Target = [Sample];

    fn deref(&self) -> &[Sample] {
        &self.samples
    }
}

impl FromIterator<Sample> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self { samples: iter.into_iter().collect() }
    }
}
