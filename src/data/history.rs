use std::collections::VecDeque;

use super::types::Sample;

/// Bounded, newest-first retention buffer of samples, used only for live
/// display. Insertion always succeeds; overflow evicts from the oldest end.
#[derive(Debug)]
pub struct HistoryStore {
    samples: VecDeque<Sample>,
    max_rows: usize,
}

impl HistoryStore {
    pub fn new(max_rows: usize) -> Self {
        let max_rows = max_rows.max(1);
        Self {
            samples: VecDeque::with_capacity(max_rows + 1),
            max_rows,
        }
    }

    /// Prepend a sample, then truncate from the tail down to max_rows.
    pub fn insert(&mut self, sample: Sample) {
        self.samples.push_front(sample);
        self.samples.truncate(self.max_rows);
    }

    /// Current history, newest-first.
    pub fn snapshot(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DeviceReading;

    fn sample(tag: u64) -> Sample {
        Sample {
            timestamp: format!("2026-08-05 10:00:{tag:02}"),
            readings: vec![DeviceReading::new(tag * 100, tag * 10)],
        }
    }

    #[test]
    fn insert_keeps_newest_first() {
        let mut history = HistoryStore::new(5);
        history.insert(sample(1));
        history.insert(sample(2));

        let timestamps: Vec<&str> = history
            .snapshot()
            .map(|sample| sample.timestamp.as_str())
            .collect();
        assert_eq!(timestamps, vec!["2026-08-05 10:00:02", "2026-08-05 10:00:01"]);
        assert_eq!(history.newest().unwrap().timestamp, "2026-08-05 10:00:02");
    }

    #[test]
    fn insert_evicts_oldest_beyond_capacity() {
        let mut history = HistoryStore::new(3);
        for tag in 1..=5 {
            history.insert(sample(tag));
            assert!(history.len() <= 3);
        }

        let memory: Vec<&str> = history
            .snapshot()
            .map(|sample| sample.readings[0].memory_used.as_str())
            .collect();
        assert_eq!(memory, vec!["500MiB", "400MiB", "300MiB"]);
    }

    #[test]
    fn capacity_floor_is_one_row() {
        let mut history = HistoryStore::new(0);
        history.insert(sample(1));
        history.insert(sample(2));

        assert_eq!(history.len(), 1);
        assert_eq!(history.newest().unwrap().timestamp, "2026-08-05 10:00:02");
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut history = HistoryStore::new(3);
        history.insert(sample(1));
        history.clear();
        assert!(history.is_empty());
    }
}
