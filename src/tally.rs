use indexmap::IndexMap;
use std::hash::Hash;

/// Counts repeated observations of the same question and reports the most
/// common answer. Ties go to whichever answer was seen first.
#[derive(Debug, Clone)]
pub struct MajorityTally<T: Hash + Eq> {
    counts: IndexMap<T, usize>,
    total: usize,
}

impl<T: Hash + Eq> Default for MajorityTally<T> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
            total: 0,
        }
    }
}

impl<T: Hash + Eq> MajorityTally<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn winner(&self) -> Option<&T> {
        let mut best: Option<(&T, usize)> = None;
        for (value, &count) in &self.counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }

    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl<T: Hash + Eq> FromIterator<T> for MajorityTally<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tally = Self::new();
        for value in iter {
            tally.observe(value);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_common_wins() {
        let tally: MajorityTally<&str> = ["b", "a", "a", "c", "a", "b"].into_iter().collect();
        assert_eq!(tally.winner(), Some(&"a"));
        assert_eq!(tally.count(&"a"), 3);
        assert_eq!(tally.count(&"z"), 0);
        assert_eq!(tally.total(), 6);
    }

    #[test]
    fn ties_go_to_first_seen() {
        let mut tally = MajorityTally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.winner(), None);
        tally.observe(7);
        tally.observe(3);
        tally.observe(3);
        tally.observe(7);
        assert_eq!(tally.winner(), Some(&7));
        tally.observe(3);
        assert_eq!(tally.winner(), Some(&3));
    }
}
