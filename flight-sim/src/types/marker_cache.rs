use std::collections::HashMap;

/// Heading bucket width in degrees for marker rendering.
const BUCKET_DEGREES: f64 = 5.0;

/// Memoizes rendered markers by bucketed heading and selection state, so a
/// full pool refresh reuses the same handful of rendered values instead of
/// rebuilding one per flight.
#[derive(Debug, Default)]
pub struct MarkerCache<T> {
    entries: HashMap<(i32, bool), T>,
}

impl<T> MarkerCache<T> {
    pub fn new() -> Self {
        MarkerCache {
            entries: HashMap::new(),
        }
    }

    /// Rounds a heading to its 5-degree bucket in `[0, 360)`.
    pub fn bucket(track: f64) -> i32 {
        (((track / BUCKET_DEGREES).round() * BUCKET_DEGREES) as i32).rem_euclid(360)
    }

    /// Returns the cached marker for this heading bucket and selection flag,
    /// building and storing it on a miss.
    pub fn get_or_insert_with(
        &mut self,
        track: f64,
        selected: bool,
        build: impl FnOnce(i32, bool) -> T,
    ) -> &T {
        let key = (Self::bucket(track), selected);
        self.entries.entry(key).or_insert_with(|| build(key.0, key.1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_rounds_to_five_degrees() {
        assert_eq!(MarkerCache::<()>::bucket(0.0), 0);
        assert_eq!(MarkerCache::<()>::bucket(2.4), 0);
        assert_eq!(MarkerCache::<()>::bucket(2.6), 5);
        assert_eq!(MarkerCache::<()>::bucket(93.0), 95);
        // Wraps back to zero near north.
        assert_eq!(MarkerCache::<()>::bucket(358.0), 0);
    }

    #[test]
    fn identical_buckets_share_one_entry() {
        let mut cache: MarkerCache<String> = MarkerCache::new();
        assert!(cache.is_empty());
        let mut builds = 0;
        for track in [90.0, 91.0, 92.4] {
            cache.get_or_insert_with(track, false, |bucket, _| {
                builds += 1;
                format!("marker-{}", bucket)
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }

    #[test]
    fn selection_gets_its_own_entry() {
        let mut cache: MarkerCache<u8> = MarkerCache::new();
        cache.get_or_insert_with(90.0, false, |_, _| 1);
        cache.get_or_insert_with(90.0, true, |_, _| 2);
        assert_eq!(cache.len(), 2);
    }
}
