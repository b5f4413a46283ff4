use std::collections::VecDeque;

/// Bounded history of recent positions for the selected flight. Appends drop
/// the oldest entry once the capacity is reached.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Trail {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, lat: f64, lon: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back((lat, lon));
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Snapshot of the trail, oldest position first.
    pub fn to_vec(&self) -> Vec<(f64, f64)> {
        self.points.iter().copied().collect()
    }
}
