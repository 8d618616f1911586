use smallvec::SmallVec;

const INLINE_CANDIDATES: usize = 32;

#[derive(Clone, Copy, Debug)]
struct Candidate<T> {
    distance_sq: f32,
    value: T,
}

/// Keeps the `capacity` closest candidates offered so far.
///
/// Once full, a new candidate replaces the current worst only if it is strictly
/// closer, so among equally distant candidates the earliest offered survive.
/// Capacities are expected to be small (tens), the worst is found by a linear
/// rescan after each replacement.
#[derive(Debug)]
pub struct BoundedNearest<T> {
    candidates: SmallVec<[Candidate<T>; INLINE_CANDIDATES]>,
    capacity: usize,
    worst: usize,
}

impl<T: Copy> BoundedNearest<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            candidates: SmallVec::new(),
            capacity,
            worst: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.candidates.len() >= self.capacity
    }

    /// Distance a candidate has to beat once the selector is full.
    pub fn worst_distance_sq(&self) -> Option<f32> {
        if self.is_full() && self.capacity > 0 {
            Some(self.candidates[self.worst].distance_sq)
        } else {
            None
        }
    }

    /// Returns whether the candidate was kept.
    #[inline]
    pub fn offer(&mut self, value: T, distance_sq: f32) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.candidates.len() < self.capacity {
            self.candidates.push(Candidate { distance_sq, value });
            if self.candidates.len() == self.capacity {
                self.refresh_worst();
            }
            return true;
        }
        if distance_sq < self.candidates[self.worst].distance_sq {
            self.candidates[self.worst] = Candidate { distance_sq, value };
            self.refresh_worst();
            return true;
        }
        false
    }

    fn refresh_worst(&mut self) {
        let mut worst = 0;
        for (i, candidate) in self.candidates.iter().enumerate().skip(1) {
            if candidate.distance_sq > self.candidates[worst].distance_sq {
                worst = i;
            }
        }
        self.worst = worst;
    }

    fn sorted(mut self) -> SmallVec<[Candidate<T>; INLINE_CANDIDATES]> {
        self.candidates
            .sort_by(|a, b| a.distance_sq.total_cmp(&b.distance_sq));
        self.candidates
    }

    /// Writes the kept candidates into `out` nearest first and returns how many
    /// were written.
    pub fn finish(self, out: &mut [T]) -> usize {
        let sorted = self.sorted();
        let count = sorted.len().min(out.len());
        for (slot, candidate) in out.iter_mut().zip(sorted.iter()) {
            *slot = candidate.value;
        }
        count
    }

    /// Kept candidates with their squared distances, nearest first.
    pub fn into_sorted_vec(self) -> Vec<(T, f32)> {
        self.sorted()
            .into_iter()
            .map(|candidate| (candidate.value, candidate.distance_sq))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_then_sorts() {
        let mut selector = BoundedNearest::new(4);
        assert!(selector.offer(1u32, 9.0));
        assert!(selector.offer(2, 1.0));
        assert!(selector.offer(3, 4.0));
        assert!(!selector.is_full());
        assert_eq!(selector.worst_distance_sq(), None);

        let mut out = [0u32; 4];
        assert_eq!(selector.finish(&mut out), 3);
        assert_eq!(&out[..3], &[2, 3, 1]);
    }

    #[test]
    fn replaces_only_strictly_closer() {
        let mut selector = BoundedNearest::new(2);
        selector.offer(1u32, 4.0);
        selector.offer(2, 9.0);
        assert_eq!(selector.worst_distance_sq(), Some(9.0));

        // Equal to the worst: rejected.
        assert!(!selector.offer(3, 9.0));
        assert!(!selector.offer(4, 16.0));
        assert!(selector.offer(5, 1.0));
        assert_eq!(selector.worst_distance_sq(), Some(4.0));

        let kept = selector.into_sorted_vec();
        assert_eq!(kept, vec![(5, 1.0), (1, 4.0)]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut selector = BoundedNearest::new(0);
        assert!(!selector.offer(1u32, 0.0));
        assert!(selector.is_empty());
        assert_eq!(selector.finish(&mut []), 0);
    }

    #[test]
    fn keeps_nearest_across_many_offers() {
        let mut selector = BoundedNearest::new(3);
        for i in (0..100u32).rev() {
            selector.offer(i, (i * i) as f32);
        }
        let mut out = [u32::MAX; 3];
        assert_eq!(selector.finish(&mut out), 3);
        assert_eq!(out, [0, 1, 2]);
    }

    #[test]
    fn spills_past_inline_storage() {
        let mut selector = BoundedNearest::new(100);
        for i in 0..100u32 {
            selector.offer(i, (100 - i) as f32);
        }
        assert_eq!(selector.len(), 100);
        let kept = selector.into_sorted_vec();
        assert_eq!(kept.first(), Some(&(99, 1.0)));
        assert_eq!(kept.last(), Some(&(0, 100.0)));
    }
}
