//! Declaration-order tracking.
//!
//! Argument declaration order matters for positional parsing and for help
//! text, but the registration API alone cannot see the order of fields
//! declared across an extension chain. Each [`Argument`](crate::Argument)
//! therefore takes a sequence number from the process-wide [`Sequencer`]
//! at construction time; resolved argument lists are sorted by it.

use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: Sequencer = Sequencer::new();

/// Monotonic sequence-number source.
///
/// Numbers start at 0 and strictly increase for the lifetime of the
/// sequencer. `next` is safe to call from multiple threads: no two calls
/// ever observe the same number, and calls made by a single thread
/// observe increasing numbers in call order.
///
/// # Examples
///
/// ```
/// use commandeer_core::Sequencer;
///
/// let seq = Sequencer::new();
/// let a = seq.next();
/// let b = seq.next();
/// assert!(b > a);
/// ```
#[derive(Debug)]
pub struct Sequencer {
    next: AtomicU64,
}

impl Sequencer {
    /// Creates a sequencer starting at 0.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// The process-wide sequencer used by argument construction.
    ///
    /// Lives for the whole process and is never reset.
    pub fn global() -> &'static Sequencer {
        &GLOBAL
    }

    /// Returns the next sequence number.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_single_thread_numbers_increase_in_call_order() {
        let seq = Sequencer::new();
        let numbers: Vec<u64> = (0..100).map(|_| seq.next()).collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(numbers[0], 0);
    }

    #[test]
    fn test_concurrent_numbers_are_pairwise_distinct() {
        let seq = Arc::new(Sequencer::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(std::thread::spawn(move || {
                (0..200).map(|_| seq.next()).collect::<Vec<u64>>()
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            let numbers = handle.join().expect("sequencer thread panicked");
            // Per-thread subsequences stay ordered.
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            all.extend(numbers);
        }

        let distinct: HashSet<u64> = all.iter().copied().collect();
        assert_eq!(distinct.len(), all.len());
    }
}
