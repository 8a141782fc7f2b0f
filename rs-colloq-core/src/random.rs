use std::collections::VecDeque;

use rand::Rng;

/// Source of uniform random integers used by every conversion decision.
///
/// Decisions take `&mut dyn RandomSource` (or a generic bound), so a run can be
/// driven by a real generator, a seeded one, or a fixed script in tests.
pub trait RandomSource {
	/// Returns a uniform integer in `low..high`.
	///
	/// A degenerate range (`high <= low`) yields `low`.
	fn next_in(&mut self, low: usize, high: usize) -> usize;
}

/// Adapter turning any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
	fn next_in(&mut self, low: usize, high: usize) -> usize {
		if high <= low {
			return low;
		}
		self.0.random_range(low..high)
	}
}

/// Replays a fixed sequence of values.
///
/// - Values outside the requested range are clamped into it
/// - Once the script is exhausted, `low` is returned
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
	values: VecDeque<usize>,
}

impl ScriptedRandom {
	pub fn new<I: IntoIterator<Item = usize>>(values: I) -> Self {
		Self { values: values.into_iter().collect() }
	}

	/// Number of values not consumed yet.
	pub fn remaining(&self) -> usize {
		self.values.len()
	}
}

impl RandomSource for ScriptedRandom {
	fn next_in(&mut self, low: usize, high: usize) -> usize {
		if high <= low {
			return low;
		}
		match self.values.pop_front() {
			Some(value) => value.clamp(low, high - 1),
			None => low,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn rng_source_stays_in_range() {
		let mut source = RngSource(StdRng::seed_from_u64(7));
		for _ in 0..1000 {
			let v = source.next_in(1, 101);
			assert!((1..=100).contains(&v));
		}
		assert_eq!(source.next_in(3, 3), 3);
	}

	#[test]
	fn script_is_replayed_and_clamped() {
		let mut script = ScriptedRandom::new([5, 200, 0]);
		assert_eq!(script.next_in(0, 10), 5);
		assert_eq!(script.next_in(1, 101), 100);
		assert_eq!(script.next_in(1, 101), 1);
		assert_eq!(script.remaining(), 0);
		assert_eq!(script.next_in(4, 9), 4);
	}

	#[test]
	fn degenerate_range_does_not_consume() {
		let mut script = ScriptedRandom::new([8]);
		assert_eq!(script.next_in(2, 2), 2);
		assert_eq!(script.remaining(), 1);
	}
}
