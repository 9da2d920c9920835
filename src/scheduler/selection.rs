//! Round-robin method sequencing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::types::Method;

/// Iterator handing out methods pass by pass.
///
/// With `randomize` each pass visits the methods in a freshly shuffled
/// order, otherwise in the given order. With `repeat` the passes go on
/// forever, otherwise the iterator ends after one pass.
///
/// Obtained from [`Scheduler::next_method`](super::Scheduler::next_method)
/// or built directly:
///
/// ```
/// use u_scheduler::scheduler::{Method, MethodResult, MethodSequence};
///
/// let noop = |_: &mut f64, _: &usize, _: &mut MethodResult| {};
/// let methods = vec![Method::new("a", noop, 0), Method::new("b", noop, 1)];
/// let names: Vec<String> = MethodSequence::new(&methods, false, false, 0)
///     .map(|m| m.name().to_string())
///     .collect();
/// assert_eq!(names, ["a", "b"]);
/// ```
pub struct MethodSequence<S, P = usize> {
    methods: Vec<Method<S, P>>,
    randomize: bool,
    repeat: bool,
    pos: usize,
    passes: usize,
    rng: StdRng,
}

impl<S, P: Clone> MethodSequence<S, P> {
    pub fn new(methods: &[Method<S, P>], randomize: bool, repeat: bool, seed: u64) -> Self {
        Self::with_rng(methods, randomize, repeat, StdRng::seed_from_u64(seed))
    }

    pub(crate) fn with_rng(
        methods: &[Method<S, P>],
        randomize: bool,
        repeat: bool,
        rng: StdRng,
    ) -> Self {
        Self {
            methods: methods.to_vec(),
            randomize,
            repeat,
            pos: 0,
            passes: 0,
            rng,
        }
    }

    /// Number of passes started so far.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl<S, P: Clone> Iterator for MethodSequence<S, P> {
    type Item = Method<S, P>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.methods.is_empty() {
            return None;
        }
        if self.pos == self.methods.len() {
            if !self.repeat {
                return None;
            }
            self.pos = 0;
        }
        if self.pos == 0 {
            if self.randomize {
                self.methods.shuffle(&mut self.rng);
            }
            self.passes += 1;
        }
        let method = self.methods[self.pos].clone();
        self.pos += 1;
        Some(method)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.methods.is_empty() {
            (0, Some(0))
        } else if self.repeat {
            (usize::MAX, None)
        } else if self.passes == 0 {
            (self.methods.len(), Some(self.methods.len()))
        } else {
            let left = self.methods.len() - self.pos;
            (left, Some(left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::MethodResult;

    fn methods(n: usize) -> Vec<Method<f64>> {
        (0..n)
            .map(|i| {
                Method::new(
                    format!("m{i}"),
                    |_: &mut f64, _: &usize, _: &mut MethodResult| {},
                    i,
                )
            })
            .collect()
    }

    fn names(seq: impl Iterator<Item = Method<f64>>) -> Vec<String> {
        seq.map(|m| m.name().to_string()).collect()
    }

    #[test]
    fn test_single_pass_in_order() {
        let ms = methods(4);
        let seq = MethodSequence::new(&ms, false, false, 1);
        assert_eq!(names(seq), ["m0", "m1", "m2", "m3"]);
    }

    #[test]
    fn test_single_pass_randomized_is_permutation() {
        let ms = methods(6);
        let mut got = names(MethodSequence::new(&ms, true, false, 3));
        got.sort();
        assert_eq!(got, names(ms.into_iter()));
    }

    #[test]
    fn test_repeat_in_order_cycles() {
        let ms = methods(3);
        let got = names(MethodSequence::new(&ms, false, true, 0).take(7));
        assert_eq!(got, ["m0", "m1", "m2", "m0", "m1", "m2", "m0"]);
    }

    #[test]
    fn test_repeat_randomized_blocks_are_permutations() {
        let ms = methods(5);
        let mut seq = MethodSequence::new(&ms, true, true, 42);
        for _ in 0..20 {
            let mut block = names(seq.by_ref().take(5));
            block.sort();
            assert_eq!(block, ["m0", "m1", "m2", "m3", "m4"]);
        }
        assert_eq!(seq.passes(), 20);
    }

    #[test]
    fn test_empty_methods() {
        let ms = methods(0);
        assert!(MethodSequence::new(&ms, true, true, 0).next().is_none());
    }

    #[test]
    fn test_size_hint_single_pass() {
        let ms = methods(3);
        let mut seq = MethodSequence::new(&ms, false, false, 0);
        assert_eq!(seq.size_hint(), (3, Some(3)));
        seq.next();
        assert_eq!(seq.size_hint(), (2, Some(2)));
    }
}
