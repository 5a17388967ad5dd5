//! Pure quadrature state decoding.

/// The four quadrature states in rotation order, as `(a, b)` pin levels.
pub const QUADRATURE_STATES: [(bool, bool); 4] =
    [(false, false), (true, false), (true, true), (false, true)];

/// Outcome of one decoded pin sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state did not change (polled faster than the mechanism moved).
    Unchanged,
    /// One quadrature position, signed by direction.
    Step(i8),
    /// The state jumped by two positions: at least one transition was lost
    /// and its direction is ambiguous. The count must not be guessed.
    Missed,
}

/// Decodes successive `(a, b)` samples into signed position steps.
///
/// Pure state machine; the polling loop owns the pins and feeds samples in.
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: usize,
    invert: bool,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the initial pin levels.
    pub fn new(a: bool, b: bool, invert: bool) -> Self {
        Self {
            state: Self::state_index(a, b),
            invert,
        }
    }

    /// Decode the next `(a, b)` sample.
    ///
    /// Computes the signed modular difference between the new and previous
    /// state (mod 4, biased into `[-1, +2]`): `±1` is a step, `+2` is an
    /// ambiguous double transition, `0` is a no-op.
    pub fn update(&mut self, a: bool, b: bool) -> Transition {
        let next = Self::state_index(a, b);
        let diff = (next + QUADRATURE_STATES.len() - self.state) % QUADRATURE_STATES.len();
        self.state = next;

        match diff {
            0 => Transition::Unchanged,
            1 => Transition::Step(self.signed(1)),
            3 => Transition::Step(self.signed(-1)),
            _ => Transition::Missed,
        }
    }

    /// Current state index in `[0, 4)`.
    #[inline]
    pub fn state(&self) -> usize {
        self.state
    }

    #[inline]
    fn signed(&self, delta: i8) -> i8 {
        if self.invert {
            -delta
        } else {
            delta
        }
    }

    fn state_index(a: bool, b: bool) -> usize {
        match (a, b) {
            (false, false) => 0,
            (true, false) => 1,
            (true, true) => 2,
            (false, true) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the decoder through a list of state indices.
    fn feed(decoder: &mut QuadratureDecoder, states: &[usize]) -> Vec<Transition> {
        states
            .iter()
            .map(|&i| {
                let (a, b) = QUADRATURE_STATES[i];
                decoder.update(a, b)
            })
            .collect()
    }

    #[test]
    fn test_forward_sequence() {
        let mut decoder = QuadratureDecoder::new(false, false, false);
        let transitions = feed(&mut decoder, &[1, 2, 3, 0]);
        assert!(transitions.iter().all(|t| *t == Transition::Step(1)));
    }

    #[test]
    fn test_backward_sequence() {
        let mut decoder = QuadratureDecoder::new(false, false, false);
        let transitions = feed(&mut decoder, &[3, 2, 1, 0]);
        assert!(transitions.iter().all(|t| *t == Transition::Step(-1)));
    }

    #[test]
    fn test_unchanged() {
        let mut decoder = QuadratureDecoder::new(true, true, false);
        assert_eq!(decoder.update(true, true), Transition::Unchanged);
    }

    #[test]
    fn test_double_jump_is_missed() {
        let mut decoder = QuadratureDecoder::new(false, false, false);
        // 0 -> 2 skips a state in an unknowable direction.
        assert_eq!(decoder.update(true, true), Transition::Missed);
        // The decoder resynchronizes on the landed state.
        assert_eq!(decoder.update(false, true), Transition::Step(1));
    }

    #[test]
    fn test_invert_flips_sign() {
        let mut decoder = QuadratureDecoder::new(false, false, true);
        assert_eq!(decoder.update(true, false), Transition::Step(-1));
        assert_eq!(decoder.update(false, false), Transition::Step(1));
    }
}
