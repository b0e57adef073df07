/// Bit-packed triangular table holding one flag per unordered pair of distinct states.
///
/// The pair `{p, q}` with `p < q` is stored at `q * (q - 1) / 2 + p`.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub(crate) struct PairTable {
    bits: Vec<u64>,
    number_of_states: usize,
}

impl PairTable {
    #[inline]
    pub fn new(number_of_states: usize) -> Self {
        let n = number_of_states * number_of_states.saturating_sub(1) / 2;
        let nblocks = if n % 64 == 0 { n / 64 } else { n / 64 + 1 };
        PairTable {
            bits: vec![0_u64; nblocks],
            number_of_states,
        }
    }

    #[inline]
    fn index(state_1: usize, state_2: usize) -> usize {
        let (low, high) = if state_1 < state_2 {
            (state_1, state_2)
        } else {
            (state_2, state_1)
        };
        high * (high - 1) / 2 + low
    }

    #[inline]
    pub fn number_of_states(&self) -> usize {
        self.number_of_states
    }

    /// A state is never distinguishable from itself.
    #[inline]
    pub fn is_marked(&self, state_1: usize, state_2: usize) -> bool {
        if state_1 == state_2 {
            return false;
        }
        let i = Self::index(state_1, state_2);
        let w = i / 64;
        let b = i % 64;
        (self.bits[w] & (1 << b)) != 0
    }

    /// Mark the pair, return `true` if it was not marked before.
    #[inline]
    pub fn mark(&mut self, state_1: usize, state_2: usize) -> bool {
        debug_assert_ne!(state_1, state_2);
        let i = Self::index(state_1, state_2);
        let w = i / 64;
        let flag = 1 << (i % 64);
        let was_marked = self.bits[w] & flag != 0;
        self.bits[w] |= flag;
        !was_marked
    }

    #[inline]
    pub fn count_marked(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}
