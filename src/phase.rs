/// The coil patterns for each of the 6 electrical states, in forward order.
///
/// Bit `n` of a pattern is the level of coil line `n`.
///
/// ```text
/// State  3 2 1 0   Value
/// 0      1 0 0 1   0x9
/// 1      0 0 0 1   0x1
/// 2      0 1 1 1   0x7
/// 3      0 1 1 0   0x6
/// 4      1 1 1 0   0xE
/// 5      1 0 0 0   0x8
/// ```
pub const PHASE_PATTERNS: [u8; 6] = [0x9, 0x1, 0x7, 0x6, 0xE, 0x8];

const PHASE_COUNT: u8 = PHASE_PATTERNS.len() as u8;

/// One of the 6 electrical states in the excitation cycle.
///
/// Each transition to a neighbouring state moves the rotor by exactly one
/// step.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Phase(u8);

impl Phase {
    /// Get the phase at `index`, wrapping around the cycle.
    pub fn from_index(index: usize) -> Phase {
        Phase((index % PHASE_COUNT as usize) as u8)
    }

    /// The position of this phase within the cycle, in `0..6`.
    pub fn index(self) -> usize { self.0 as usize }

    /// The 4-bit coil pattern for this phase.
    pub fn pattern(self) -> u8 { PHASE_PATTERNS[self.index()] }

    /// The phase one step further forward.
    pub fn forward(self) -> Phase { Phase((self.0 + 1) % PHASE_COUNT) }

    /// The phase one step backward.
    pub fn backward(self) -> Phase {
        Phase((self.0 + PHASE_COUNT - 1) % PHASE_COUNT)
    }
}
