use core::fmt;
use core::num::NonZeroU8;

use crate::{PnError, PnResult};

/// Number of pipes in the fixed network.
pub const PIPE_COUNT: usize = 8;

/// Identifier of one of the eight pipes, numbered 1..=8.
///
/// - stored as the 1-based pipe number, so `Option<PipeId>` stays one byte
/// - `index()` gives the 0-based position in flow and resistance vectors
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipeId(NonZeroU8);

impl PipeId {
    /// Create a PipeId from its 1-based pipe number.
    pub fn from_number(number: usize) -> PnResult<Self> {
        u8::try_from(number)
            .ok()
            .filter(|&n| usize::from(n) <= PIPE_COUNT)
            .and_then(NonZeroU8::new)
            .map(Self)
            .ok_or(PnError::IndexOob {
                what: "pipe number",
                index: number,
                len: PIPE_COUNT,
            })
    }

    /// Create a PipeId from a 0-based vector index.
    pub fn from_index(index: usize) -> PnResult<Self> {
        Self::from_number(index + 1)
    }

    /// 1-based pipe number.
    pub fn number(self) -> usize {
        self.0.get() as usize
    }

    /// Recover the 0-based index.
    pub fn index(self) -> usize {
        self.number() - 1
    }

    /// All pipes in ascending order.
    pub fn all() -> impl Iterator<Item = PipeId> {
        (1..=PIPE_COUNT as u8).filter_map(NonZeroU8::new).map(PipeId)
    }
}

impl fmt::Debug for PipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PipeId({})", self.number())
    }
}

impl fmt::Display for PipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}
