/// Plies since the last capture or pawn move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HalfmoveClock(u16);

impl HalfmoveClock {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn reset(self) -> Self {
        Self(0)
    }
}

impl From<u16> for HalfmoveClock {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
