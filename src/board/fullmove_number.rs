/// Starts at 1 and increments after black moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FullmoveNumber(u16);

impl Default for FullmoveNumber {
    fn default() -> Self {
        Self(1)
    }
}

impl FullmoveNumber {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u16> for FullmoveNumber {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
