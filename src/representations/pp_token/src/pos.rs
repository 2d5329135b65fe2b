use derive_more::{Display, From, Into};
use std::ops::{Add, Sub};

/// Zero-based byte offset into the source text
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Display,
)]
pub struct Pos(pub usize);

impl Pos {
    pub const START: Pos = Pos(0);
}

impl Add<usize> for Pos {
    type Output = Pos;

    fn add(self, rhs: usize) -> Self::Output {
        Pos(self.0 + rhs)
    }
}

impl Sub for Pos {
    type Output = usize;

    fn sub(self, rhs: Pos) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}
