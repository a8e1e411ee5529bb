use std::fmt;

use serde::Serialize;

use crate::error::InvariantError;

/// Genus of a closed orientable surface. Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Genus(u32);

impl Genus {
    pub const fn new(g: u32) -> Self {
        Genus(g)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Ascending genera in `[min, max]`. Empty when `min > max`.
    pub fn range(min: u32, max: u32) -> impl DoubleEndedIterator<Item = Genus> {
        (min..=max).map(Genus)
    }
}

impl TryFrom<i64> for Genus {
    type Error = InvariantError;

    fn try_from(g: i64) -> Result<Self, Self::Error> {
        if g < 0 {
            return Err(InvariantError::Domain {
                genus: g,
                reason: "genus must be non-negative".into(),
            });
        }
        u32::try_from(g).map(Genus).map_err(|_| InvariantError::Domain {
            genus: g,
            reason: format!("genus exceeds {}", u32::MAX),
        })
    }
}

impl From<Genus> for u32 {
    fn from(g: Genus) -> u32 {
        g.0
    }
}

impl fmt::Display for Genus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
