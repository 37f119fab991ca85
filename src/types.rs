use derive_more::{Display, From, Into};

/// Sector index, in units of the sector size the read is issued with
#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct SectorID(u64);

impl<I: Into<u64>> core::ops::Add<I> for SectorID {
    type Output = Self;

    fn add(self, rhs: I) -> Self {
        Self(self.0 + rhs.into())
    }
}

#[derive(Copy, Clone, Debug, Default, Display, From, Into, Eq, Ord, PartialOrd, PartialEq)]
pub struct ClusterID(u32);

impl ClusterID {
    /// Cluster numbering of data region starts from 2
    pub const FIRST: Self = Self(2);

    /// Zero marks an empty file
    pub fn valid(&self) -> bool {
        self.0 > 0
    }

    pub(crate) fn offset(self) -> u32 {
        self.0 - Self::FIRST.0
    }
}
