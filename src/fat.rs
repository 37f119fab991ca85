use alloc::vec::Vec;
use core::ops::Deref;

use crate::error::{AllocationError, DataError, Error, InputError};
use crate::region::fat::{decode, offset, Entry};
use crate::types::ClusterID;

/// Clusters of a file, first to last
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClusterChain(Vec<ClusterID>);

impl Deref for ClusterChain {
    type Target = [ClusterID];

    fn deref(&self) -> &[ClusterID] {
        &self.0
    }
}

/// Walks a cluster chain without collecting it
#[derive(Clone)]
struct Walk<'a> {
    fat: &'a [u8],
    next: Option<ClusterID>,
    num_clusters: u32,
    max_clusters: u32,
    entry_count: u32,
}

impl<'a> Walk<'a> {
    fn successor(&self, cluster_id: ClusterID) -> Result<Option<ClusterID>, DataError> {
        let offset = offset(cluster_id);
        if offset + 1 >= self.fat.len() {
            warn!("Cluster {} points outside of FAT", cluster_id);
            return Err(DataError::FATRange);
        }
        let value = decode(cluster_id, [self.fat[offset], self.fat[offset + 1]]);
        match Entry::try_from(value) {
            Ok(Entry::Next(next)) => Ok(Some(next)),
            Ok(Entry::Last) => Ok(None),
            entry => {
                warn!("Unexpected FAT entry {:?} after cluster {}", entry, cluster_id);
                Err(DataError::FATChain)
            }
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Result<ClusterID, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cluster_id = self.next.take()?;
        let index = u32::from(cluster_id);
        if index < u32::from(ClusterID::FIRST) || index >= self.entry_count {
            warn!("Cluster {} out of range [2, {})", cluster_id, self.entry_count);
            return Some(Err(DataError::FATChain));
        }
        // A chain longer than number of data clusters must contain a cycle
        self.num_clusters += 1;
        if self.num_clusters > self.max_clusters {
            warn!("Cluster chain loops at cluster {}", cluster_id);
            return Some(Err(DataError::FATChain));
        }
        match self.successor(cluster_id) {
            Ok(next) => self.next = next,
            Err(e) => return Some(Err(e)),
        }
        Some(Ok(cluster_id))
    }
}

/// Resolve cluster chain starting from `first`.
///
/// `entry_count` is number of FAT entries in use, which bounds both
/// cluster numbers and chain length
pub fn resolve_chain<E>(
    fat: &[u8],
    first: ClusterID,
    entry_count: u32,
) -> Result<ClusterChain, Error<E>> {
    if !first.valid() {
        return Err(InputError::ZeroCluster.into());
    }
    if fat.is_empty() {
        return Err(InputError::EmptyFAT.into());
    }
    // Each entry takes 1.5 bytes, a longer chain cannot be free of cycles
    let data_clusters = entry_count.saturating_sub(u32::from(ClusterID::FIRST));
    let max_clusters = core::cmp::min(data_clusters, (fat.len() * 2 / 3) as u32);
    let walk = Walk { fat, next: Some(first), num_clusters: 0, max_clusters, entry_count };
    let length = walk.clone().try_fold(0usize, |length, result| result.map(|_| length + 1))?;
    let mut clusters = Vec::new();
    clusters.try_reserve_exact(length).map_err(|_| AllocationError::OutOfMemory)?;
    for cluster_id in walk {
        clusters.push(cluster_id?);
    }
    trace!("Cluster chain from {} has {} clusters", first, clusters.len());
    Ok(ClusterChain(clusters))
}

/// One copy of file allocation table
#[derive(Clone, Debug)]
pub(crate) struct FAT {
    bytes: Vec<u8>,
    entry_count: u32,
}

impl FAT {
    pub fn new(bytes: Vec<u8>, entry_count: u32) -> Self {
        Self { bytes, entry_count }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn chain<E>(&self, first: ClusterID) -> Result<ClusterChain, Error<E>> {
        resolve_chain(&self.bytes, first, self.entry_count)
    }
}

#[cfg(test)]
mod test {
    use super::resolve_chain;
    use crate::error::{DataError, Error, ErrorKind};
    use crate::testing::FATBuilder;
    use crate::types::ClusterID;

    fn chain(fat: &[u8], first: u32, entry_count: u32) -> Result<Vec<u32>, Error<()>> {
        let chain = resolve_chain(fat, first.into(), entry_count)?;
        Ok(chain.iter().map(|&c| u32::from(c)).collect())
    }

    #[test]
    fn test_single_cluster() {
        let mut fat = FATBuilder::new(16);
        fat.set(2, 0xFFF);
        assert_eq!(chain(fat.bytes(), 2, 10), Ok(vec![2]));
    }

    #[test]
    fn test_fragmented() {
        let mut fat = FATBuilder::new(16);
        fat.set(2, 5);
        fat.set(5, 3);
        fat.set(3, 8);
        fat.set(8, 0xFF8);
        assert_eq!(chain(fat.bytes(), 2, 10), Ok(vec![2, 5, 3, 8]));
        assert_eq!(chain(fat.bytes(), 3, 10), Ok(vec![3, 8]));
    }

    #[test]
    fn test_invalid_argument() {
        let mut fat = FATBuilder::new(16);
        fat.set(2, 0xFFF);
        let error = chain(fat.bytes(), 0, 10).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        let error = chain(&[], 2, 10).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_cycle() {
        let mut fat = FATBuilder::new(16);
        fat.set(2, 3);
        fat.set(3, 4);
        fat.set(4, 2);
        let error = chain(fat.bytes(), 2, 10).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        // Self loop
        fat.set(5, 5);
        let error = chain(fat.bytes(), 5, 10).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_malformed_successor() {
        let mut fat = FATBuilder::new(16);
        for value in [0x000, 0x001, 0xFF0, 0xFF7] {
            fat.set(2, value);
            let error = chain(fat.bytes(), 2, 10).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidFormat, "value {:#x}", value);
        }
        // Beyond entries in use
        fat.set(2, 9);
        fat.set(9, 0xFFF);
        assert_eq!(chain(fat.bytes(), 2, 10), Ok(vec![2, 9]));
        fat.set(2, 10);
        let error = chain(fat.bytes(), 2, 10).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_out_of_fat() {
        // 6 bytes hold entries 0..4, cluster 3 needs bytes 4 and 5
        let mut fat = FATBuilder::new(4);
        fat.set(2, 3);
        fat.set(3, 0xFFF);
        let bytes = &fat.bytes()[..5];
        let error = chain(bytes, 2, u32::MAX).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Range);
        let error = resolve_chain::<()>(bytes, ClusterID::FIRST, 100).unwrap_err();
        assert_eq!(error, Error::Data(DataError::FATRange));
    }
}
