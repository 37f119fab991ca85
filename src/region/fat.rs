use crate::types::ClusterID;

pub(crate) const END_OF_CHAIN: u16 = 0xFF8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    Free,
    Next(ClusterID),
    BadCluster,
    Last,
}

impl TryFrom<u16> for Entry {
    type Error = u16;
    fn try_from(value: u16) -> Result<Self, u16> {
        match value {
            0 => Ok(Self::Free),
            2..=0xFEF => Ok(Self::Next(ClusterID::from(value as u32))),
            0xFF7 => Ok(Self::BadCluster),
            END_OF_CHAIN..=0xFFF => Ok(Self::Last),
            // 1 and 0xFF0..=0xFF6 are reserved
            _ => Err(value),
        }
    }
}

/// Byte offset of a 12-bit entry, which is floor(cluster * 1.5)
pub(crate) fn offset(cluster_id: ClusterID) -> usize {
    let index = u32::from(cluster_id) as usize;
    index + index / 2
}

/// Decode 12-bit entry packed at `offset`, two adjacent entries share the middle byte
pub(crate) fn decode(cluster_id: ClusterID, bytes: [u8; 2]) -> u16 {
    let (low, high) = (bytes[0] as u16, bytes[1] as u16);
    match u32::from(cluster_id) % 2 {
        0 => low | (high & 0x0F) << 8,
        _ => low >> 4 | high << 4,
    }
}
