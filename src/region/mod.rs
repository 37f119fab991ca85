/// Boot sector, volume geometry parameters
pub mod boot;

/// FAT region, packed 12-bit entries, [`number_of_fats`][link] identical copies
///
/// [link]: boot::BootSector::number_of_fats
pub(crate) mod fat;

/// Root directory region, fixed capacity array of 32-byte records
pub mod data;
