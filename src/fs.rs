use crate::error::DataError;
use crate::io::BOOT_SECTOR_SIZE;
use crate::region::boot::BootSector;
use crate::types::{ClusterID, SectorID};

/// Volumes with this many clusters or more are FAT16
pub const MAX_CLUSTERS: u64 = 4084;

/// Region layout derived from boot sector.
///
/// Region offsets are in sectors from volume start, use [`Geometry::absolute`]
/// for sector id on the byte store
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub sector_size: u16,
    pub sectors_per_cluster: u8,
    pub sectors_per_fat: u16,
    pub number_of_fats: u8,
    pub(crate) base: SectorID,
    pub fat1_start: SectorID,
    pub fat2_start: SectorID,
    pub root_start: SectorID,
    pub root_sectors: u64,
    pub data_start: SectorID,
    pub available_clusters: u64,
    pub available_sectors: u64,
    pub available_bytes: u64,
    pub fat_entry_count: u64,
}

impl Geometry {
    /// `start` is in units of boot sector size, since sector size is unknown yet
    pub(crate) fn new(boot_sector: &BootSector, start: SectorID) -> Result<Self, DataError> {
        let sector_size = boot_sector.bytes_per_sector;
        let start_bytes = u64::from(start) * BOOT_SECTOR_SIZE as u64;
        if start_bytes % sector_size as u64 != 0 {
            return Err(DataError::VolumeAlignment);
        }
        let base = SectorID::from(start_bytes / sector_size as u64);

        let sectors_per_fat = boot_sector.sectors_per_fat as u64;
        // Two FAT regions are laid out whatever the copy count says
        let fat1_start = SectorID::from(boot_sector.reserved_sectors as u64);
        let fat2_start = fat1_start + sectors_per_fat;
        let root_start = fat2_start + sectors_per_fat;
        let root_sectors = boot_sector.root_entry_count as u64 * 32 / sector_size as u64;
        let data_start = root_start + root_sectors;

        let total_sectors = boot_sector.total_sectors() as u64;
        let data_sectors = total_sectors.checked_sub(u64::from(data_start));
        let data_sectors = data_sectors.ok_or(DataError::Layout)?;
        let sectors_per_cluster = boot_sector.sectors_per_cluster;
        let available_clusters = data_sectors / sectors_per_cluster as u64;
        if available_clusters > MAX_CLUSTERS {
            return Err(DataError::ClusterCount);
        }
        let available_sectors = available_clusters * sectors_per_cluster as u64;
        Ok(Self {
            sector_size,
            sectors_per_cluster,
            sectors_per_fat: boot_sector.sectors_per_fat,
            number_of_fats: boot_sector.number_of_fats,
            base,
            fat1_start,
            fat2_start,
            root_start,
            root_sectors,
            data_start,
            available_clusters,
            available_sectors,
            available_bytes: available_sectors * sector_size as u64,
            fat_entry_count: available_clusters + u32::from(ClusterID::FIRST) as u64,
        })
    }

    pub fn cluster_size(&self) -> usize {
        self.sector_size as usize * self.sectors_per_cluster as usize
    }

    pub fn fat_size(&self) -> usize {
        self.sector_size as usize * self.sectors_per_fat as usize
    }

    pub fn root_size(&self) -> usize {
        self.sector_size as usize * self.root_sectors as usize
    }

    /// Sector id on byte store of a sector relative to volume start
    pub fn absolute(&self, sector_id: SectorID) -> SectorID {
        sector_id + u64::from(self.base)
    }

    /// First sector of cluster, relative to volume start
    pub fn cluster_sector(&self, cluster_id: ClusterID) -> SectorID {
        let num_sectors = cluster_id.offset() as u64 * self.sectors_per_cluster as u64;
        self.data_start + num_sectors
    }
}
