// Boot sector with BIOS parameter block

use crate::error::DataError;

pub(crate) const SIGNATURE: [u8; 2] = hex!("55 AA");

mod field {
    use crate::endian::Field;

    pub const JUMP_BOOT: Field<[u8; 3]> = Field::at(0);
    pub const OEM_NAME: Field<[u8; 8]> = Field::at(3);
    pub const BYTES_PER_SECTOR: Field<u16> = Field::at(11);
    pub const SECTORS_PER_CLUSTER: Field<u8> = Field::at(13);
    pub const RESERVED_SECTORS: Field<u16> = Field::at(14);
    pub const NUMBER_OF_FATS: Field<u8> = Field::at(16);
    pub const ROOT_ENTRY_COUNT: Field<u16> = Field::at(17);
    pub const TOTAL_SECTORS_16: Field<u16> = Field::at(19);
    pub const MEDIA: Field<u8> = Field::at(21);
    pub const SECTORS_PER_FAT: Field<u16> = Field::at(22);
    pub const SECTORS_PER_TRACK: Field<u16> = Field::at(24);
    pub const NUMBER_OF_HEADS: Field<u16> = Field::at(26);
    pub const HIDDEN_SECTORS: Field<u32> = Field::at(28);
    pub const TOTAL_SECTORS_32: Field<u32> = Field::at(32);
    pub const DRIVE_NUMBER: Field<u8> = Field::at(36);
    pub const CHS_HEAD: Field<u8> = Field::at(37);
    pub const EXTENDED_SIGNATURE: Field<u8> = Field::at(38);
    pub const VOLUME_ID: Field<u32> = Field::at(39);
    pub const VOLUME_LABEL: Field<[u8; 11]> = Field::at(43);
    pub const FILESYSTEM_TYPE: Field<[u8; 8]> = Field::at(54);
    // 448 bytes boot code in between
    pub const SIGNATURE: Field<[u8; 2]> = Field::at(510);
}

/// Decoded copy of boot sector, boot code excluded
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BootSector {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub number_of_fats: u8,
    pub root_entry_count: u16,
    pub total_sectors_16: u16, // zero if total_sectors_32 used
    pub media: u8,
    pub sectors_per_fat: u16,
    pub sectors_per_track: u16,
    pub number_of_heads: u16,
    pub hidden_sectors: u32,
    pub total_sectors_32: u32,
    pub drive_number: u8,
    pub chs_head: u8,
    pub extended_signature: u8,
    pub volume_id: u32,
    pub volume_label: [u8; 11],
    pub filesystem_type: [u8; 8],
    pub signature: [u8; 2],
}

impl BootSector {
    /// Caller guarantees bytes.len() >= 512
    pub(crate) fn parse(bytes: &[u8]) -> Self {
        Self {
            jump_boot: field::JUMP_BOOT.get(bytes),
            oem_name: field::OEM_NAME.get(bytes),
            bytes_per_sector: field::BYTES_PER_SECTOR.get(bytes),
            sectors_per_cluster: field::SECTORS_PER_CLUSTER.get(bytes),
            reserved_sectors: field::RESERVED_SECTORS.get(bytes),
            number_of_fats: field::NUMBER_OF_FATS.get(bytes),
            root_entry_count: field::ROOT_ENTRY_COUNT.get(bytes),
            total_sectors_16: field::TOTAL_SECTORS_16.get(bytes),
            media: field::MEDIA.get(bytes),
            sectors_per_fat: field::SECTORS_PER_FAT.get(bytes),
            sectors_per_track: field::SECTORS_PER_TRACK.get(bytes),
            number_of_heads: field::NUMBER_OF_HEADS.get(bytes),
            hidden_sectors: field::HIDDEN_SECTORS.get(bytes),
            total_sectors_32: field::TOTAL_SECTORS_32.get(bytes),
            drive_number: field::DRIVE_NUMBER.get(bytes),
            chs_head: field::CHS_HEAD.get(bytes),
            extended_signature: field::EXTENDED_SIGNATURE.get(bytes),
            volume_id: field::VOLUME_ID.get(bytes),
            volume_label: field::VOLUME_LABEL.get(bytes),
            filesystem_type: field::FILESYSTEM_TYPE.get(bytes),
            signature: field::SIGNATURE.get(bytes),
        }
    }

    /// Rejects anything that is not a FAT12 boot sector this crate can mount,
    /// checks happen in a fixed order and the first failure wins
    pub(crate) fn validate(&self) -> Result<(), DataError> {
        if self.signature != SIGNATURE {
            return Err(DataError::BootSignature);
        }
        if !matches!(self.extended_signature, 0x28 | 0x29) {
            return Err(DataError::ExtendedSignature);
        }
        match (self.total_sectors_16, self.total_sectors_32) {
            (0, 0) | (1.., 1..) => return Err(DataError::SectorCount),
            // 16-bit field shall be used when it fits
            (0, count) if count <= u16::MAX as u32 => return Err(DataError::SectorCount),
            _ => (),
        }
        if self.reserved_sectors == 0 {
            return Err(DataError::ReservedSectors);
        }
        if !matches!(self.number_of_fats, 1 | 2) {
            return Err(DataError::FATCount);
        }
        if !(1..=128).contains(&self.sectors_per_cluster) {
            return Err(DataError::SectorsPerCluster);
        }
        if !self.bytes_per_sector.is_power_of_two() || !(512..=4096).contains(&self.bytes_per_sector)
        {
            return Err(DataError::BytesPerSector);
        }
        let root_directory_size = self.root_entry_count as u32 * 32;
        if root_directory_size % self.bytes_per_sector as u32 != 0 {
            return Err(DataError::RootDirectoryAlignment);
        }
        if self.sectors_per_fat == 0 || self.root_entry_count == 0 {
            return Err(DataError::Layout);
        }
        Ok(())
    }

    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors_16 {
            0 => self.total_sectors_32,
            count => count as u32,
        }
    }

    /// Volume label with trailing spaces trimmed
    pub fn volume_label(&self) -> heapless::String<11> {
        trimmed(&self.volume_label)
    }

    /// Informational only, usually "FAT12   "
    pub fn filesystem_type(&self) -> heapless::String<8> {
        trimmed(&self.filesystem_type)
    }

    pub fn oem_name(&self) -> heapless::String<8> {
        trimmed(&self.oem_name)
    }
}

fn trimmed<const N: usize>(bytes: &[u8; N]) -> heapless::String<N> {
    let mut string = heapless::String::new();
    let length = bytes.iter().rposition(|&b| b != b' ').map(|i| i + 1).unwrap_or(0);
    for &byte in bytes[..length].iter().filter(|b| b.is_ascii()) {
        string.push(byte as char).ok();
    }
    string
}
