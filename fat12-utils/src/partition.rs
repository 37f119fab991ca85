use std::fs;
use std::io::Read;

use mbr_nostd::{MasterBootRecord, PartitionTable};

use crate::error::Error;

/// First sector of an MBR partition, in units of 512 bytes
pub fn start_sector(device: &str, partition: usize) -> Result<u64, Error> {
    let mut buffer = [0u8; 512];
    fs::File::open(device)?.read_exact(&mut buffer)?;
    let mbr = MasterBootRecord::from_bytes(&buffer).map_err(|_| Error::String("Not MBR"))?;
    let entries = mbr.partition_table_entries();
    let entry = entries.get(partition).ok_or(Error::String("Partition out of range"))?;
    if entry.sector_count == 0 {
        return Err(Error::String("Invalid partition"));
    }
    trace!("Partition {} offset {} num-sectors {}", partition, entry.logical_block_address, entry.sector_count);
    Ok(entry.logical_block_address as u64)
}
