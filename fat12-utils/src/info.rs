use std::io;

use fat12::Volume;

use crate::error::Error;

pub fn info<IO>(volume: &Volume<IO>) -> Result<(), Error>
where
    IO: fat12::io::IO<Error = io::Error>,
{
    let boot_sector = volume.boot_sector();
    let geometry = volume.geometry();
    let serial = volume.serial_number();
    println!("OEM name:            {}", boot_sector.oem_name());
    println!("Filesystem type:     {}", boot_sector.filesystem_type());
    println!("Volume label:        {}", volume.volume_label()?);
    println!("Serial number:       {:04X}-{:04X}", serial >> 16, serial & 0xFFFF);
    println!("Media descriptor:    {:#04x}", boot_sector.media);
    println!("Bytes per sector:    {}", geometry.sector_size);
    println!("Sectors per cluster: {}", geometry.sectors_per_cluster);
    println!("Total sectors:       {}", boot_sector.total_sectors());
    println!("FATs:                {} x {} sectors", geometry.number_of_fats, geometry.sectors_per_fat);
    println!("FAT1 start:          {}", geometry.fat1_start);
    println!("FAT2 start:          {}", geometry.fat2_start);
    println!("Root start:          {}", geometry.root_start);
    println!("Root entries:        {}", boot_sector.root_entry_count);
    println!("Data start:          {}", geometry.data_start);
    println!("Clusters:            {}", geometry.available_clusters);
    println!("Data bytes:          {}", geometry.available_bytes);
    Ok(())
}
