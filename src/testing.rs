// In-memory FAT12 images for tests

use crate::io::memory::MemoryIO;
use crate::region::data::{DirectoryEntry, FileAttributes, RawEntry, ENTRY_SIZE};
use crate::types::ClusterID;

const SECTOR_SIZE: usize = 512;
const FAT1: usize = SECTOR_SIZE;
const FAT2: usize = 10 * SECTOR_SIZE;
const ROOT: usize = 19 * SECTOR_SIZE;
const DATA: usize = 33 * SECTOR_SIZE;

/// Store a 12-bit value, leaving the neighbour entry sharing the middle byte intact
fn pack(bytes: &mut [u8], cluster: u32, value: u16) {
    let offset = (cluster + cluster / 2) as usize;
    match cluster % 2 {
        0 => {
            bytes[offset] = value as u8;
            bytes[offset + 1] = (bytes[offset + 1] & 0xF0) | (value >> 8 & 0x0F) as u8;
        }
        _ => {
            bytes[offset] = (bytes[offset] & 0x0F) | ((value & 0x0F) << 4) as u8;
            bytes[offset + 1] = (value >> 4) as u8;
        }
    }
}

pub(crate) struct FATBuilder(Vec<u8>);

impl FATBuilder {
    pub fn new(num_entries: usize) -> Self {
        Self(vec![0; (num_entries * 3 + 1) / 2])
    }

    pub fn set(&mut self, cluster: u32, value: u16) {
        pack(&mut self.0, cluster, value)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

/// 1.44 MB floppy: 2880 sectors of 512 bytes, 1 sector per cluster, 2 FATs of 9 sectors,
/// 224 root entries
pub(crate) struct Image {
    bytes: Vec<u8>,
    next_slot: usize,
    next_cluster: u32,
}

impl Image {
    pub fn floppy() -> Self {
        let mut bytes = vec![0u8; 2880 * SECTOR_SIZE];
        bytes[..3].copy_from_slice(&hex!("EB 3C 90"));
        bytes[3..11].copy_from_slice(b"MSDOS5.0");
        bytes[11..13].copy_from_slice(&512u16.to_le_bytes());
        bytes[13] = 1;
        bytes[14..16].copy_from_slice(&1u16.to_le_bytes());
        bytes[16] = 2;
        bytes[17..19].copy_from_slice(&224u16.to_le_bytes());
        bytes[19..21].copy_from_slice(&2880u16.to_le_bytes());
        bytes[21] = 0xF0;
        bytes[22..24].copy_from_slice(&9u16.to_le_bytes());
        bytes[24..26].copy_from_slice(&18u16.to_le_bytes());
        bytes[26..28].copy_from_slice(&2u16.to_le_bytes());
        bytes[38] = 0x29;
        bytes[39..43].copy_from_slice(&0x1234ABCDu32.to_le_bytes());
        bytes[43..54].copy_from_slice(b"TESTVOLUME ");
        bytes[54..62].copy_from_slice(b"FAT12   ");
        bytes[510..512].copy_from_slice(&hex!("55 AA"));
        for fat in [FAT1, FAT2] {
            bytes[fat..fat + 3].copy_from_slice(&hex!("F0 FF FF"));
        }
        Self { bytes, next_slot: 0, next_cluster: 2 }
    }

    pub fn set(&mut self, offset: usize, bytes: &[u8]) {
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Same entry in both FAT copies
    pub fn set_fat(&mut self, cluster: u32, value: u16) {
        pack(&mut self.bytes[FAT1..FAT2], cluster, value);
        pack(&mut self.bytes[FAT2..ROOT], cluster, value);
    }

    pub fn write_cluster(&mut self, cluster: u32, content: &[u8]) {
        assert!(content.len() <= SECTOR_SIZE);
        self.set(DATA + (cluster as usize - 2) * SECTOR_SIZE, content);
    }

    pub fn add_slot(&mut self, raw: &RawEntry) {
        self.set(ROOT + self.next_slot * ENTRY_SIZE, raw);
        self.next_slot += 1;
    }

    fn allocate(&mut self, num_clusters: usize) -> u32 {
        let first = self.next_cluster;
        for i in 0..num_clusters as u32 {
            let cluster = first + i;
            let next = if i + 1 == num_clusters as u32 { 0xFFF } else { cluster as u16 + 1 };
            self.set_fat(cluster, next);
        }
        self.next_cluster += num_clusters as u32;
        first
    }

    /// File on contiguous clusters, returns first cluster
    pub fn add_file(&mut self, name: &str, content: &[u8]) -> u32 {
        let num_clusters = (content.len() + SECTOR_SIZE - 1) / SECTOR_SIZE;
        let first = match num_clusters {
            0 => 0,
            n => self.allocate(n),
        };
        for (i, chunk) in content.chunks(SECTOR_SIZE).enumerate() {
            self.write_cluster(first + i as u32, chunk);
        }
        let attributes = FileAttributes::new(false);
        let entry = DirectoryEntry::new(name, attributes, ClusterID::from(first), content.len() as u32);
        self.add_slot(&entry.unwrap().to_bytes());
        first
    }

    pub fn add_directory(&mut self, name: &str) -> u32 {
        let first = self.allocate(1);
        let entry = DirectoryEntry::new(name, FileAttributes::new(true), first.into(), 0);
        self.add_slot(&entry.unwrap().to_bytes());
        first
    }

    pub fn into_io(self) -> MemoryIO<Vec<u8>> {
        MemoryIO::new(self.bytes)
    }

    #[cfg(not(feature = "async"))]
    pub fn mount(self) -> crate::Volume<MemoryIO<Vec<u8>>> {
        crate::Volume::mount(self.into_io(), 0).unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::{FATBuilder, Image};

    #[test]
    fn test_pack() {
        let mut fat = FATBuilder::new(4);
        fat.set(2, 0x003);
        fat.set(3, 0xFFF);
        assert_eq!(&fat.bytes()[3..], &hex!("03 F0 FF"));
        fat.set(2, 0xABC);
        assert_eq!(&fat.bytes()[3..], &hex!("BC FA FF"));
    }

    #[test]
    fn test_add_file() {
        let mut image = Image::floppy();
        assert_eq!(image.add_file("A.TXT", &[0x41; 1000]), 2);
        assert_eq!(image.add_file("B.TXT", b"B"), 4);
        let fat = &image.bytes()[512..512 + 8];
        assert_eq!(fat, &hex!("F0 FF FF 03 F0 FF FF 0F"));
        assert_eq!(&image.bytes()[19 * 512..19 * 512 + 11], b"A       TXT");
        assert_eq!(image.bytes()[35 * 512], b'B');
    }
}
