#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(all(feature = "async", feature = "std", not(any(feature = "smol", feature = "tokio"))))]
compile_error!("Either smol or tokio must be selected");

extern crate alloc;

#[macro_use]
extern crate hex_literal;
extern crate heapless;
#[macro_use]
extern crate log;

mod cluster_heap;
mod endian;
pub mod error;
pub mod fat;
pub mod fs;
pub mod io;
pub mod region;
mod root;
pub(crate) mod sync;
#[cfg(test)]
mod testing;
pub mod types;

use core::fmt::Debug;

pub use cluster_heap::file::{File, SeekFrom};
use error::{DataError, Error, OperationError};
pub use error::ErrorKind;
use fat::{ClusterChain, FAT};
pub use fs::Geometry;
use io::{Wrap, BOOT_SECTOR_SIZE};
pub use region::boot::BootSector;
pub use region::data::datetime::{Date, DateTime, Time};
pub use region::data::{DirectoryEntry, FileAttributes, Slot};
pub use root::RootDirectory;
use sync::{acquire, shared, Shared};
use types::{ClusterID, SectorID};

/// A mounted FAT12 volume, read-only.
///
/// [`File`] and [`RootDirectory`] handles borrow or copy from it,
/// [`Volume::close`] hands the byte store back
pub struct Volume<IO> {
    io: Shared<IO>,
    boot_sector: BootSector,
    geometry: Geometry,
    fat: FAT,
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<E: Debug, IO: io::IO<Error = E>> Volume<IO> {
    /// Mount volume whose boot sector is at `start_sector`, in units of 512 bytes
    pub async fn mount(mut io: IO, start_sector: u64) -> Result<Self, Error<E>> {
        let start = SectorID::from(start_sector);
        let mut sector = [0u8; BOOT_SECTOR_SIZE];
        (&mut io).wrap().read(start, BOOT_SECTOR_SIZE, &mut sector).await?;
        let boot_sector = BootSector::parse(&sector);
        if let Err(e) = boot_sector.validate() {
            warn!("Boot sector at {} rejected: {}", start, e);
            return Err(e.into());
        }
        let geometry = Geometry::new(&boot_sector, start).inspect_err(|e| {
            warn!("Volume layout rejected: {}", e);
        })?;
        debug!("Volume geometry {:?}", geometry);

        let sector_size = geometry.sector_size as usize;
        let mut fat = io::buffer(geometry.fat_size())?;
        let sector_id = geometry.absolute(geometry.fat1_start);
        (&mut io).wrap().read(sector_id, sector_size, &mut fat).await?;
        let mut copy = io::buffer(geometry.fat_size())?;
        let sector_id = geometry.absolute(geometry.fat2_start);
        (&mut io).wrap().read(sector_id, sector_size, &mut copy).await?;
        if fat != copy {
            let offset = fat.iter().zip(copy.iter()).position(|(a, b)| a != b);
            warn!("FAT copies differ at byte {:?}", offset);
            return Err(DataError::FATMismatch.into());
        }
        debug!("FAT of {} bytes, {} entries", fat.len(), geometry.fat_entry_count);
        let fat = FAT::new(fat, geometry.fat_entry_count as u32);
        Ok(Self { io: shared(io), boot_sector, geometry, fat })
    }

    /// Read consecutive sectors relative to volume start
    pub(crate) async fn read(&self, sector_id: SectorID, buf: &mut [u8]) -> Result<(), Error<E>> {
        let sector_size = self.geometry.sector_size as usize;
        let mut io = acquire!(self.io).wrap();
        io.read(self.geometry.absolute(sector_id), sector_size, buf).await
    }

    /// Only root directory is supported, designated by `\` or `/`
    pub async fn root_directory(&self, path: &str) -> Result<RootDirectory, Error<E>> {
        if !matches!(path, "\\" | "/") {
            trace!("Not a directory: {}", path);
            return Err(OperationError::NotDirectory.into());
        }
        let mut entries = io::buffer(self.geometry.root_size())?;
        self.read(self.geometry.root_start, &mut entries).await?;
        Ok(RootDirectory::new(entries))
    }

    /// Open a file in root directory by its 8.3 display name, case sensitive
    pub async fn open(&self, name: &str) -> Result<File<'_, IO>, Error<E>> {
        let root = self.root_directory("\\").await?;
        let entry = root.find(name).ok_or(OperationError::NotFound)?;
        if entry.is_container() {
            return Err(OperationError::IsDirectory.into());
        }
        let chain = match (u32::from(entry.first_cluster()), entry.size()) {
            (0, 0) => ClusterChain::default(),
            (0, size) => {
                warn!("File {} of {} bytes has no cluster", name, size);
                return Err(DataError::ChainLength.into());
            }
            _ => self.fat.chain(entry.first_cluster())?,
        };
        trace!("Open {} of {} bytes on {} clusters", name, entry.size(), chain.len());
        Ok(File::new(self, entry, chain))
    }

    /// Root directory volume label record if present, otherwise boot sector label
    pub async fn volume_label(&self) -> Result<heapless::String<11>, Error<E>> {
        let root = self.root_directory("\\").await?;
        Ok(root.volume_label().unwrap_or_else(|| self.boot_sector.volume_label()))
    }
}

impl<IO> Volume<IO> {
    pub fn boot_sector(&self) -> &BootSector {
        &self.boot_sector
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn serial_number(&self) -> u32 {
        self.boot_sector.volume_id
    }

    /// First FAT copy as loaded at mount
    pub fn fat(&self) -> &[u8] {
        self.fat.bytes()
    }

    pub fn chain<E>(&self, first: ClusterID) -> Result<ClusterChain, Error<E>> {
        self.fat.chain(first)
    }

    /// Release FAT and boot sector copy, handing byte store back
    pub fn close(self) -> IO {
        sync::into_inner(self.io)
    }
}
