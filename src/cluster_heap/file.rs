use core::fmt::Debug;

use crate::error::{DataError, Error, InputError};
use crate::fat::ClusterChain;
use crate::region::data::DirectoryEntry;
use crate::types::ClusterID;
use crate::Volume;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeekFrom {
    Start(u64),
    End(i64),
    Current(i64),
}

/// Readable and seekable byte stream over a file's cluster chain
pub struct File<'a, IO> {
    volume: &'a Volume<IO>,
    entry: DirectoryEntry,
    chain: ClusterChain,
    position: u64,
}

impl<'a, IO> File<'a, IO> {
    pub(crate) fn new(volume: &'a Volume<IO>, entry: DirectoryEntry, chain: ClusterChain) -> Self {
        Self { volume, entry, chain, position: 0 }
    }

    pub fn entry(&self) -> &DirectoryEntry {
        &self.entry
    }

    pub fn chain(&self) -> &[ClusterID] {
        &self.chain
    }

    pub fn size(&self) -> u64 {
        self.entry.size() as u64
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn close(self) {}
}

impl<'a, E: Debug, IO: crate::io::IO<Error = E>> File<'a, IO> {
    /// Change current position, which may equal but not exceed file size
    pub fn seek(&mut self, seek_from: SeekFrom) -> Result<u64, Error<E>> {
        let size = self.size();
        let position = match seek_from {
            SeekFrom::Start(position) => Some(position),
            SeekFrom::Current(offset) => self.position.checked_add_signed(offset),
            SeekFrom::End(offset) if offset <= 0 => size.checked_add_signed(offset),
            SeekFrom::End(_) => None,
        };
        match position {
            Some(position) if position <= size => {
                trace!("Seek {:?} to {}", seek_from, position);
                self.position = position;
                Ok(position)
            }
            _ => Err(InputError::SeekPosition.into()),
        }
    }
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<'a, E: Debug, IO: crate::io::IO<Error = E>> File<'a, IO> {
    /// Read up to `count` elements of `size` bytes each into `buf`,
    /// returns number of whole elements read, 0 at end of file.
    ///
    /// Position advances by bytes copied, which may end in the middle of an element
    /// when file size is not a multiple of element size
    pub async fn read_elements(
        &mut self,
        buf: &mut [u8],
        size: usize,
        count: usize,
    ) -> Result<usize, Error<E>> {
        if size == 0 || count == 0 {
            return Err(InputError::ZeroSize.into());
        }
        let requested = size.checked_mul(count).ok_or(InputError::BufferTooSmall)?;
        if buf.len() < requested {
            return Err(InputError::BufferTooSmall.into());
        }
        let remain = self.size().saturating_sub(self.position);
        if remain == 0 {
            return Ok(0);
        }
        let length = core::cmp::min(requested as u64, remain) as usize;
        self.read_at(self.position, &mut buf[..length]).await?;
        self.position += length as u64;
        trace!("Read {} bytes, position {}", length, self.position);
        Ok(length / size)
    }

    /// Byte granular read, returns bytes read, 0 at end of file
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error<E>> {
        let count = buf.len();
        self.read_elements(buf, 1, count).await
    }

    /// Stage whole clusters covering `position..position + buf.len()` and copy out.
    /// Contiguous clusters are read with a single request
    async fn read_at(&self, position: u64, buf: &mut [u8]) -> Result<(), Error<E>> {
        let cluster_size = self.volume.geometry().cluster_size() as u64;
        let end = position + buf.len() as u64;
        let first = (position / cluster_size) as usize;
        let last = end.div_ceil(cluster_size) as usize;
        if last > self.chain.len() {
            warn!("File needs {} clusters but chain has {}", last, self.chain.len());
            return Err(DataError::ChainLength.into());
        }
        let clusters = &self.chain[first..last];
        let mut staging = crate::io::buffer(clusters.len() * cluster_size as usize)?;
        let mut index = 0;
        while index < clusters.len() {
            let start = u32::from(clusters[index]);
            let mut length = 1;
            while index + length < clusters.len()
                && u32::from(clusters[index + length]) == start + length as u32
            {
                length += 1;
            }
            let offset = index * cluster_size as usize;
            let bytes = &mut staging[offset..offset + length * cluster_size as usize];
            let sector_id = self.volume.geometry().cluster_sector(clusters[index]);
            self.volume.read(sector_id, bytes).await?;
            index += length;
        }
        let offset = (position - first as u64 * cluster_size) as usize;
        buf.copy_from_slice(&staging[offset..offset + buf.len()]);
        Ok(())
    }
}

#[cfg(all(feature = "std", not(feature = "async")))]
fn io_error<E: Debug>(error: Error<E>) -> std::io::Error {
    use crate::error::ErrorKind;
    use std::io::ErrorKind as Kind;

    let kind = match error.kind() {
        ErrorKind::InvalidArgument | ErrorKind::Range => Kind::InvalidInput,
        ErrorKind::InvalidFormat => Kind::InvalidData,
        ErrorKind::OutOfMemory => Kind::OutOfMemory,
        ErrorKind::IO => match error {
            Error::ShortRead { .. } => Kind::UnexpectedEof,
            _ => Kind::Other,
        },
        _ => Kind::Other,
    };
    std::io::Error::new(kind, error.to_string())
}

#[cfg(all(feature = "std", not(feature = "async")))]
impl<'a, E: Debug, IO: crate::io::IO<Error = E>> std::io::Read for File<'a, IO> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        File::read(self, buf).map_err(io_error)
    }
}

#[cfg(all(feature = "std", not(feature = "async")))]
impl<'a, E: Debug, IO: crate::io::IO<Error = E>> std::io::Seek for File<'a, IO> {
    fn seek(&mut self, seek_from: std::io::SeekFrom) -> std::io::Result<u64> {
        let seek_from = match seek_from {
            std::io::SeekFrom::Start(position) => SeekFrom::Start(position),
            std::io::SeekFrom::End(offset) => SeekFrom::End(offset),
            std::io::SeekFrom::Current(offset) => SeekFrom::Current(offset),
        };
        File::seek(self, seek_from).map_err(io_error)
    }
}
