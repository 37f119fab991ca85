pub mod memory;
#[cfg(feature = "std")]
pub mod std;

#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::DerefMut;

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::error::{AllocationError, Error};
use crate::types::SectorID;

/// Boot sector is always read with this size, before the volume tells its own
pub const BOOT_SECTOR_SIZE: usize = 512;

#[cfg_attr(feature = "async", async_trait(?Send))]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
pub trait IO {
    type Error: Debug;

    /// Read `buf.len() / sector_size` consecutive sectors starting from `id`,
    /// returns number of sectors actually read.
    ///
    /// Caller guarantees buf.len() is a multiple of sector_size
    async fn read(
        &mut self,
        id: SectorID,
        sector_size: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error>;
}

pub(crate) struct Wrapper<D>(D);

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<E, T, D> Wrapper<D>
where
    T: IO<Error = E>,
    D: DerefMut<Target = T>,
{
    /// Read exactly `buf.len() / sector_size` sectors, less is an error
    pub async fn read(
        &mut self,
        id: SectorID,
        sector_size: usize,
        buf: &mut [u8],
    ) -> Result<(), Error<E>> {
        let expected = buf.len() / sector_size;
        let actual = self.0.read(id, sector_size, buf).await.map_err(|e| Error::IO(e))?;
        if actual < expected {
            warn!("Short read at sector {}, {} of {} sectors", id, actual, expected);
            return Err(Error::ShortRead { expected, actual });
        }
        Ok(())
    }
}

pub(crate) trait Wrap {
    type Output;
    fn wrap(self) -> Self::Output;
}

impl<E, T, D> Wrap for D
where
    T: IO<Error = E>,
    D: DerefMut<Target = T>,
{
    type Output = Wrapper<D>;
    fn wrap(self) -> Self::Output {
        Wrapper(self)
    }
}

/// Zero filled buffer, allocation failure reported instead of aborting
pub(crate) fn buffer(length: usize) -> Result<Vec<u8>, AllocationError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(length).map_err(|_| AllocationError::OutOfMemory)?;
    buf.resize(length, 0);
    Ok(buf)
}
