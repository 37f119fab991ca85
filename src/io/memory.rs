#[cfg(all(feature = "async", not(feature = "std")))]
use alloc::boxed::Box;
use core::convert::Infallible;

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::types::SectorID;

/// Image already loaded in memory, e.g. `Vec<u8>`, `&[u8]` or a memory mapped file.
///
/// Reading past the end of image is a short read instead of an error
#[derive(Clone, Debug)]
pub struct MemoryIO<T>(T);

impl<T: AsRef<[u8]>> MemoryIO<T> {
    pub fn new(image: T) -> Self {
        Self(image)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg_attr(feature = "async", async_trait(?Send))]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl<T: AsRef<[u8]>> super::IO for MemoryIO<T> {
    type Error = Infallible;

    async fn read(
        &mut self,
        id: SectorID,
        sector_size: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let image = self.0.as_ref();
        let start = u64::from(id).saturating_mul(sector_size as u64);
        if start >= image.len() as u64 {
            return Ok(0);
        }
        let available = &image[start as usize..];
        let length = core::cmp::min(available.len(), buf.len());
        let length = length - length % sector_size;
        buf[..length].copy_from_slice(&available[..length]);
        Ok(length / sector_size)
    }
}

#[cfg(all(test, not(feature = "async")))]
mod test {
    use super::MemoryIO;
    use crate::io::IO;

    #[test]
    fn test_short_read() {
        let mut io = MemoryIO::new([0xA5u8; 1280]);
        let mut buf = [0u8; 1024];
        assert_eq!(io.read(0.into(), 512, &mut buf).unwrap(), 2);
        assert_eq!(io.read(1.into(), 512, &mut buf).unwrap(), 1);
        assert_eq!(buf[..512], [0xA5; 512]);
        assert_eq!(io.read(3.into(), 512, &mut buf).unwrap(), 0);
    }
}
