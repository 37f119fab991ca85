use std::io::SeekFrom;
use std::path::Path;
#[cfg(not(feature = "async"))]
use std::{fs, io::prelude::*};

#[cfg(all(feature = "async", feature = "smol"))]
use smol::fs;
#[cfg(all(feature = "async", feature = "smol"))]
use smol::io::{AsyncReadExt, AsyncSeekExt};
#[cfg(all(feature = "async", feature = "tokio"))]
use tokio::fs;
#[cfg(all(feature = "async", feature = "tokio"))]
use tokio::io::{AsyncReadExt, AsyncSeekExt};

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::types::SectorID;

/// Image file or block device on host, opened read-only
#[derive(Debug)]
pub struct FileIO {
    file: fs::File,
}

#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl FileIO {
    pub async fn open<P: AsRef<Path>>(filepath: P) -> std::io::Result<Self> {
        let file = fs::File::open(filepath.as_ref()).await?;
        Ok(Self { file })
    }
}

#[cfg_attr(feature = "async", async_trait(?Send))]
#[cfg_attr(not(feature = "async"), deasync::deasync)]
impl super::IO for FileIO {
    type Error = std::io::Error;

    async fn read(
        &mut self,
        id: SectorID,
        sector_size: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let seek = SeekFrom::Start(u64::from(id) * sector_size as u64);
        self.file.seek(seek).await?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]).await? {
                0 => break,
                size => filled += size,
            }
        }
        Ok(filled / sector_size)
    }
}
