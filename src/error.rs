use core::fmt::{Debug, Display, Formatter};

use displaydoc::Display;
use thiserror::Error;

/// Caller supplied an argument the operation cannot work with
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum InputError {
    /// Element size or element count is zero
    ZeroSize,
    /// Buffer too small for requested elements
    BufferTooSmall,
    /// Seek position out of range
    SeekPosition,
    /// First cluster must not be zero
    ZeroCluster,
    /// FAT table is empty
    EmptyFAT,
    /// Not a valid 8.3 name
    InvalidName,
}

/// On-disk data is malformed or inconsistent
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum DataError {
    /// Boot sector signature mismatch
    BootSignature,
    /// Extended boot signature is neither 0x28 nor 0x29
    ExtendedSignature,
    /// Logical sector count fields are inconsistent
    SectorCount,
    /// Reserved sector count is zero
    ReservedSectors,
    /// FAT count is neither 1 nor 2
    FATCount,
    /// Sectors per cluster out of range
    SectorsPerCluster,
    /// Root directory is not aligned to sector size
    RootDirectoryAlignment,
    /// Unsupported bytes per sector
    BytesPerSector,
    /// Region layout does not fit into volume
    Layout,
    /// Too many clusters for FAT12
    ClusterCount,
    /// Volume start is not aligned to sector size
    VolumeAlignment,
    /// FAT copies differ
    FATMismatch,
    /// Cluster chain points outside of FAT
    FATRange,
    /// Cluster chain is corrupted
    FATChain,
    /// Cluster chain shorter than file size
    ChainLength,
}

/// Operation not applicable to the target
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum OperationError {
    /// No such file or directory
    NotFound,
    /// Is a directory
    IsDirectory,
    /// Not a directory
    NotDirectory,
}

#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Out of memory
    OutOfMemory,
}

/// Error category, one per failure class a caller is expected to distinguish
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    OutOfMemory,
    InvalidFormat,
    IO,
    Range,
    IsDirectory,
    NotDirectory,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    IO(E),
    ShortRead { expected: usize, actual: usize },
    Input(InputError),
    Data(DataError),
    Operation(OperationError),
    Allocation(AllocationError),
}

impl<E> Error<E> {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IO(_) | Self::ShortRead { .. } => ErrorKind::IO,
            Self::Input(InputError::SeekPosition) => ErrorKind::Range,
            Self::Input(_) => ErrorKind::InvalidArgument,
            Self::Data(DataError::FATRange) => ErrorKind::Range,
            Self::Data(_) => ErrorKind::InvalidFormat,
            Self::Operation(OperationError::NotFound) => ErrorKind::NotFound,
            Self::Operation(OperationError::IsDirectory) => ErrorKind::IsDirectory,
            Self::Operation(OperationError::NotDirectory) => ErrorKind::NotDirectory,
            Self::Allocation(_) => ErrorKind::OutOfMemory,
        }
    }
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IO(e) => write!(f, "IO({:?})", e),
            Self::ShortRead { expected, actual } => {
                write!(f, "Short read, {} of {} sectors", actual, expected)
            }
            Self::Input(e) => write!(f, "{}", e),
            Self::Data(e) => write!(f, "{}", e),
            Self::Operation(e) => write!(f, "{}", e),
            Self::Allocation(e) => write!(f, "{}", e),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

macro_rules! from {
    ($variant:ident, $type:ty) => {
        impl<E> From<$type> for Error<E> {
            fn from(e: $type) -> Self {
                Self::$variant(e)
            }
        }
    };
}

from!(Input, InputError);
from!(Data, DataError);
from!(Operation, OperationError);
from!(Allocation, AllocationError);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_kind() {
        let error: Error<()> = InputError::SeekPosition.into();
        assert_eq!(error.kind(), ErrorKind::Range);
        let error: Error<()> = InputError::ZeroSize.into();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        let error: Error<()> = DataError::FATMismatch.into();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        let error: Error<()> = Error::ShortRead { expected: 2, actual: 1 };
        assert_eq!(error.kind(), ErrorKind::IO);
        assert_eq!(error.to_string(), "Short read, 1 of 2 sectors");
    }

    #[test]
    fn test_display() {
        let error: Error<()> = OperationError::IsDirectory.into();
        assert_eq!(error.to_string(), "Is a directory");
        let error: Error<&str> = Error::IO("eof");
        assert_eq!(error.to_string(), "IO(\"eof\")");
    }
}
