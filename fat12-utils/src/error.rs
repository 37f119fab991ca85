use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("IO: {_0}")]
    IO(#[from] std::io::Error),
    #[display("FAT12: {_0}")]
    FAT12(#[from] fat12::error::Error<std::io::Error>),
    #[display("{_0}")]
    String(&'static str),
}
