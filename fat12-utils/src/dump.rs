use std::io;

use fat12::{SeekFrom, Volume};
use pretty_hex::{config_hex, HexConfig};

use crate::error::Error;

pub fn dump<IO>(volume: &Volume<IO>, name: &str, offset: u64, length: Option<usize>) -> Result<(), Error>
where
    IO: fat12::io::IO<Error = io::Error>,
{
    let mut file = volume.open(name)?;
    file.seek(SeekFrom::Start(offset))?;
    let remain = (file.size() - offset) as usize;
    let mut buf = vec![0u8; length.map_or(remain, |length| length.min(remain))];
    if buf.is_empty() {
        return Ok(());
    }
    let size = file.read(&mut buf)?;
    buf.truncate(size);
    let config = HexConfig { title: false, ..HexConfig::default() };
    println!("{}", config_hex(&buf, config));
    Ok(())
}
