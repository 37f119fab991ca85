use std::io;

use fat12::Volume;

use crate::error::Error;

pub fn cat<IO>(volume: &Volume<IO>, name: &str) -> Result<(), Error>
where
    IO: fat12::io::IO<Error = io::Error>,
{
    let mut file = volume.open(name)?;
    let size = io::copy(&mut file, &mut io::stdout().lock())?;
    debug!("{} bytes written", size);
    Ok(())
}
