use std::io;

use chrono::NaiveDateTime;
use fat12::Volume;

use crate::error::Error;

fn format(datetime: Option<NaiveDateTime>) -> String {
    match datetime {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".repeat(19),
    }
}

pub fn list<IO>(volume: &Volume<IO>, path: &str) -> Result<(), Error>
where
    IO: fat12::io::IO<Error = io::Error>,
{
    for entry in volume.root_directory(path)? {
        let attrs = entry.attributes();
        if attrs.long_name() {
            continue;
        }
        if attrs.volume_label() {
            println!("Volume label {}", entry.name());
            continue;
        }
        print!("{}", if attrs.directory() { "d" } else { "-" });
        print!("{}", if attrs.read_only() { "r" } else { "-" });
        print!("{}", if attrs.system() { "s" } else { "-" });
        print!("{}", if attrs.hidden() { "h" } else { "-" });
        print!("{}", if attrs.archive() { "a" } else { "-" });
        print!(" {:8}", entry.size());
        print!(" {}", format(entry.modified().naive()));
        if attrs.directory() {
            println!(" {}/", entry.name());
        } else {
            println!(" {}", entry.name());
        }
    }
    Ok(())
}
