use alloc::vec::Vec;

use crate::region::data::{decode, DirectoryEntry, RawEntry, Slot, ENTRY_SIZE};

/// Root directory region loaded in memory, iterated slot by slot
#[derive(Clone, Debug)]
pub struct RootDirectory {
    entries: Vec<u8>,
    index: usize,
}

impl RootDirectory {
    pub(crate) fn new(entries: Vec<u8>) -> Self {
        Self { entries, index: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len() / ENTRY_SIZE
    }

    fn slot(&self, index: usize) -> Option<&RawEntry> {
        let bytes = self.entries.get(index * ENTRY_SIZE..(index + 1) * ENTRY_SIZE)?;
        bytes.try_into().ok()
    }

    /// Restart enumeration from first slot
    pub fn rewind(&mut self) {
        self.index = 0
    }

    /// Case sensitive lookup by display name, regardless of cursor.
    /// Long name fragments never match
    pub fn find(&self, name: &str) -> Option<DirectoryEntry> {
        let mut index = 0;
        while let Some(raw) = self.slot(index) {
            match decode(raw) {
                Slot::EndOfDirectory => break,
                Slot::Empty => (),
                Slot::Entry(entry) if entry.attributes().long_name() => (),
                Slot::Entry(entry) if entry.name() == name => return Some(entry),
                Slot::Entry(_) => (),
            }
            index += 1;
        }
        trace!("No entry named {} in root directory", name);
        None
    }

    /// Volume label record if any, trailing spaces trimmed
    pub fn volume_label(&self) -> Option<heapless::String<11>> {
        let mut index = 0;
        while let Some(raw) = self.slot(index) {
            match decode(raw) {
                Slot::EndOfDirectory => break,
                Slot::Entry(entry) => {
                    let attributes = entry.attributes();
                    if attributes.volume_label() && !attributes.long_name() {
                        let raw_name = entry.raw_name();
                        let length = raw_name.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
                        let mut label = heapless::String::new();
                        for &byte in raw_name[..length].iter().filter(|b| b.is_ascii()) {
                            label.push(byte as char).ok();
                        }
                        return Some(label);
                    }
                }
                Slot::Empty => (),
            }
            index += 1;
        }
        None
    }

    pub fn close(self) {}
}

impl Iterator for RootDirectory {
    type Item = DirectoryEntry;

    fn next(&mut self) -> Option<DirectoryEntry> {
        while let Some(raw) = self.slot(self.index) {
            match decode(raw) {
                // Cursor stays, later calls keep returning None
                Slot::EndOfDirectory => return None,
                Slot::Empty => self.index += 1,
                Slot::Entry(entry) => {
                    self.index += 1;
                    return Some(entry);
                }
            }
        }
        None
    }
}
