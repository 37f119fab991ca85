pub mod datetime;
pub mod name;

use bitfield::bitfield;
use derive_more::{From, Into};

use crate::error::InputError;
use crate::types::ClusterID;
use datetime::{Date, DateTime, Time};
use name::Name;

pub const ENTRY_SIZE: usize = 32;

pub type RawEntry = [u8; ENTRY_SIZE];

mod field {
    use crate::endian::Field;

    pub const NAME: Field<[u8; 11]> = Field::at(0);
    pub const ATTRIBUTES: Field<u8> = Field::at(11);
    pub const RESERVED: Field<u8> = Field::at(12);
    pub const CREATE_FINE: Field<u8> = Field::at(13);
    pub const CREATE_TIME: Field<u16> = Field::at(14);
    pub const CREATE_DATE: Field<u16> = Field::at(16);
    pub const ACCESS_DATE: Field<u16> = Field::at(18);
    pub const CLUSTER_HIGH: Field<u16> = Field::at(20);
    pub const MODIFIED_TIME: Field<u16> = Field::at(22);
    pub const MODIFIED_DATE: Field<u16> = Field::at(24);
    pub const CLUSTER_LOW: Field<u16> = Field::at(26);
    pub const SIZE: Field<u32> = Field::at(28);
}

bitfield! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, From, Into)]
    pub struct FileAttributes(u8);
    pub read_only, set_read_only: 0;
    pub hidden, set_hidden: 1;
    pub system, set_system: 2;
    pub volume_label, set_volume_label: 3;
    pub directory, set_directory: 4;
    pub archive, set_archive: 5;
}

impl FileAttributes {
    /// Long file name fragments carry all of read-only, hidden, system and volume label
    pub const LONG_NAME: u8 = 0x0F;

    pub fn new(directory: bool) -> Self {
        let mut attributes = Self::default();
        if directory {
            attributes.set_directory(true);
        } else {
            attributes.set_archive(true);
        }
        attributes
    }

    pub fn long_name(&self) -> bool {
        self.0 & 0x3F == Self::LONG_NAME
    }
}

/// Normalized view of a 32-byte directory record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: Name,
    raw_name: [u8; 11],
    attributes: FileAttributes,
    reserved: u8,
    first_cluster: ClusterID,
    size: u32,
    created: DateTime,
    accessed: Date,
    modified: DateTime,
}

impl DirectoryEntry {
    /// Entry for an 8.3 display name like `README.TXT`
    pub fn new(
        name: &str,
        attributes: FileAttributes,
        first_cluster: ClusterID,
        size: u32,
    ) -> Result<Self, InputError> {
        let raw_name = name::encode(name)?;
        Ok(Self {
            name: name::decode(&raw_name, has_extension(attributes)),
            raw_name,
            attributes,
            reserved: 0,
            first_cluster,
            size,
            created: DateTime::default(),
            accessed: Date::default(),
            modified: DateTime::default(),
        })
    }

    pub(crate) fn parse(raw: &RawEntry) -> Self {
        let raw_name = field::NAME.get(raw);
        let attributes = FileAttributes(field::ATTRIBUTES.get(raw));
        let high = field::CLUSTER_HIGH.get(raw) as u32;
        let low = field::CLUSTER_LOW.get(raw) as u32;
        let created = DateTime {
            date: Date::from(field::CREATE_DATE.get(raw)),
            time: Time::from(field::CREATE_TIME.get(raw)),
            fine: field::CREATE_FINE.get(raw),
        };
        let modified_date = Date::from(field::MODIFIED_DATE.get(raw));
        let modified_time = Time::from(field::MODIFIED_TIME.get(raw));
        Self {
            name: name::decode(&raw_name, has_extension(attributes)),
            raw_name,
            attributes,
            reserved: field::RESERVED.get(raw),
            first_cluster: ClusterID::from(high << 16 | low),
            size: field::SIZE.get(raw),
            created,
            accessed: Date::from(field::ACCESS_DATE.get(raw)),
            modified: DateTime::new(modified_date, modified_time),
        }
    }

    pub fn to_bytes(&self) -> RawEntry {
        let mut raw = [0u8; ENTRY_SIZE];
        let first_cluster = u32::from(self.first_cluster);
        field::NAME.set(&mut raw, self.raw_name);
        field::ATTRIBUTES.set(&mut raw, self.attributes.into());
        field::RESERVED.set(&mut raw, self.reserved);
        field::CREATE_FINE.set(&mut raw, self.created.fine);
        field::CREATE_TIME.set(&mut raw, self.created.time.into());
        field::CREATE_DATE.set(&mut raw, self.created.date.into());
        field::ACCESS_DATE.set(&mut raw, self.accessed.into());
        field::CLUSTER_HIGH.set(&mut raw, (first_cluster >> 16) as u16);
        field::MODIFIED_TIME.set(&mut raw, self.modified.time.into());
        field::MODIFIED_DATE.set(&mut raw, self.modified.date.into());
        field::CLUSTER_LOW.set(&mut raw, first_cluster as u16);
        field::SIZE.set(&mut raw, self.size);
        raw
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn raw_name(&self) -> &[u8; 11] {
        &self.raw_name
    }

    pub fn attributes(&self) -> FileAttributes {
        self.attributes
    }

    pub fn first_cluster(&self) -> ClusterID {
        self.first_cluster
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn created(&self) -> DateTime {
        self.created
    }

    pub fn accessed(&self) -> Date {
        self.accessed
    }

    pub fn modified(&self) -> DateTime {
        self.modified
    }

    pub fn set_created(&mut self, datetime: DateTime) {
        self.created = datetime
    }

    pub fn set_accessed(&mut self, date: Date) {
        self.accessed = date
    }

    pub fn set_modified(&mut self, datetime: DateTime) {
        self.modified = datetime
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.directory()
    }

    /// Directory, or volume label which is never a readable file either
    pub(crate) fn is_container(&self) -> bool {
        self.attributes.directory() || self.attributes.volume_label()
    }
}

// Directories and volume labels show base name only
fn has_extension(attributes: FileAttributes) -> bool {
    !(attributes.directory() || attributes.volume_label())
}

/// Classified directory slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Deleted record, enumeration continues
    Empty,
    /// No record in use from here on
    EndOfDirectory,
    Entry(DirectoryEntry),
}

pub fn decode(raw: &RawEntry) -> Slot {
    match raw[0] {
        0x00 => Slot::EndOfDirectory,
        name::DELETED => Slot::Empty,
        _ => Slot::Entry(DirectoryEntry::parse(raw)),
    }
}

#[cfg(test)]
mod test {
    use super::datetime::{Date, DateTime, Time};
    use super::{decode, DirectoryEntry, FileAttributes, RawEntry, Slot};
    use crate::error::InputError;

    fn raw(name: &[u8; 11], attributes: u8, cluster: u32, size: u32) -> RawEntry {
        let mut raw = [0u8; 32];
        raw[..11].copy_from_slice(name);
        raw[11] = attributes;
        raw[20..22].copy_from_slice(&((cluster >> 16) as u16).to_le_bytes());
        raw[26..28].copy_from_slice(&(cluster as u16).to_le_bytes());
        raw[28..].copy_from_slice(&size.to_le_bytes());
        raw
    }

    fn expect_entry(slot: Slot) -> DirectoryEntry {
        match slot {
            Slot::Entry(entry) => entry,
            slot => panic!("Unexpected slot {:?}", slot),
        }
    }

    #[test]
    fn test_file() {
        let entry = expect_entry(decode(&raw(b"README  TXT", 0x21, 0x12345, 13)));
        assert_eq!(entry.name(), "README.TXT");
        assert_eq!(entry.raw_name(), b"README  TXT");
        assert_eq!(u32::from(entry.first_cluster()), 0x12345);
        assert_eq!(entry.size(), 13);
        let attributes = entry.attributes();
        assert!(attributes.read_only() && attributes.archive());
        assert!(!attributes.hidden() && !attributes.system() && !attributes.directory());
        assert!(!entry.is_directory() && !entry.is_container());
    }

    #[test]
    fn test_directory_without_extension() {
        // Extension bytes of a directory are not shown
        let directory = expect_entry(decode(&raw(b"SUB     DIR", 0x10, 3, 0)));
        assert_eq!(directory.name(), "SUB");
        assert!(directory.is_directory());
        let label = expect_entry(decode(&raw(b"MYDISK  VOL", 0x08, 0, 0)));
        assert_eq!(label.name(), "MYDISK");
        assert!(label.attributes().volume_label() && label.is_container());
    }

    #[test]
    fn test_slot() {
        assert_eq!(decode(&[0u8; 32]), Slot::EndOfDirectory);
        assert_eq!(decode(&raw(b"\xE5EADME  TXT", 0x20, 2, 1)), Slot::Empty);
        let entry = expect_entry(decode(&raw(b"\x05EADME  TXT", 0x20, 2, 1)));
        assert_eq!(entry.name(), "\u{e5}EADME.TXT");
    }

    #[test]
    fn test_long_name() {
        let entry = expect_entry(decode(&raw(b"Ah\0e\0l\0l\0o\0", 0x0F, 0, 0)));
        assert!(entry.attributes().long_name());
        assert!(!FileAttributes::new(false).long_name());
    }

    #[test]
    fn test_timestamps() {
        let mut raw = raw(b"HELLO   TXT", 0x20, 2, 13);
        raw[13] = 100;
        raw[14..16].copy_from_slice(&u16::from(Time::new(8, 30, 0)).to_le_bytes());
        raw[16..18].copy_from_slice(&u16::from(Date::new(2000, 1, 1)).to_le_bytes());
        raw[24..26].copy_from_slice(&u16::from(Date::new(2024, 2, 29)).to_le_bytes());
        let entry = expect_entry(decode(&raw));
        assert_eq!(entry.created().time.hour(), 8);
        assert_eq!(entry.created().date.year(), 2000);
        assert_eq!(entry.created().millisecond(), 1000);
        assert_eq!(entry.modified().date, Date::new(2024, 2, 29));
        assert_eq!(entry.to_bytes(), raw);
    }

    #[test]
    fn test_new() {
        let mut entry =
            DirectoryEntry::new("HELLO.TXT", FileAttributes::new(false), 2.into(), 13).unwrap();
        entry.set_created(DateTime::new(Date::new(2023, 12, 31), Time::new(23, 59, 58)));
        entry.set_accessed(Date::new(2024, 1, 2));
        entry.set_modified(DateTime::new(Date::new(2024, 1, 1), Time::new(0, 0, 0)));
        let bytes = entry.to_bytes();
        assert_eq!(&bytes[..12], b"HELLO   TXT\x20");
        assert_eq!(&bytes[18..20], &u16::from(Date::new(2024, 1, 2)).to_le_bytes());
        assert_eq!(&bytes[16..18], &u16::from(Date::new(2023, 12, 31)).to_le_bytes());
        assert_eq!(decode(&bytes), Slot::Entry(entry));
        let entry = DirectoryEntry::new("SUB", FileAttributes::new(true), 3.into(), 0).unwrap();
        assert_eq!(entry.name(), "SUB");
        assert_eq!(entry.to_bytes()[11], 0x10);
        let error = DirectoryEntry::new("A:B", FileAttributes::new(false), 2.into(), 0);
        assert_eq!(error, Err(InputError::InvalidName));
    }
}
