// 8.3 short names, 8 bytes base and 3 bytes extension, space padded

use crate::error::InputError;

/// Display name holds at most 12 Latin-1 characters, which are up to 2 bytes in UTF-8
pub type Name = heapless::String<24>;

/// First name byte of a deleted record
pub(crate) const DELETED: u8 = 0xE5;
/// Stands for a literal 0xE5 as first name byte
const KANJI_ESCAPE: u8 = 0x05;

const ILLEGAL: &[u8] = b"\"*+,./:;<=>?[\\]|";

fn trim_end(bytes: &[u8]) -> &[u8] {
    let length = bytes.iter().rposition(|&b| b != b' ').map(|i| i + 1).unwrap_or(0);
    &bytes[..length]
}

fn push_latin1(name: &mut Name, bytes: &[u8]) {
    for &byte in bytes {
        // Capacity covers 11 two byte characters plus dot
        name.push(byte as char).ok();
    }
}

/// Base name trimmed, then `.` and trimmed extension unless extension is omitted or blank
pub(crate) fn decode(raw: &[u8; 11], with_extension: bool) -> Name {
    let mut base = [0u8; 8];
    base.copy_from_slice(&raw[..8]);
    if base[0] == KANJI_ESCAPE {
        base[0] = DELETED;
    }
    let mut name = Name::new();
    push_latin1(&mut name, trim_end(&base));
    let extension = trim_end(&raw[8..]);
    if with_extension && !extension.is_empty() {
        name.push('.').ok();
        push_latin1(&mut name, extension);
    }
    name
}

fn encode_part(part: &str, output: &mut [u8]) -> Result<(), InputError> {
    let mut length = 0;
    for ch in part.chars() {
        let byte = u8::try_from(ch as u32).map_err(|_| InputError::InvalidName)?;
        if byte < 0x20 || byte == b' ' || ILLEGAL.contains(&byte) {
            return Err(InputError::InvalidName);
        }
        *output.get_mut(length).ok_or(InputError::InvalidName)? = byte;
        length += 1;
    }
    Ok(())
}

/// Encode a display name like `README.TXT` into `README  TXT`.
///
/// Characters are kept as is, case included
pub(crate) fn encode(name: &str) -> Result<[u8; 11], InputError> {
    let (base, extension) = match name.split_once('.') {
        Some((base, extension)) => (base, extension),
        None => (name, ""),
    };
    if base.is_empty() || (name.contains('.') && extension.is_empty()) {
        return Err(InputError::InvalidName);
    }
    let mut raw = [b' '; 11];
    encode_part(base, &mut raw[..8])?;
    encode_part(extension, &mut raw[8..])?;
    if raw[0] == DELETED {
        raw[0] = KANJI_ESCAPE;
    }
    Ok(raw)
}
