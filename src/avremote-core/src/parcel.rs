//! Binary (parcel) codec for [`PluginCustomCommand`].
//!
//! Layout: `i32` big-endian version, then the version-1 fields in
//! declaration order. Strings are a `u32` big-endian byte length followed
//! by UTF-8 bytes. A version below 1 decodes to a default record without
//! consuming further bytes; a version above 1 decodes the version-1 prefix
//! and ignores whatever follows.

use crate::command::{PluginCustomCommand, PARCEL_VERSION};
use std::io::{self, Read, Write};

/// Longest accepted string payload (1 MiB); guards against corrupt lengths.
const MAX_STRING: u32 = 1024 * 1024;

/// Encodes `command` in the versioned parcel form and writes it to `w`.
pub fn encode<W: Write>(w: &mut W, command: &PluginCustomCommand) -> io::Result<()> {
    write_i32(w, PARCEL_VERSION)?;
    write_i64(w, command.id)?;
    write_i32(w, command.color)?;
    write_str(w, &command.description)?;
    write_i32(w, command.display_order)?;
    write_str(w, &command.icon)?;
    write_str(w, &command.param1)?;
    write_str(w, &command.param2)?;
    write_str(w, &command.param3)?;
    write_str(w, &command.param4)?;
    write_str(w, &command.param5)?;
    write_i32(w, i32::from(command.read_only))?;
    write_str(w, &command.source)?;
    write_str(w, &command.title)?;
    write_i32(w, command.kind)?;
    write_str(w, &command.unique_id)?;
    w.flush()
}

/// Reads a versioned parcel from `r` and decodes it.
///
/// Truncated or malformed input is an error; a recognized version below 1
/// is not, and yields a default record.
pub fn decode<R: Read>(r: &mut R) -> io::Result<PluginCustomCommand> {
    let version = read_i32(r)?;
    if version < 1 {
        return Ok(PluginCustomCommand::default());
    }
    Ok(PluginCustomCommand {
        id: read_i64(r)?,
        color: read_i32(r)?,
        description: read_str(r)?,
        display_order: read_i32(r)?,
        icon: read_str(r)?,
        param1: read_str(r)?,
        param2: read_str(r)?,
        param3: read_str(r)?,
        param4: read_str(r)?,
        param5: read_str(r)?,
        read_only: read_i32(r)? == 1,
        source: read_str(r)?,
        title: read_str(r)?,
        kind: read_i32(r)?,
        unique_id: read_str(r)?,
    })
}

/// Encodes `command` into a fresh buffer.
pub fn to_vec(command: &PluginCustomCommand) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode(&mut buf, command)?;
    Ok(buf)
}

/// Decodes a parcel from a byte slice.
pub fn from_slice(bytes: &[u8]) -> io::Result<PluginCustomCommand> {
    decode(&mut io::Cursor::new(bytes))
}

fn write_i32<W: Write>(w: &mut W, value: i32) -> io::Result<()> {
    w.write_all(&value.to_be_bytes())
}

fn write_i64<W: Write>(w: &mut W, value: i64) -> io::Result<()> {
    w.write_all(&value.to_be_bytes())
}

fn write_str<W: Write>(w: &mut W, value: &str) -> io::Result<()> {
    let len = u32::try_from(value.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "string exceeds u32::MAX"))?;
    if len > MAX_STRING {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "string exceeds 1 MiB limit",
        ));
    }
    w.write_all(&len.to_be_bytes())?;
    w.write_all(value.as_bytes())
}

fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

fn read_i64<R: Read>(r: &mut R) -> io::Result<i64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(i64::from_be_bytes(buf))
}

fn read_str<R: Read>(r: &mut R) -> io::Result<String> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    let len = u32::from_be_bytes(buf);
    if len > MAX_STRING {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "string exceeds 1 MiB limit",
        ));
    }
    let mut payload = vec![0u8; len as usize];
    r.read_exact(&mut payload)?;
    String::from_utf8(payload).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_command() -> PluginCustomCommand {
        PluginCustomCommand {
            id: i64::MAX,
            color: -1,
            description: "desc".into(),
            display_order: 12,
            icon: "icon-name".into(),
            param1: "".into(),
            param2: "two".into(),
            param3: "three".into(),
            param4: "x".repeat(MAX_STRING as usize),
            param5: "five".into(),
            read_only: true,
            source: "demo-receiver".into(),
            title: "Full command".into(),
            kind: -7,
            unique_id: "cmd-full".into(),
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let command = full_command();
        let decoded = from_slice(&to_vec(&command).unwrap()).unwrap();
        assert_eq!(decoded, command);
        assert_eq!(decoded.id, command.id);
        assert_eq!(decoded.display_order, command.display_order);
    }

    #[test]
    fn version_zero_decodes_to_defaults() {
        let decoded = from_slice(&0i32.to_be_bytes()).unwrap();
        assert_eq!(decoded, PluginCustomCommand::default());
    }

    #[test]
    fn newer_version_ignores_trailing_bytes() {
        let mut buf = to_vec(&full_command()).unwrap();
        buf[..4].copy_from_slice(&2i32.to_be_bytes());
        buf.extend_from_slice(b"fields from the future");
        let decoded = from_slice(&buf).unwrap();
        assert_eq!(decoded, full_command());
    }

    #[test]
    fn truncated_input_is_an_error() {
        let buf = to_vec(&full_command()).unwrap();
        assert!(from_slice(&buf[..buf.len() / 2]).is_err());
        assert!(from_slice(&buf[..2]).is_err());
    }

    #[test]
    fn corrupt_string_length_is_rejected() {
        let mut buf = Vec::new();
        write_i32(&mut buf, PARCEL_VERSION).unwrap();
        write_i64(&mut buf, 0).unwrap();
        write_i32(&mut buf, 0).unwrap();
        // description length claims far more than the guard allows
        buf.extend_from_slice(&(MAX_STRING + 1).to_be_bytes());
        let err = from_slice(&buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut buf = Vec::new();
        write_i32(&mut buf, PARCEL_VERSION).unwrap();
        write_i64(&mut buf, 0).unwrap();
        write_i32(&mut buf, 0).unwrap();
        buf.extend_from_slice(&2u32.to_be_bytes());
        buf.extend_from_slice(&[0xff, 0xfe]);
        assert!(from_slice(&buf).is_err());
    }
}
