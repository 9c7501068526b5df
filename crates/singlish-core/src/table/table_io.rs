use super::config::{validate, TableSource};
use super::TableError;

pub const MAGIC: &[u8; 4] = b"SGTB";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 4 + 4; // magic + version + crc32 + payload_len = 13

/// Serialize an expanded table into the compiled `SGTB` format.
pub fn to_bytes(source: &TableSource) -> Result<Vec<u8>, TableError> {
    let payload = bincode::serialize(source).map_err(TableError::Serialize)?;
    let payload_len: u32 = payload
        .len()
        .try_into()
        .map_err(|_| TableError::Parse("payload exceeds u32::MAX".to_string()))?;
    let crc = crc32fast::hash(&payload);

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(&crc.to_le_bytes());
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub fn from_bytes(data: &[u8]) -> Result<TableSource, TableError> {
    if data.len() < 5 {
        return Err(TableError::InvalidHeader);
    }
    if &data[..4] != MAGIC {
        return Err(TableError::InvalidMagic);
    }
    if data[4] != VERSION {
        return Err(TableError::UnsupportedVersion(data[4]));
    }
    if data.len() < HEADER_SIZE {
        return Err(TableError::InvalidHeader);
    }

    let crc = read_u32(&data[5..9]);
    let payload_len = read_u32(&data[9..13]) as usize;
    let payload = data
        .get(HEADER_SIZE..HEADER_SIZE + payload_len)
        .ok_or(TableError::InvalidHeader)?;
    if crc32fast::hash(payload) != crc {
        return Err(TableError::ChecksumMismatch);
    }

    let source: TableSource = bincode::deserialize(payload).map_err(TableError::Deserialize)?;
    validate(&source)?;
    Ok(source)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}
