// I/O utilities for reading audio files

use std::io::{Read, Seek, SeekFrom};

/// Read little-endian 16-bit integer at `offset`
pub fn le_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read little-endian 32-bit integer at `offset`
pub fn le_u32(data: &[u8], offset: usize) -> u32 {
    let mut buffer = [0u8; 4];
    buffer.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(buffer)
}

/// Read little-endian 64-bit integer at `offset`
pub fn le_u64(data: &[u8], offset: usize) -> u64 {
    let mut buffer = [0u8; 8];
    buffer.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(buffer)
}

/// Read big-endian 32-bit integer at `offset`
pub fn be_u32(data: &[u8], offset: usize) -> u32 {
    let mut buffer = [0u8; 4];
    buffer.copy_from_slice(&data[offset..offset + 4]);
    u32::from_be_bytes(buffer)
}

/// Parse synchsafe 32-bit integer (7 bits per byte)
pub fn synchsafe_u32(bytes: &[u8]) -> u32 {
    ((bytes[0] as u32 & 0x7F) << 21)
        | ((bytes[1] as u32 & 0x7F) << 14)
        | ((bytes[2] as u32 & 0x7F) << 7)
        | (bytes[3] as u32 & 0x7F)
}

/// Read up to `size` bytes starting at `offset`.
///
/// Returns fewer bytes when the stream ends first, never an
/// `UnexpectedEof` error.
pub fn read_block_at<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    size: usize,
) -> std::io::Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buffer = Vec::with_capacity(size);
    reader.by_ref().take(size as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Total stream length, leaving the cursor at the start
pub fn stream_len<R: Seek>(reader: &mut R) -> std::io::Result<u64> {
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(len)
}
