use crate::errors::CoreError;
use super::encryption::{KdfParams, SealedPayload};

/// Magic bytes identifying a sealed Asset Dashboard backup.
pub const MAGIC: &[u8; 4] = b"ADBK";

/// Current container version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + payload_len(8)
pub const HEADER_SIZE: usize = 54;

/// Assemble a sealed backup container.
///
/// Layout (integers little-endian):
/// ```text
/// [ADBK: 4B] [version: 2B] [memory_cost: 4B] [time_cost: 4B] [parallelism: 4B]
/// [salt: 16B] [nonce: 12B] [payload_len: 8B] [ciphertext: payload_len B]
/// ```
pub fn encode(params: &KdfParams, payload: &SealedPayload) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&CURRENT_VERSION.to_le_bytes());
    for value in [params.memory_cost, params.time_cost, params.parallelism] {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf.extend_from_slice(&payload.salt);
    buf.extend_from_slice(&payload.nonce);
    buf.extend_from_slice(&(payload.ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(&payload.ciphertext);
    buf
}

/// Parse a container back into its KDF parameters and sealed payload.
/// Trailing bytes after the declared payload are ignored.
pub fn decode(data: &[u8]) -> Result<(KdfParams, SealedPayload), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a sealed backup".into(),
        ));
    }

    let mut reader = Reader { data, offset: 0 };

    if reader.take::<4>()? != *MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not a sealed backup".into(),
        ));
    }

    let version = u16::from_le_bytes(reader.take()?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let params = KdfParams {
        memory_cost: u32::from_le_bytes(reader.take()?),
        time_cost: u32::from_le_bytes(reader.take()?),
        parallelism: u32::from_le_bytes(reader.take()?),
    };
    params.check_bounds()?;

    let salt = reader.take::<16>()?;
    let nonce = reader.take::<12>()?;
    let payload_len = u64::from_le_bytes(reader.take()?);

    let available = (data.len() - reader.offset) as u64;
    if payload_len > available {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {payload_len} bytes of ciphertext, got {available}"
        )));
    }
    let ciphertext = data[reader.offset..reader.offset + payload_len as usize].to_vec();

    Ok((
        params,
        SealedPayload {
            salt,
            nonce,
            ciphertext,
        },
    ))
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let end = self.offset + N;
        let bytes: [u8; N] = self
            .data
            .get(self.offset..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat("Unexpected end of header".into()))?;
        self.offset = end;
        Ok(bytes)
    }
}
