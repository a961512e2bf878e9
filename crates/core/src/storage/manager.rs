use crate::errors::CoreError;
use crate::models::snapshot::Snapshot;

use super::encryption::{self, KdfParams};
use super::format;
use super::snapshot_codec::SnapshotCodec;

/// High-level persistence: plain JSON documents and password-sealed backups,
/// in memory or on disk.
pub struct StorageManager;

impl StorageManager {
    /// Seal a snapshot under a password.
    ///
    /// Flow: Snapshot → JSON document → AES-256-GCM(Argon2id(password)) → ADBK container
    pub fn seal_with_params(
        snapshot: &Snapshot,
        password: &str,
        params: &KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        params.check_bounds()?;
        let document = SnapshotCodec::export(snapshot)?;
        let payload = encryption::seal(document.as_bytes(), password, params)?;
        Ok(format::encode(params, &payload))
    }

    /// Open a sealed backup. The decrypted document goes through the same
    /// validation as a plain import.
    pub fn open_from_bytes(data: &[u8], password: &str) -> Result<Snapshot, CoreError> {
        let (params, payload) = format::decode(data)?;
        let plaintext = encryption::open(&payload, password, &params)?;
        SnapshotCodec::import_bytes(&plaintext)
    }

    /// Write the plain JSON document to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_to_file(snapshot: &Snapshot, path: &str) -> Result<(), CoreError> {
        let document = SnapshotCodec::export(snapshot)?;
        std::fs::write(path, document)?;
        Ok(())
    }

    /// Read and validate a plain JSON document from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn import_from_file(path: &str) -> Result<Snapshot, CoreError> {
        let bytes = std::fs::read(path)?;
        SnapshotCodec::import_bytes(&bytes)
    }

    /// Write a sealed backup to disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn seal_to_file(
        snapshot: &Snapshot,
        path: &str,
        password: &str,
        params: &KdfParams,
    ) -> Result<(), CoreError> {
        let bytes = Self::seal_with_params(snapshot, password, params)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a sealed backup from disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_from_file(path: &str, password: &str) -> Result<Snapshot, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::open_from_bytes(&bytes, password)
    }
}
