use thiserror::Error;

/// Unified error type for the entire asset-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Valuation ───────────────────────────────────────────────────
    #[error("No exchange rate available for {from} → {to}")]
    MissingRate { from: String, to: String },

    #[error("Price not available for {ticker}")]
    PriceUnavailable { ticker: String },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Transaction not found at position {0}")]
    TransactionNotFound(usize),

    // ── Holdings / Settings ─────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Holding with ticker {0} already exists")]
    DuplicateTicker(String),

    // ── Snapshot import / export ────────────────────────────────────
    #[error("Snapshot rejected: {0}")]
    Schema(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Sealed backups ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted file")]
    Decryption,

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Price oracle ────────────────────────────────────────────────
    #[error("Oracle error ({oracle}): {message}")]
    Oracle { oracle: String, message: String },
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

/// JSON failures only ever surface while reading a snapshot document,
/// so they are reported as schema errors.
impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Schema(e.to_string())
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
