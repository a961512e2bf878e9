// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use asset_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn missing_rate() {
        let err = CoreError::MissingRate {
            from: "USD".into(),
            to: "JPY".into(),
        };
        assert_eq!(err.to_string(), "No exchange rate available for USD → JPY");
    }

    #[test]
    fn price_unavailable() {
        let err = CoreError::PriceUnavailable {
            ticker: "GLD".into(),
        };
        assert_eq!(err.to_string(), "Price not available for GLD");
    }

    #[test]
    fn overflow() {
        let err = CoreError::Overflow("value too large".into());
        assert_eq!(err.to_string(), "Arithmetic overflow: value too large");
    }

    #[test]
    fn invalid_transaction() {
        let err = CoreError::InvalidTransaction("amount must be positive (got 0)".into());
        assert_eq!(
            err.to_string(),
            "Invalid transaction: amount must be positive (got 0)"
        );
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound(7);
        assert_eq!(err.to_string(), "Transaction not found at position 7");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("quantity must not be negative".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: quantity must not be negative"
        );
    }

    #[test]
    fn holding_not_found() {
        let err = CoreError::HoldingNotFound("QQQ".into());
        assert_eq!(err.to_string(), "Holding not found: QQQ");
    }

    #[test]
    fn duplicate_ticker() {
        let err = CoreError::DuplicateTicker("VTI".into());
        assert_eq!(err.to_string(), "Holding with ticker VTI already exists");
    }

    #[test]
    fn schema() {
        let err = CoreError::Schema("missing field `holdings`".into());
        assert_eq!(err.to_string(), "Snapshot rejected: missing field `holdings`");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer overflow".into());
        assert_eq!(err.to_string(), "Serialization error: buffer overflow");
    }

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("bad header".into());
        assert_eq!(err.to_string(), "Invalid file format: bad header");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported file version: 99");
    }

    #[test]
    fn encryption() {
        let err = CoreError::Encryption("AES key size invalid".into());
        assert_eq!(err.to_string(), "Encryption failed: AES key size invalid");
    }

    #[test]
    fn decryption() {
        assert_eq!(
            CoreError::Decryption.to_string(),
            "Decryption failed — wrong password or corrupted file"
        );
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn oracle() {
        let err = CoreError::Oracle {
            oracle: "Yahoo Finance".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "Oracle error (Yahoo Finance): rate limited");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();
        match &core_err {
            CoreError::FileIO(msg) => assert!(msg.contains("file not found")),
            other => panic!("Expected FileIO, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_is_schema() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{{invalid json");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Schema(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Schema, got {:?}", other),
        }
    }

    #[test]
    fn from_aes_gcm_error() {
        let core_err: CoreError = aes_gcm::Error.into();
        assert!(matches!(core_err, CoreError::Decryption));
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::HoldingNotFound("X".into()));
        assert!(err.to_string().contains('X'));
    }

    #[test]
    fn core_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}

// ── Edge cases ──────────────────────────────────────────────────────

mod edge_cases {
    use super::*;

    #[test]
    fn unicode_in_error_message() {
        let err = CoreError::Oracle {
            oracle: "日本API".into(),
            message: "接続エラー".into(),
        };
        assert_eq!(err.to_string(), "Oracle error (日本API): 接続エラー");
    }

    #[test]
    fn multiline_schema_reason() {
        let err = CoreError::Schema("line1\nline2".into());
        assert!(err.to_string().ends_with("line1\nline2"));
    }
}
