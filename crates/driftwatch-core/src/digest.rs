use sha2::{Digest, Sha256};

/// The fixed reference string representing a known-good device
/// configuration.
pub const PCI_BASELINE_CONFIG: &str = "pci_baseline_v1.2";

/// Configuration string substituted when tampering is simulated.
pub const TAMPERED_CONFIG: &str = "pci_baseline_v1.2_tampered_config";

/// SHA-256 of a UTF-8 string, rendered as lowercase zero-padded hex.
///
/// Deterministic and side-effect free. The digest depends only on the
/// input bytes.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Known-good baseline configuration and its precomputed digest.
///
/// Computed once at startup and passed by reference into the pipeline, so
/// the expected hash has an explicit owner and lifecycle instead of a
/// module-level cache.
#[derive(Debug, Clone)]
pub struct Baseline {
    config: String,
    expected_hash: String,
}

impl Baseline {
    pub fn new(config: impl Into<String>) -> Self {
        let config = config.into();
        let expected_hash = sha256_hex(&config);
        Self {
            config,
            expected_hash,
        }
    }

    /// The fixed PCI DSS baseline used by the simulation.
    pub fn pci_v1_2() -> Self {
        Self::new(PCI_BASELINE_CONFIG)
    }

    pub fn config(&self) -> &str {
        &self.config
    }

    pub fn expected_hash(&self) -> &str {
        &self.expected_hash
    }
}
