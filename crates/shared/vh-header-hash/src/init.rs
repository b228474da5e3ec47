//! Process-wide initialization of header hashing

use crate::config::HasherConfig;
use crate::primitives::{HashPrimitives, ReferencePrimitives};
use once_cell::sync::OnceCell;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;
use vh_core_primitives::hashes::Hash256;

/// Double SHA-256 of empty input
const SHA256D_EMPTY: Hash256 = Hash256::new([
    0x5d, 0xf6, 0xe0, 0xe2, 0x76, 0x13, 0x59, 0xd3, 0x0a, 0x82, 0x75, 0x05, 0x8e, 0x29, 0x9f, 0xcc,
    0x03, 0x81, 0x53, 0x45, 0x45, 0xf5, 0x5c, 0xf4, 0x3e, 0x41, 0x98, 0x3f, 0x5d, 0x4c, 0x94, 0x56,
]);

static PRIMITIVES: OnceCell<ReferencePrimitives> = OnceCell::new();
static CONFIG: OnceCell<HasherConfig> = OnceCell::new();

/// Initialization error
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Secure random number generator is unavailable
    #[error("Secure random number generator is unavailable: {error}")]
    Rng {
        /// Low-level error
        error: rand::Error,
    },
    /// Hash primitives produced unexpected output
    #[error("Hash primitives self-test failed: expected {expected}, got {actual}")]
    SelfTest {
        /// Expected output
        expected: Hash256,
        /// Actual output
        actual: Hash256,
    },
    /// Already initialized with a different config
    #[error("Already initialized with {existing:?}, can't re-initialize with {requested:?}")]
    ConfigMismatch {
        /// Config in use
        existing: HasherConfig,
        /// Requested config
        requested: HasherConfig,
    },
}

/// Initialize header hashing with default config.
///
/// Safe to call multiple times and from multiple threads, does nothing if already initialized
/// (with any config). Failed initialization is not remembered and can be retried.
pub fn initialize() -> Result<(), InitError> {
    CONFIG.get_or_try_init(|| init_config(HasherConfig::default()))?;

    Ok(())
}

/// Initialize header hashing with provided config.
///
/// Same as [`initialize()`], but returns an error if already initialized with a different config.
pub fn initialize_with_config(config: HasherConfig) -> Result<(), InitError> {
    let existing = *CONFIG.get_or_try_init(|| init_config(config))?;

    if existing != config {
        return Err(InitError::ConfigMismatch {
            existing,
            requested: config,
        });
    }

    Ok(())
}

/// Whether header hashing was initialized successfully
pub fn is_initialized() -> bool {
    CONFIG.get().is_some()
}

/// Config in use, `None` if not initialized yet
pub fn config() -> Option<HasherConfig> {
    CONFIG.get().copied()
}

/// Reference primitives, key tables are derived on first access
pub fn reference_primitives() -> &'static ReferencePrimitives {
    PRIMITIVES.get_or_init(|| {
        debug!("Deriving reference hash primitives");
        ReferencePrimitives::new()
    })
}

fn init_config(config: HasherConfig) -> Result<HasherConfig, InitError> {
    let mut random_bytes = [0; 32];
    OsRng
        .try_fill_bytes(&mut random_bytes)
        .map_err(|error| InitError::Rng { error })?;

    let actual = reference_primitives().sha256d(&[]);
    if actual != SHA256D_EMPTY {
        return Err(InitError::SelfTest {
            expected: SHA256D_EMPTY,
            actual,
        });
    }

    debug!(chain_id = %config.chain_id, "Header hashing initialized");

    Ok(config)
}
