//! System-wide constants for the Tonvault exchange core.

/// The fixed numeraire token. Every order is priced in this token and every
/// fill settles its price leg in it.
pub const BASE_TOKEN: &str = "TON";

/// Base units per whole token (1 TON = 10^9 nanotons).
pub const NANO_PER_TON: u64 = 1_000_000_000;

/// Prefix of every derived wallet address.
pub const ADDRESS_PREFIX: &str = "EQ";

/// Number of hex characters of the pubkey hash kept in an address.
pub const ADDRESS_HASH_CHARS: usize = 46;

/// Length of a raw secret signing key (ed25519 seed).
pub const SECRET_KEY_LEN: usize = 32;

/// Length of the random salt fed to the password KDF.
pub const KDF_SALT_LEN: usize = 16;

/// Length of the AES-GCM nonce inside an encrypted-secret blob.
pub const AEAD_NONCE_LEN: usize = 12;

/// Length of the AES-GCM authentication tag inside an encrypted-secret blob.
pub const AEAD_TAG_LEN: usize = 16;

/// Prefix of transaction hashes issued by the simulated broadcaster.
pub const SIM_TX_PREFIX: &str = "sim_";

/// Default timeout for a single chain RPC call in milliseconds.
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;

/// Default fee limit for a native transfer.
pub const DEFAULT_FEE_LIMIT: u64 = 21_000;

/// Default fee price in nanotons per fee unit.
pub const DEFAULT_FEE_PRICE_NANO: u64 = 1_000;

/// Default chain identifier (testnet).
pub const DEFAULT_CHAIN_ID: u64 = 97;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Tonvault";
