//! constants.rs
//! Wire constants for Frame Streams and parameters of the anonymisation scheme.

/// Frame Streams control-type codes (wire contract).
pub mod control_ids {
    pub const ACCEPT: u32 = 0x01;
    pub const START: u32  = 0x02;
    pub const STOP: u32   = 0x03;
    pub const READY: u32  = 0x04;
    pub const FINISH: u32 = 0x05;
}

/// Length of every length prefix and of the control-type field.
pub const LEN_PREFIX: usize = 4;

/// Control bodies longer than this are rejected (Frame Streams reference limit).
pub const DEFAULT_MAX_CONTROL_FRAME_LEN: u32 = 512;

/// Upper bound on a single data frame (16 MiB).
pub const DEFAULT_MAX_DATA_FRAME_LEN: u32 = 16 * 1024 * 1024;

/// Anonymisation key length in bytes (AES-128).
pub const KEY_LEN_16: usize = 16;

/// PBKDF2-HMAC-SHA1 iteration count used by the ipcipher construction.
pub const PBKDF2_ROUNDS: u32 = 50_000;

/// Salt used when none is configured.
pub const DEFAULT_SALT: &[u8; 16] = b"cdnscdnscdnscdns";

/// Salt of the ipcipher scheme. Keys derived with it interoperate with ipcipher tooling.
pub const IPCIPHER_SALT: &[u8; 16] = b"ipcipheripcipher";

/// EDNS0 option codes and client-subnet families (RFC 7871).
pub mod edns {
    pub const OPTION_CLIENT_SUBNET: u16 = 8;

    pub const FAMILY_IPV4: u16 = 1;
    pub const FAMILY_IPV6: u16 = 2;

    /// code (2) + length (2)
    pub const OPTION_HEADER_LEN: usize = 4;

    /// family (2) + source prefix (1) + scope prefix (1)
    pub const ECS_FIXED_LEN: usize = 4;
}
