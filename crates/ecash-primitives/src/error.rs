/// Errors produced while decoding addresses and amounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("cashaddr prefix is empty")]
    EmptyPrefix,
    #[error("invalid cashaddr character '{0}'")]
    InvalidChar(char),
    #[error("cashaddr mixes upper and lower case characters")]
    MixedCase,
    #[error("invalid cashaddr checksum")]
    InvalidChecksum,
    #[error("invalid cashaddr payload length: {0}")]
    InvalidLength(usize),
    #[error("non-zero cashaddr padding")]
    InvalidPadding,
    #[error("unsupported cashaddr version byte {0:#04x}")]
    UnsupportedVersion(u8),
    /// Only P2PKH and P2SH scripts have a cashaddr representation.
    #[error("output script {0} is neither P2PKH nor P2SH")]
    NonStandardScript(String),
    #[error("invalid XEC amount '{input}': {reason}")]
    InvalidXecAmount { input: String, reason: String },
}
