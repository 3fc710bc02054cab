use bitcoin::Script;

/// Transaction output types relevant to eCash addresses.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OutputType {
    NonStandard,
    PubKeyHash([u8; 20]),
    ScriptHash([u8; 20]),
    // unspendable OP_RETURN script that carries data.
    NullData,
}

impl OutputType {
    /// Returns the script type name as used by node RPC responses.
    pub fn script_type(&self) -> &'static str {
        match self {
            Self::NonStandard => "nonstandard",
            Self::PubKeyHash(_) => "pubkeyhash",
            Self::ScriptHash(_) => "scripthash",
            Self::NullData => "nulldata",
        }
    }

    /// Returns the 20-byte hash of P2PKH and P2SH outputs.
    pub fn hash160(&self) -> Option<[u8; 20]> {
        match self {
            Self::PubKeyHash(hash) | Self::ScriptHash(hash) => Some(*hash),
            Self::NonStandard | Self::NullData => None,
        }
    }
}

/// Classifies an output script.
pub fn classify(script_pubkey: &Script) -> OutputType {
    let bytes = script_pubkey.as_bytes();

    if script_pubkey.is_p2sh() {
        let hash: [u8; 20] = bytes[2..22]
            .try_into()
            .expect("P2SH script carries a 20-byte hash; qed");
        return OutputType::ScriptHash(hash);
    }

    if script_pubkey.is_op_return() {
        return OutputType::NullData;
    }

    if script_pubkey.is_p2pkh() {
        let hash: [u8; 20] = bytes[3..23]
            .try_into()
            .expect("P2PKH script carries a 20-byte hash; qed");
        return OutputType::PubKeyHash(hash);
    }

    OutputType::NonStandard
}
