//! XEC amounts.
//!
//! One XEC is 100 satoshis, which is what the `bits` denomination means on
//! Bitcoin, so parsing reuses [`bitcoin::Amount`] with [`Denomination::Bit`].

use crate::error::Error;
use bitcoin::Amount;
use bitcoin::amount::Denomination;

/// Satoshis per XEC.
pub const SATS_PER_XEC: u64 = 100;

/// Minimum output value accepted by the network.
pub const DUST_SATS: u64 = 546;

/// Parses a decimal XEC amount such as `"1000"` or `"5.46"` into satoshis.
///
/// At most two decimal places are accepted.
pub fn parse_xec(input: &str) -> Result<u64, Error> {
    Amount::from_str_in(input.trim(), Denomination::Bit)
        .map(|amount| amount.to_sat())
        .map_err(|err| Error::InvalidXecAmount {
            input: input.to_string(),
            reason: err.to_string(),
        })
}

/// Formats satoshis as XEC without trailing zeros, e.g. `546 -> "5.46"`,
/// `1050 -> "10.5"`, `100000 -> "1000"`.
pub fn format_xec(sats: u64) -> String {
    let whole = sats / SATS_PER_XEC;
    match sats % SATS_PER_XEC {
        0 => whole.to_string(),
        cents if cents % 10 == 0 => format!("{whole}.{}", cents / 10),
        cents => format!("{whole}.{cents:02}"),
    }
}
