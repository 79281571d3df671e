use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SATS_PER_BSV: u64 = 100_000_000;

/// An Amount of BSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);
    /// Exactly one satoshi.
    pub const ONE_SAT: Amount = Amount(1);
    /// Exactly one bitcoin.
    pub const ONE_BSV: Amount = Amount(100_000_000);

    /// Convert to a float, using 1BSV = 10^8 satoshis. Dont use this in calculations.
    pub fn as_bsv(&self) -> f64 {
        self.0 as f64 / 100_000_000.0
    }

    /// Format as BSV with at least two decimal places, for example "1.00", "0.0015" or "-2.50".
    pub fn to_friendly_string(&self) -> String {
        self.format(2)
    }

    /// Format as BSV with no trailing zeros, for example "1", "0.0015" or "-2.5".
    pub fn to_plain_string(&self) -> String {
        self.format(0)
    }

    // integer arithmetic only, keeps at least min_decimals digits after the point
    fn format(&self, min_decimals: usize) -> String {
        let sats = self.0.unsigned_abs();
        let whole = sats / SATS_PER_BSV;
        let mut frac = format!("{:08}", sats % SATS_PER_BSV);
        while frac.len() > min_decimals && frac.ends_with('0') {
            frac.pop();
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        if frac.is_empty() {
            format!("{}{}", sign, whole)
        } else {
            format!("{}{}.{}", sign, whole, frac)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_friendly_string())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        f64::serialize(&self.as_bsv(), serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bsv = f64::deserialize(deserializer)?;
        Ok(Amount((bsv * 100_000_000.0).round() as i64))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

impl From<i64> for Amount {
    fn from(sats: i64) -> Self {
        Amount(sats)
    }
}
