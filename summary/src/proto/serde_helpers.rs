//! Serde helpers for server values whose BSON type varies between versions.

use bson::Bson;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Pack a BSON timestamp into its 64-bit form: seconds in the high 32 bits,
/// the intra-second ordinal in the low 32 bits. Plain integers are taken as
/// already encoded.
pub fn encode_timestamp(value: &Bson) -> Option<u64> {
    match value {
        Bson::Timestamp(ts) => Some((u64::from(ts.time) << 32) | u64::from(ts.increment)),
        Bson::Int64(v) => u64::try_from(*v).ok(),
        Bson::Int32(v) => u64::try_from(*v).ok(),
        Bson::Double(v) if *v >= 0.0 => Some(*v as u64),
        _ => None,
    }
}

/// Integer field that tolerates int32, int64 and double encodings.
pub mod lenient_i64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberVisitor)
    }
}

/// Optional variant of [`lenient_i64`]; use together with `#[serde(default)]`.
pub mod lenient_opt_i64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Bson>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(bson_number))
    }
}

/// Timestamp field kept in its encoded 64-bit form; absent or null is 0.
pub mod encoded_timestamp {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Bson>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(encode_timestamp).unwrap_or(0))
    }
}

fn bson_number(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) => Some(*v as i64),
        _ => None,
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or floating point number")
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<i64, E> {
        Ok(i64::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::custom(format!("{} does not fit in i64", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        Ok(v as i64)
    }
}
