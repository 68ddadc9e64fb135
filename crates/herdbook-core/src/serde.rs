// Module name shadows the `serde` crate — use `::serde` for the external crate.
use ::serde::Serializer;
use chrono::{DateTime, SecondsFormat, Utc};

/// Serialize `DateTime<Utc>` as RFC 3339 with 3-digit fractional seconds.
/// Matches the ISO strings the dashboard frontend already parses.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Serialize `Option<DateTime<Utc>>` with [`to_rfc3339_ms`] formatting,
/// `null` when absent.
pub fn opt_to_rfc3339_ms<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => to_rfc3339_ms(dt, s),
        None => s.serialize_none(),
    }
}

/// Serialize a list of timestamps with [`to_rfc3339_ms`] formatting.
pub fn vec_to_rfc3339_ms<S>(dts: &[DateTime<Utc>], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use ::serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(dts.len()))?;
    for dt in dts {
        seq.serialize_element(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))?;
    }
    seq.end()
}
