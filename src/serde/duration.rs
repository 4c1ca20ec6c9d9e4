//! Timeouts as seconds.
//!
//! Accepts whole or fractional seconds (`30`, `2.5`) and writes whole seconds when the duration
//! has no sub-second part.

use serde::{Deserialize, Deserializer, Serializer, de::Error};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Whole(u64),
    Fractional(f64),
}

/// Serializes `timeout` as seconds.
pub fn serialize<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    if timeout.subsec_nanos() == 0 {
        serializer.serialize_u64(timeout.as_secs())
    } else {
        serializer.serialize_f64(timeout.as_secs_f64())
    }
}

/// Deserializes whole or fractional seconds into a [`Duration`].
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    match Seconds::deserialize(deserializer)? {
        Seconds::Whole(secs) => Ok(Duration::from_secs(secs)),
        Seconds::Fractional(secs) => Duration::try_from_secs_f64(secs)
            .map_err(|_| D::Error::custom(format!("invalid timeout: {secs}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Timeout {
        #[serde(with = "super")]
        timeout: Duration,
    }

    #[test]
    fn test_whole_and_fractional_seconds() {
        let parsed: Timeout = serde_yaml::from_str("timeout: 30").unwrap();
        assert_eq!(parsed.timeout, Duration::from_secs(30));
        assert_eq!(serde_yaml::to_string(&parsed).unwrap(), "timeout: 30\n");

        let parsed: Timeout = serde_yaml::from_str("timeout: 2.5").unwrap();
        assert_eq!(parsed.timeout, Duration::from_millis(2500));
        assert_eq!(serde_yaml::to_string(&parsed).unwrap(), "timeout: 2.5\n");

        assert!(serde_yaml::from_str::<Timeout>("timeout: -1.0").is_err());
    }
}
