use crate::domain::model::Timestamp;
use crate::utils::error::{Result, SlicerError};

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Parses `MM` or `MM:SS` into a [`Timestamp`].
///
/// Both parts must be unsigned integers and seconds must be below 60.
/// Hours and fractional seconds are not accepted.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    let parts: Vec<&str> = raw.split(':').collect();

    let timestamp = match parts.as_slice() {
        [minutes] => Timestamp::Minutes(parse_part(raw, "minutes", minutes)?),
        [minutes, seconds] => {
            let minutes = parse_part(raw, "minutes", minutes)?;
            let seconds = parse_part(raw, "seconds", seconds)?;
            if seconds > 59 {
                return Err(SlicerError::InvalidTimestampFormat {
                    raw: raw.to_string(),
                    reason: format!("seconds must be between 0 and 59, got {}", seconds),
                });
            }
            Timestamp::MinutesSeconds {
                minutes,
                seconds: seconds as u8,
            }
        }
        _ => {
            return Err(SlicerError::InvalidTimestampFormat {
                raw: raw.to_string(),
                reason: format!(
                    "expected minutes or minutes:seconds, found {} ':'-separated parts",
                    parts.len()
                ),
            })
        }
    };

    // 確保換算成毫秒時不會溢位
    if timestamp.minutes() > (u64::MAX - 59 * MS_PER_SECOND) / MS_PER_MINUTE {
        return Err(SlicerError::InvalidTimestampFormat {
            raw: raw.to_string(),
            reason: "minutes value is too large".to_string(),
        });
    }

    tracing::debug!("Parsed timestamp '{}' as {:?}", raw, timestamp);
    Ok(timestamp)
}

fn parse_part(raw: &str, name: &str, part: &str) -> Result<u64> {
    part.trim()
        .parse::<u64>()
        .map_err(|e| SlicerError::InvalidTimestampFormat {
            raw: raw.to_string(),
            reason: format!("{} '{}' is not a whole number ({})", name, part, e),
        })
}

/// Saturates at `u64::MAX` for timestamps built outside [`parse_timestamp`].
pub fn to_milliseconds(ts: &Timestamp) -> u64 {
    let seconds = ts.seconds().map(u64::from).unwrap_or(0);
    ts.minutes()
        .saturating_mul(MS_PER_MINUTE)
        .saturating_add(seconds * MS_PER_SECOND)
}

/// Filename tag for a timestamp: `5m` or `5m9s`, following the parsed shape.
pub fn derive_label(ts: &Timestamp) -> String {
    match ts {
        Timestamp::Minutes(minutes) => format!("{}m", minutes),
        Timestamp::MinutesSeconds { minutes, seconds } => format!("{}m{}s", minutes, seconds),
    }
}
