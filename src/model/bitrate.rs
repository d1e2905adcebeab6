use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target encoding bitrate, normalised to the `<number>k` form ffmpeg expects
#[derive(Debug, Clone, PartialEq)]
pub struct Bitrate {
    /// Numeric part as given on the command line (e.g. "320", "192.5")
    number: String,

    /// Parsed value in kbps
    kbps: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("specified bitrate ({0}) is not valid")]
pub struct BitrateParseError(pub String);

impl Bitrate {
    /// Bitrate in kilobits per second
    pub fn kbps(&self) -> f64 {
        self.kbps
    }

    /// Whether a source encoded at `source_kbps` already meets this target.
    ///
    /// The boundary is inclusive: a source at exactly the target is not re-encoded.
    pub fn is_met_by(&self, source_kbps: u32) -> bool {
        f64::from(source_kbps) <= self.kbps
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self {
            number: "320".to_string(),
            kbps: 320.0,
        }
    }
}

impl FromStr for Bitrate {
    type Err = BitrateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_lowercase();
        let number = lowered.strip_suffix('k').unwrap_or(&lowered).trim();

        let kbps: f64 = number
            .parse()
            .map_err(|_| BitrateParseError(trimmed.to_string()))?;

        if !kbps.is_finite() || kbps <= 0.0 {
            return Err(BitrateParseError(trimmed.to_string()));
        }

        Ok(Self {
            number: number.to_string(),
            kbps,
        })
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}k", self.number)
    }
}
