use serde::Serialize;
use std::fmt::{Debug, Display, Formatter};
use std::num::ParseIntError;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationInSeconds(pub u64);

impl DurationInSeconds {
    pub fn seconds(&self) -> u64 {
        self.0
    }

    pub fn to_std(self) -> Duration {
        Duration::from_secs(self.0)
    }

    pub fn to_chrono(self) -> chrono::Duration {
        chrono::Duration::seconds(self.0 as i64)
    }
}

impl Debug for DurationInSeconds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s ({}m/{}h)", self.0, self.0 / 60, self.0 / 60 / 60)
    }
}

impl From<u64> for DurationInSeconds {
    fn from(value: u64) -> Self {
        DurationInSeconds(value)
    }
}

impl TryFrom<String> for DurationInSeconds {
    type Error = ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(DurationInSeconds(value.trim().parse::<u64>()?))
    }
}

/// Secret value whose `Display`/`Debug` output is masked.
#[derive(Clone, Serialize)]
pub struct HiddenString(String);

impl HiddenString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for HiddenString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", "*".repeat(self.0.len()))
    }
}

impl Debug for HiddenString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", "*".repeat(self.0.len()))
    }
}

impl From<String> for HiddenString {
    fn from(value: String) -> Self {
        HiddenString(value)
    }
}

impl From<&str> for HiddenString {
    fn from(value: &str) -> Self {
        HiddenString(value.to_string())
    }
}
