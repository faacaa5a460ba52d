/// Rejected configuration values. Only reachable through the seconds based entry points,
/// the typed [`Duration`](crate::clock::Duration) API cannot express them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Durations can not be negative
    NegativeDuration,
    /// NaN or infinite duration
    NonFiniteDuration,
    /// Does not fit the 32 bit millisecond counter
    DurationOverflow,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NegativeDuration => write!(f, "Duration must not be negative"),
            ConfigError::NonFiniteDuration => write!(f, "Duration must be a finite number"),
            ConfigError::DurationOverflow => {
                write!(f, "Duration exceeds {} ms", u32::MAX)
            }
        }
    }
}

impl core::error::Error for ConfigError {}
