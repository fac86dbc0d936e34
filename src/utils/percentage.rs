use std::{fmt::Display, ops::Deref};

/// Share of a quota in whole percents. The value is not bounded, 900 minutes out of 720 is 125%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct Percentage(i64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Percentage {
    #[cfg(test)]
    pub fn new(value: i64) -> Percentage {
        Percentage(value)
    }

    /// Value usable as a progress bar width.
    pub fn clamped(&self) -> u8 {
        self.0.clamp(0, 100) as u8
    }
}

impl Deref for Percentage {
    type Target = i64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// `value / whole * 100` rounded half up. A zero `whole` is treated as one minute so the result
/// stays finite.
pub fn minutes_percentage(value: u32, whole: u32) -> Percentage {
    let value = i64::from(value);
    let whole = i64::from(whole.max(1));
    // round(x) for x >= 0 is floor(x + 1/2), done in integers to avoid float ties
    Percentage((value * 200 + whole) / (whole * 2))
}
