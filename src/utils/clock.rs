use chrono::{DateTime, Local};

/// Represents an entity responsible for providing the current moment. Only the cli boundary reads
/// it, everything past that receives an explicit date.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
