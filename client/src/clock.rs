/// Source of the time-of-day stamp prefixed to local log lines.
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn time_of_day(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}
