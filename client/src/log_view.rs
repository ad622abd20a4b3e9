use std::collections::{HashSet, VecDeque};

/// Maximum number of lines kept in the visible log.
pub const LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// ANSI color escape for the line, if any. Info lines are left unstyled.
    pub fn ansi(self) -> Option<&'static str> {
        match self {
            Severity::Info => None,
            Severity::Success => Some("\x1b[32m"),
            Severity::Warning => Some("\x1b[33m"),
            Severity::Error => Some("\x1b[31m"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    /// `None` for lines merged from the relay, which arrive already formatted.
    pub severity: Option<Severity>,
}

impl LogEntry {
    pub fn local(timestamp: &str, message: &str, severity: Severity) -> Self {
        Self {
            text: format!("[{}] {}", timestamp, message),
            severity: Some(severity),
        }
    }

    pub fn remote(line: impl Into<String>) -> Self {
        Self {
            text: line.into(),
            severity: None,
        }
    }
}

/// What a mutation did to the log, so a surface can mirror it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogChange {
    pub appended: Vec<LogEntry>,
    pub evicted: usize,
}

/// Append-only, capped list of log lines, oldest first.
#[derive(Debug)]
pub struct LogView {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for LogView {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl LogView {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) -> LogChange {
        self.entries.push_back(entry.clone());
        LogChange {
            appended: vec![entry],
            evicted: self.enforce_capacity(),
        }
    }

    /// Appends every line not already displayed, verbatim, then applies the cap.
    ///
    /// Matching is exact text against all lines present before the merge, so
    /// replaying the same batch adds nothing.
    pub fn merge_remote<S: AsRef<str>>(&mut self, lines: &[S]) -> LogChange {
        let displayed: HashSet<&str> = self.entries.iter().map(|e| e.text.as_str()).collect();
        let fresh: Vec<LogEntry> = lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|line| !displayed.contains(line))
            .map(LogEntry::remote)
            .collect();

        self.entries.extend(fresh.iter().cloned());
        LogChange {
            appended: fresh,
            evicted: self.enforce_capacity(),
        }
    }

    fn enforce_capacity(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    fn contains_text(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.text == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_evicts_oldest_first() {
        let mut log = LogView::default();
        let mut evicted = 0;
        for i in 1..=105 {
            evicted += log.push(LogEntry::local("12:00:00", &format!("entry {}", i), Severity::Info)).evicted;
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(evicted, 5);
        for i in 1..=5 {
            assert!(!log.contains_text(&format!("[12:00:00] entry {}", i)));
        }
        assert_eq!(log.iter().next().map(|e| e.text.as_str()), Some("[12:00:00] entry 6"));
        assert_eq!(log.iter().last().map(|e| e.text.as_str()), Some("[12:00:00] entry 105"));
    }

    #[test]
    fn merging_the_same_batch_twice_adds_each_line_once() {
        let mut log = LogView::default();
        let batch = ["[10:00:00] SENT POST to x - Status: 200", "[10:00:01] RECEIVED GET at /webhook1"];

        let first = log.merge_remote(&batch);
        assert_eq!(first.appended.len(), 2);

        let second = log.merge_remote(&batch);
        assert!(second.appended.is_empty());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn merged_lines_are_verbatim_and_unstyled() {
        let mut log = LogView::default();
        log.merge_remote(&["raw line"]);
        let entry = log.iter().next().expect("merged line");
        assert_eq!(entry.text, "raw line");
        assert_eq!(entry.severity, None);
    }

    #[test]
    fn merge_applies_the_cap() {
        let mut log = LogView::with_capacity(3);
        log.push(LogEntry::remote("a"));
        log.push(LogEntry::remote("b"));
        let change = log.merge_remote(&["b", "c", "d"]);
        assert_eq!(change.appended.len(), 2);
        assert_eq!(change.evicted, 1);
        let texts: Vec<&str> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["b", "c", "d"]);
    }

    #[test]
    fn only_info_is_unstyled() {
        assert_eq!(Severity::Info.ansi(), None);
        assert_eq!(Severity::Error.ansi(), Some("\x1b[31m"));
        assert_eq!(Severity::Success.ansi(), Some("\x1b[32m"));
        assert_eq!(Severity::Warning.ansi(), Some("\x1b[33m"));
    }
}
