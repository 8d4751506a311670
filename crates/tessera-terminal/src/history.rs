//! Command history with up/down navigation.

/// Submitted lines, oldest first, plus a navigation cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    limit: usize,
    /// `None` while not navigating; otherwise an index into `entries`, or
    /// `entries.len()` once forward has stepped past the newest entry.
    cursor: Option<usize>,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
            cursor: None,
        }
    }

    /// Record a submitted line and end navigation.
    ///
    /// Blank lines and repeats of the newest entry are not stored.
    pub fn push(&mut self, line: &str) {
        self.cursor = None;
        if line.trim().is_empty() || self.entries.last().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push(line.to_string());
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
    }

    /// Step toward older entries. The first step lands on the newest one.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step toward newer entries. Past the newest entry this yields an
    /// empty line; when not navigating it yields nothing.
    pub fn forward(&mut self) -> Option<&str> {
        let i = self.cursor?;
        let index = (i + 1).min(self.entries.len());
        self.cursor = Some(index);
        Some(self.entries.get(index).map_or("", String::as_str))
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
