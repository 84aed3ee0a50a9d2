use doctors_api::{ParseTimeError, TimeOfDay};

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

/// An `HH:mm` input typed digit by digit.
///
/// The colon is inserted automatically, and a leading digit that cannot
/// start a valid hour (3-9) is zero-padded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeInput {
    value: String,
}

impl TimeInput {
    pub fn from_time(time: TimeOfDay) -> Self {
        Self {
            value: time.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, time: TimeOfDay) {
        self.value = time.to_string();
    }

    pub fn parse(&self) -> Result<TimeOfDay, ParseTimeError> {
        self.value.parse()
    }

    pub fn is_complete(&self) -> bool {
        self.value.len() >= 5
    }

    pub fn input_char(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        // Typing into a full value starts over.
        if self.is_complete() {
            self.value.clear();
        }
        if self.value.is_empty() {
            if ('3'..='9').contains(&c) {
                self.value.push('0');
                self.value.push(c);
                self.value.push(':');
            } else {
                self.value.push(c);
            }
        } else {
            self.value.push(c);
            if self.value.len() == 2 {
                self.value.push(':');
            }
        }
    }

    /// Removing the auto-inserted colon also removes the digit before it.
    pub fn backspace(&mut self) {
        if self.value.pop() == Some(':') {
            self.value.pop();
        }
    }
}
