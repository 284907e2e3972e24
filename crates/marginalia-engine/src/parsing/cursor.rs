/// A byte cursor over document text with position tracking.
///
/// Delimiters are all ASCII, so every position the parser stops at for a
/// successful match lies on a `char` boundary even though the cursor steps
/// byte by byte.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Offset of `s` within the full document.
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &str) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat.as_bytes()))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances while the current byte is not `stop`. Returns the number of
    /// bytes consumed.
    pub fn eat_until_byte(&mut self, stop: u8) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if b == stop {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }

    /// Moves to the next occurrence of `pat` at or after the current position.
    /// Leaves the cursor untouched and returns false if there is none.
    pub fn seek(&mut self, pat: &str) -> bool {
        match self.s.get(self.i..).and_then(|rest| rest.find(pat)) {
            Some(rel) => {
                self.i += rel;
                true
            }
            None => false,
        }
    }

    /// Text between two local indices.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.s[from..to]
    }
}
