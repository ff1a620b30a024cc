use std::fmt;
use std::str::FromStr;

/// Binary sequence the game is played over. Digits are stored as raw
/// `0`/`1` bytes so pattern counting and merging stay slice operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<u8>);

impl Sequence {
    pub fn from_digits(digits: Vec<u8>) -> Self {
        debug_assert!(digits.iter().all(|d| *d <= 1));
        Sequence(digits)
    }

    /// Parse from a string of `'0'`/`'1'` characters.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("sequence must contain at least one digit".to_string());
        }
        let mut digits = Vec::with_capacity(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '0' => digits.push(0),
                '1' => digits.push(1),
                other => {
                    return Err(format!(
                        "invalid character '{other}' at position {i}: sequence must contain only '0' and '1'"
                    ))
                }
            }
        }
        Ok(Sequence(digits))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    /// The adjacent pair starting at `index`, if both positions exist.
    #[inline]
    pub fn pair_at(&self, index: usize) -> Option<(u8, u8)> {
        if index + 1 < self.0.len() {
            Some((self.0[index], self.0[index + 1]))
        } else {
            None
        }
    }

    /// New sequence with the pair at `index` replaced by a single digit.
    /// Callers must have validated `index` via [`Sequence::pair_at`].
    pub fn merged(&self, index: usize, digit: u8) -> Sequence {
        let mut out = Vec::with_capacity(self.0.len() - 1);
        out.extend_from_slice(&self.0[..index]);
        out.push(digit);
        out.extend_from_slice(&self.0[index + 2..]);
        Sequence(out)
    }

    /// Number of (possibly overlapping) occurrences of `pattern`.
    pub fn count_pattern(&self, pattern: &[u8]) -> usize {
        if pattern.is_empty() || pattern.len() > self.0.len() {
            return 0;
        }
        self.0.windows(pattern.len()).filter(|w| *w == pattern).count()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sequence::parse(s)
    }
}
