use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Number of distinct nonterminal letters (`A`..=`Z`).
pub const NONTERMINAL_ALPHABET: usize = 26;

/// Character used in grammar sources for the empty string.
pub const EPSILON_CHAR: char = '_';

/// A nonterminal, identified by its index in the uppercase alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct Nonterminal(u8);

impl Nonterminal {
    /// Converts an uppercase letter to a nonterminal.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Nonterminal(c as u8 - b'A'))
        } else {
            None
        }
    }

    /// Builds a nonterminal from its index, if the index is in range.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NONTERMINAL_ALPHABET {
            Some(Nonterminal(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl From<Nonterminal> for char {
    fn from(nt: Nonterminal) -> Self {
        nt.to_char()
    }
}

impl TryFrom<char> for Nonterminal {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Nonterminal::from_char(c).ok_or_else(|| format!("'{}' is not a nonterminal", c))
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A lowercase letter, stored as its index in `a`..=`z`.
///
/// Only `Terminal::letter` and `Terminal::from_char` create one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }
}

/// A terminal symbol: a lowercase letter, or the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Terminal {
    Letter(Letter),
    Epsilon,
}

impl Terminal {
    /// Converts a lowercase letter or `_` to a terminal.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(Terminal::Letter(Letter(c as u8 - b'a')))
        } else if c == EPSILON_CHAR {
            Some(Terminal::Epsilon)
        } else {
            None
        }
    }

    /// Like `from_char`, but only accepts letters that can occur in a query string.
    pub fn letter(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Some(Terminal::Letter(Letter(c as u8 - b'a')))
        } else {
            None
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Terminal::Epsilon)
    }

    pub fn to_char(&self) -> char {
        match self {
            Terminal::Letter(letter) => letter.to_char(),
            Terminal::Epsilon => EPSILON_CHAR,
        }
    }
}

impl From<Terminal> for char {
    fn from(t: Terminal) -> Self {
        t.to_char()
    }
}

impl TryFrom<char> for Terminal {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Terminal::from_char(c).ok_or_else(|| format!("'{}' is not a terminal", c))
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Classification of a single character of grammar source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Nonterminal(Nonterminal),
    Terminal(Terminal),
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        Nonterminal::from_char(c)
            .map(Symbol::Nonterminal)
            .or_else(|| Terminal::from_char(c).map(Symbol::Terminal))
    }
}

/// A duplicate-free set of nonterminals, iterated in alphabet order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NonterminalSet(u32);

impl NonterminalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `nt`; returns false if it was already present.
    pub fn insert(&mut self, nt: Nonterminal) -> bool {
        let bit = 1u32 << nt.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    pub fn contains(&self, nt: Nonterminal) -> bool {
        self.0 & (1u32 << nt.index()) != 0
    }

    pub fn union_with(&mut self, other: &NonterminalSet) {
        self.0 |= other.0;
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Nonterminal> + '_ {
        (0..NONTERMINAL_ALPHABET)
            .filter(move |&i| self.0 & (1u32 << i) != 0)
            .filter_map(Nonterminal::from_index)
    }
}

impl FromIterator<Nonterminal> for NonterminalSet {
    fn from_iter<I: IntoIterator<Item = Nonterminal>>(iter: I) -> Self {
        let mut set = NonterminalSet::new();
        for nt in iter {
            set.insert(nt);
        }
        set
    }
}

impl Serialize for NonterminalSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl fmt::Display for NonterminalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nt in self.iter() {
            write!(f, "{}", nt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classification() {
        assert_eq!(
            Symbol::from_char('S'),
            Some(Symbol::Nonterminal(Nonterminal::from_char('S').unwrap()))
        );
        assert_eq!(
            Symbol::from_char('a'),
            Some(Symbol::Terminal(Terminal::letter('a').unwrap()))
        );
        assert_eq!(Symbol::from_char('_'), Some(Symbol::Terminal(Terminal::Epsilon)));
        assert_eq!(Symbol::from_char('1'), None);
        assert_eq!(Symbol::from_char(' '), None);
    }

    #[test]
    fn test_nonterminal_round_trip_through_index() {
        let z = Nonterminal::from_char('Z').unwrap();
        assert_eq!(z.index(), 25);
        assert_eq!(Nonterminal::from_index(25), Some(z));
        assert_eq!(Nonterminal::from_index(26), None);
        assert_eq!(z.to_char(), 'Z');
    }

    #[test]
    fn test_query_letters_exclude_epsilon() {
        assert_eq!(Terminal::letter('q').map(|t| t.to_char()), Some('q'));
        assert_eq!(Terminal::letter('_'), None);
        assert_eq!(Terminal::letter('Q'), None);
    }

    #[test]
    fn test_letters_only_cover_lowercase_alphabet() {
        let indices: Vec<usize> = ('a'..='z')
            .map(|c| match Terminal::letter(c) {
                Some(Terminal::Letter(letter)) => letter.index(),
                other => panic!("'{}' gave {:?}", c, other),
            })
            .collect();
        assert_eq!(indices, (0..26).collect::<Vec<_>>());

        for c in ['A', 'Z', '@', '{', '0', 'é'] {
            assert_eq!(Terminal::from_char(c), None, "'{}' accepted", c);
        }
        assert!(serde_json::from_str::<Terminal>("\"A\"").is_err());
    }

    #[test]
    fn test_nonterminal_set_deduplicates() {
        let a = Nonterminal::from_char('A').unwrap();
        let c = Nonterminal::from_char('C').unwrap();
        let mut set = NonterminalSet::new();

        assert!(set.insert(c));
        assert!(set.insert(a));
        assert!(!set.insert(c));

        assert_eq!(set.len(), 2);
        assert!(set.contains(a));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(set.to_string(), "AC");
    }

    #[test]
    fn test_nonterminal_set_serializes_as_letters() {
        let set: NonterminalSet = "BS".chars().filter_map(Nonterminal::from_char).collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[\"B\",\"S\"]");
    }
}
