use thiserror::Error;

/// The reason a grammar line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarErrorKind {
    #[error("expected a rule of the form \"X -> ...\"")]
    MalformedRule,
    #[error("unexpected character '{0}' in production")]
    UnexpectedSymbol(char),
    #[error("expected a pair of nonterminals, found only one")]
    NotPair,
    #[error("a space is missing")]
    SpaceExpected,
    #[error("separator '|' is missing")]
    SeparatorExpected,
    #[error("only one terminal per production, followed by a separator or end of line")]
    NotSingleTerminal,
    #[error("production expected after the arrow or separator")]
    MissingAlternative,
    #[error("line is too long (at most {max} characters)")]
    LineTooLong { max: usize },
    #[error("no nonterminal may produce the start symbol")]
    StartSymbolOnRhs,
    #[error("only the start symbol may produce the empty string")]
    EpsilonNotOnStart,
    #[error("too many productions for one nonterminal (at most {max})")]
    TooManyProductions { max: usize },
    #[error("production occurs more than once")]
    DuplicateProduction,
    #[error("too many nonterminals (at most {max})")]
    TooManyNonterminals { max: usize },
    #[error("grammar contains no rules")]
    EmptyGrammar,
}

/// A grammar load failure, attributed to a 1-based source line.
///
/// `EmptyGrammar` carries the number of lines that were read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct GrammarError {
    pub line: usize,
    pub kind: GrammarErrorKind,
}

impl GrammarError {
    pub fn new(line: usize, kind: GrammarErrorKind) -> Self {
        Self { line, kind }
    }
}

/// A rejected derivability query. The grammar stays usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("string is {len} characters long (at most {max} allowed)")]
    StringTooLong { len: usize, max: usize },
    #[error("character '{ch}' at position {position} is not a terminal (a-z)")]
    InvalidAlphabet { ch: char, position: usize },
    #[error("could not allocate a table of {cells} cells")]
    TableAllocation { cells: usize },
}
