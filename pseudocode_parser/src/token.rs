//! Token definitions for the pseudocode lexer

use logos::Logos;

/// Pseudocode tokens
///
/// Keywords are fully uppercase in the language; identifiers that merely
/// start with a keyword (`FORMAT`, `TOTAL`) lex as identifiers because the
/// longest match wins.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace (but not newlines)
#[logos(skip r"//[^\n]*")] // Skip line comments
pub enum Token {
    // ==================== Keywords ====================
    #[token("DECLARE")]
    KwDeclare,
    #[token("CONSTANT")]
    KwConstant,
    #[token("OUTPUT")]
    KwOutput,
    #[token("INPUT")]
    KwInput,
    #[token("IF")]
    KwIf,
    #[token("THEN")]
    KwThen,
    #[token("ELSE")]
    KwElse,
    #[token("ENDIF")]
    KwEndif,
    #[token("CASE")]
    KwCase,
    #[token("OF")]
    KwOf,
    #[token("OTHERWISE")]
    KwOtherwise,
    #[token("ENDCASE")]
    KwEndcase,
    #[token("WHILE")]
    KwWhile,
    #[token("DO")]
    KwDo,
    #[token("ENDWHILE")]
    KwEndwhile,
    #[token("REPEAT")]
    KwRepeat,
    #[token("UNTIL")]
    KwUntil,
    #[token("FOR")]
    KwFor,
    #[token("TO")]
    KwTo,
    #[token("STEP")]
    KwStep,
    #[token("NEXT")]
    KwNext,
    #[token("PROCEDURE")]
    KwProcedure,
    #[token("ENDPROCEDURE")]
    KwEndprocedure,
    #[token("FUNCTION")]
    KwFunction,
    #[token("RETURNS")]
    KwReturns,
    #[token("RETURN")]
    KwReturn,
    #[token("ENDFUNCTION")]
    KwEndfunction,
    #[token("CALL")]
    KwCall,
    #[token("LENGTH")]
    KwLength,

    // ==================== Word Operators ====================
    #[token("AND")]
    KwAnd,
    #[token("OR")]
    KwOr,
    #[token("MOD")]
    KwMod,

    // ==================== Type Names ====================
    #[token("INTEGER")]
    TyInteger,
    #[token("REAL")]
    TyReal,
    #[token("STRING")]
    TyString,
    #[token("BOOLEAN")]
    TyBoolean,
    #[token("CHAR")]
    TyChar,
    #[token("ARRAY")]
    TyArray,

    // ==================== Boolean Literals ====================
    #[token("TRUE")]
    True,
    #[token("FALSE")]
    False,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ==================== Punctuation ====================
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // ==================== Operators ====================
    /// Assignment arrow; the ASCII spelling is accepted everywhere `←` is.
    #[token("←")]
    #[token("<-")]
    Arrow,
    #[token("=")]
    Eq,
    #[token("<>")]
    Neq,
    #[token("<=")]
    Lte,
    #[token(">=")]
    Gte,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // ==================== Literals ====================
    /// A number with a decimal point lexes as REAL
    #[regex(r"[0-9]+\.[0-9]+")]
    RealLiteral,
    /// A number without a decimal point lexes as INTEGER
    #[regex(r"[0-9]+")]
    IntLiteral,
    /// Double-quoted, single line, backslash escapes
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    StringLiteral,
    /// Single-quoted single code point, same escapes
    #[regex(r"'([^'\\\n]|\\.)'")]
    CharLiteral,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    /// Statement separator; the parser consumes these between statements
    #[token("\n")]
    Newline,
}

/// Binary operator precedence, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Or = 1,
    And = 2,
    Comparison = 3,
    Additive = 4,
    Multiplicative = 5,
}

impl Precedence {
    /// The next-tighter level, used for left-associative climbing
    pub fn next(self) -> u8 {
        self as u8 + 1
    }
}

impl Token {
    /// Precedence of this token as a binary operator, if it is one
    pub fn binary_precedence(&self) -> Option<Precedence> {
        match self {
            Token::KwOr => Some(Precedence::Or),
            Token::KwAnd => Some(Precedence::And),
            Token::Eq | Token::Neq | Token::Lt | Token::Gt | Token::Lte | Token::Gte => {
                Some(Precedence::Comparison)
            }
            Token::Plus | Token::Minus => Some(Precedence::Additive),
            Token::Star | Token::Slash | Token::KwMod => Some(Precedence::Multiplicative),
            _ => None,
        }
    }

    /// Human-readable name used in parse error messages
    pub fn description(&self) -> &'static str {
        match self {
            Token::KwDeclare => "DECLARE",
            Token::KwConstant => "CONSTANT",
            Token::KwOutput => "OUTPUT",
            Token::KwInput => "INPUT",
            Token::KwIf => "IF",
            Token::KwThen => "THEN",
            Token::KwElse => "ELSE",
            Token::KwEndif => "ENDIF",
            Token::KwCase => "CASE",
            Token::KwOf => "OF",
            Token::KwOtherwise => "OTHERWISE",
            Token::KwEndcase => "ENDCASE",
            Token::KwWhile => "WHILE",
            Token::KwDo => "DO",
            Token::KwEndwhile => "ENDWHILE",
            Token::KwRepeat => "REPEAT",
            Token::KwUntil => "UNTIL",
            Token::KwFor => "FOR",
            Token::KwTo => "TO",
            Token::KwStep => "STEP",
            Token::KwNext => "NEXT",
            Token::KwProcedure => "PROCEDURE",
            Token::KwEndprocedure => "ENDPROCEDURE",
            Token::KwFunction => "FUNCTION",
            Token::KwReturns => "RETURNS",
            Token::KwReturn => "RETURN",
            Token::KwEndfunction => "ENDFUNCTION",
            Token::KwCall => "CALL",
            Token::KwLength => "LENGTH",
            Token::KwAnd => "AND",
            Token::KwOr => "OR",
            Token::KwMod => "MOD",
            Token::TyInteger => "INTEGER",
            Token::TyReal => "REAL",
            Token::TyString => "STRING",
            Token::TyBoolean => "BOOLEAN",
            Token::TyChar => "CHAR",
            Token::TyArray => "ARRAY",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::Comma => "','",
            Token::Colon => "':'",
            Token::Arrow => "'<-'",
            Token::Eq => "'='",
            Token::Neq => "'<>'",
            Token::Lte => "'<='",
            Token::Gte => "'>='",
            Token::Lt => "'<'",
            Token::Gt => "'>'",
            Token::Plus => "'+'",
            Token::Minus => "'-'",
            Token::Star => "'*'",
            Token::Slash => "'/'",
            Token::RealLiteral => "real literal",
            Token::IntLiteral => "integer literal",
            Token::StringLiteral => "string literal",
            Token::CharLiteral => "character literal",
            Token::Identifier => "identifier",
            Token::Newline => "newline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(|t| t.ok()).collect()
    }

    #[test]
    fn test_keywords_vs_identifiers() {
        assert_eq!(lex("FOR"), vec![Token::KwFor]);
        assert_eq!(lex("FORMAT"), vec![Token::Identifier]);
        assert_eq!(lex("TOTAL"), vec![Token::Identifier]);
    }

    #[test]
    fn test_arrow_spellings() {
        assert_eq!(lex("x ← 1"), vec![Token::Identifier, Token::Arrow, Token::IntLiteral]);
        assert_eq!(lex("x <- 1"), vec![Token::Identifier, Token::Arrow, Token::IntLiteral]);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(lex("3"), vec![Token::IntLiteral]);
        assert_eq!(lex("3.14"), vec![Token::RealLiteral]);
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            lex("<> <= >= < >"),
            vec![Token::Neq, Token::Lte, Token::Gte, Token::Lt, Token::Gt]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            lex("x // trailing comment\ny"),
            vec![Token::Identifier, Token::Newline, Token::Identifier]
        );
    }

    #[test]
    fn test_string_and_char() {
        assert_eq!(
            lex(r#""hi" 'c'"#),
            vec![Token::StringLiteral, Token::CharLiteral]
        );
    }
}
