use std::fmt;

/// A token of a single C++ declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Number(String),
    /// `::`
    Scope,
    Star,
    Amp,
    LParen,
    RParen,
    Comma,
    Eq,
    Semi,
    LAngle,
    RAngle,
    /// Any character the declaration grammar has no use for.
    Other(char),
}

impl Token {
    pub fn is_ident(&self, text: &str) -> bool {
        matches!(self, Token::Ident(s) if s == text)
    }

    /// Tokens that may appear inside a declared type.
    pub fn is_type_part(&self) -> bool {
        matches!(
            self,
            Token::Ident(_) | Token::Scope | Token::Star | Token::Amp
        )
    }

    fn is_indirection(&self) -> bool {
        matches!(self, Token::Star | Token::Amp)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Number(s) => write!(f, "{}", s),
            Token::Scope => write!(f, "::"),
            Token::Star => write!(f, "*"),
            Token::Amp => write!(f, "&"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Eq => write!(f, "="),
            Token::Semi => write!(f, ";"),
            Token::LAngle => write!(f, "<"),
            Token::RAngle => write!(f, ">"),
            Token::Other(c) => write!(f, "{}", c),
        }
    }
}

/// Splits one line into tokens. Whitespace separates tokens but is
/// otherwise insignificant; a `//` comment ends the line and `/* */`
/// comments are skipped.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '/' if line[start..].starts_with("//") => break,
            '/' if line[start..].starts_with("/*") => {
                match line[start + 2..].find("*/") {
                    Some(end) => {
                        let resume = start + 2 + end + 2;
                        while chars.peek().is_some_and(|&(i, _)| i < resume) {
                            chars.next();
                        }
                    }
                    None => break,
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, n)) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' {
                        end = i + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(line[start..end].to_string()));
            }
            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some(&(i, n)) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '.' {
                        end = i + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Number(line[start..end].to_string()));
            }
            ':' if chars.peek().is_some_and(|&(_, n)| n == ':') => {
                chars.next();
                tokens.push(Token::Scope);
            }
            '*' => tokens.push(Token::Star),
            '&' => tokens.push(Token::Amp),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            '=' => tokens.push(Token::Eq),
            ';' => tokens.push(Token::Semi),
            '<' => tokens.push(Token::LAngle),
            '>' => tokens.push(Token::RAngle),
            other => tokens.push(Token::Other(other)),
        }
    }

    tokens
}

/// Renders type tokens back to text with single spaces between words.
/// `::` binds to its neighbours and runs of `*`/`&` stay together, so
/// `const std :: string &` becomes `const std::string &`.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;

    for token in tokens {
        let glue = match prev {
            None => true,
            Some(Token::Scope) => true,
            Some(p) => *token == Token::Scope || (p.is_indirection() && token.is_indirection()),
        };
        if !glue {
            out.push(' ');
        }
        out.push_str(&token.to_string());
        prev = Some(token);
    }

    out
}
