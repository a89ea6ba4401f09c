//! Grammar rules for pure-virtual method declarations.
//!
//! The accepted grammar is deliberately narrow:
//!
//! ```text
//! declaration := "virtual" type name "(" parameters? ")" "const"? "=" "0" ";"
//! parameters  := parameter ("," parameter)* | "void"
//! parameter   := type name
//! type        := (identifier | "::" | "*" | "&")+
//! ```
//!
//! Anything else (templates, default arguments, nested parentheses,
//! multi-line declarations) is rejected with a [`ParseError`].

use crate::error::ParseError;
use crate::interface::{Function, FunctionArgument};
use crate::lexer::{join_tokens, tokenize, Token};

/// Words that can be part of a type but never name a parameter.
const TYPE_KEYWORDS: &[&str] = &[
    "auto", "bool", "char", "char16_t", "char32_t", "char8_t", "class", "const", "double",
    "enum", "float", "int", "long", "short", "signed", "struct", "typename", "unsigned", "void",
    "volatile", "wchar_t",
];

/// Returns true when `line` has the shape of a pure-virtual declaration:
/// its first token is `virtual` and it ends with `= 0 ;`. Pure-virtual
/// destructors (`virtual ~IFoo() = 0;`) are not methods to implement.
pub fn is_pure_virtual_declaration(line: &str) -> bool {
    let tokens = tokenize(line);
    let starts_virtual = tokens.first().is_some_and(|t| t.is_ident("virtual"));
    let destructor = tokens.get(1) == Some(&Token::Other('~'));
    starts_virtual && !destructor && ends_pure(&tokens)
}

fn ends_pure(tokens: &[Token]) -> bool {
    matches!(
        tokens,
        [.., Token::Eq, Token::Number(zero), Token::Semi] if zero == "0"
    )
}

/// Parses a line already accepted by [`is_pure_virtual_declaration`].
pub fn parse_declaration(line: &str) -> Result<Function, ParseError> {
    let tokens = tokenize(line);
    let err = |message: String| ParseError::new(line, message);

    match tokens.first() {
        Some(t) if t.is_ident("virtual") => {}
        Some(t) => return Err(err(format!("expected 'virtual', found '{}'", t))),
        None => return Err(err("expected 'virtual', found end of line".to_string())),
    }

    let open = tokens
        .iter()
        .position(|t| *t == Token::LParen)
        .ok_or_else(|| err("expected '(' after the method name".to_string()))?;

    let name = match open.checked_sub(1).and_then(|i| tokens.get(i)) {
        Some(Token::Ident(name)) if open >= 2 => name.clone(),
        Some(t) => {
            return Err(err(format!(
                "expected a method name before '(', found '{}'",
                t
            )))
        }
        None => return Err(err("expected a method name before '('".to_string())),
    };

    let return_tokens = &tokens[1..open - 1];
    if return_tokens.is_empty() {
        return Err(err(format!(
            "expected a return type before method name '{}'",
            name
        )));
    }
    if let Some(bad) = return_tokens.iter().find(|t| !t.is_type_part()) {
        return Err(err(format!(
            "unsupported token '{}' in return type",
            bad
        )));
    }

    let close = matching_paren(&tokens, open).map_err(err)?;
    let arguments = parse_parameter_list(line, &tokens[open + 1..close])?;

    let mut rest = &tokens[close + 1..];
    let is_const = rest.first().is_some_and(|t| t.is_ident("const"));
    if is_const {
        rest = &rest[1..];
    }
    if !matches!(rest, [Token::Eq, Token::Number(zero), Token::Semi] if zero == "0") {
        return Err(err(format!(
            "expected '= 0;' after the parameter list, found '{}'",
            join_tokens(rest)
        )));
    }

    Ok(Function {
        return_type: join_tokens(return_tokens),
        name,
        arguments,
        is_const,
    })
}

fn matching_paren(tokens: &[Token], open: usize) -> Result<usize, String> {
    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        match token {
            Token::RParen => return Ok(i),
            Token::LParen => {
                return Err("nested parentheses in the parameter list are not supported".to_string())
            }
            _ => {}
        }
    }
    Err("expected ')' closing the parameter list".to_string())
}

fn parse_parameter_list(line: &str, tokens: &[Token]) -> Result<Vec<FunctionArgument>, ParseError> {
    if tokens.is_empty() || matches!(tokens, [t] if t.is_ident("void")) {
        return Ok(Vec::new());
    }

    tokens
        .split(|t| *t == Token::Comma)
        .map(|parameter| {
            if parameter.is_empty() {
                return Err(ParseError::new(line, "expected a parameter between commas"));
            }
            argument_from_tokens(line, parameter)
        })
        .collect()
}

/// Parses one raw parameter such as `const Canvas &c`.
pub fn parse_argument(raw: &str) -> Result<FunctionArgument, ParseError> {
    argument_from_tokens(raw, &tokenize(raw))
}

fn argument_from_tokens(line: &str, tokens: &[Token]) -> Result<FunctionArgument, ParseError> {
    let shown = join_tokens(tokens);

    if let Some(bad) = tokens.iter().find(|t| !t.is_type_part()) {
        let message = match bad {
            Token::Eq => format!("default arguments are not supported in '{}'", shown),
            Token::LAngle | Token::RAngle => {
                format!("templated types are not supported in '{}'", shown)
            }
            other => format!("unsupported token '{}' in parameter '{}'", other, shown),
        };
        return Err(ParseError::new(line, message));
    }

    let (name, declared) = match tokens.split_last() {
        Some((Token::Ident(name), declared)) if !declared.is_empty() => (name, declared),
        Some((Token::Ident(_), _)) | None => {
            return Err(ParseError::new(
                line,
                format!("expected '<type> <name>', found '{}'", shown),
            ))
        }
        Some((last, _)) => {
            return Err(ParseError::new(
                line,
                format!("expected a parameter name after '{}', found '{}'", shown, last),
            ))
        }
    };

    if TYPE_KEYWORDS.contains(&name.as_str()) {
        return Err(ParseError::new(
            line,
            format!(
                "expected a parameter name after '{}', found type keyword '{}'",
                join_tokens(declared),
                name
            ),
        ));
    }

    let declared_type = join_tokens(declared);
    let bare_type = strip_qualifiers(&declared_type);
    if bare_type.is_empty() {
        return Err(ParseError::new(
            line,
            format!(
                "expected '<type> <name>', found qualifiers only before '{}' in '{}'",
                name, shown
            ),
        ));
    }

    Ok(FunctionArgument {
        bare_type,
        declared_type,
        name: name.clone(),
    })
}

/// Removes `const`, `*`, `&` and all whitespace, in that order, repeating
/// until nothing changes so the result is a fixed point.
pub fn strip_qualifiers(declared_type: &str) -> String {
    let mut current = declared_type.to_string();
    loop {
        let next: String = current
            .replace("const", "")
            .replace('*', "")
            .replace('&', "")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_accepts_pure_virtual() {
        assert!(is_pure_virtual_declaration("    virtual void render(const Canvas &c, int frame) = 0;"));
        assert!(is_pure_virtual_declaration("virtual int getX() const = 0;"));
        assert!(is_pure_virtual_declaration("virtual int x()=0;"));
        assert!(is_pure_virtual_declaration("virtual int x() = 0 ;"));
        assert!(is_pure_virtual_declaration("virtual void f() = 0; // trailing comment"));
        // short lines are not special
        assert!(is_pure_virtual_declaration("virtual A f()=0;"));
    }

    #[test]
    fn test_classifier_rejects_other_lines() {
        assert!(!is_pure_virtual_declaration(""));
        assert!(!is_pure_virtual_declaration("class IWidget"));
        assert!(!is_pure_virtual_declaration("virtual ~IWidget() {}"));
        assert!(!is_pure_virtual_declaration("virtual ~IWidget() = default;"));
        assert!(!is_pure_virtual_declaration("virtual void f() = 10;"));
        assert!(!is_pure_virtual_declaration("void f() = 0;"));
        assert!(!is_pure_virtual_declaration("// virtual void f() = 0;"));
        assert!(!is_pure_virtual_declaration("virtual void f(int a,"));
        assert!(!is_pure_virtual_declaration("virtual ~IRenderer() = 0;"));
    }

    #[test]
    fn test_parse_declaration() {
        let function =
            parse_declaration("virtual void render(const Canvas &c, int frame) = 0;").unwrap();
        assert_eq!(function.return_type, "void");
        assert_eq!(function.name, "render");
        assert!(!function.is_const);
        assert_eq!(function.arguments.len(), 2);
        assert_eq!(function.arguments[0].declared_type, "const Canvas &");
        assert_eq!(function.arguments[0].name, "c");
        assert_eq!(function.arguments[0].bare_type, "Canvas");
        assert_eq!(function.arguments[1].declared_type, "int");
        assert_eq!(function.arguments[1].name, "frame");
        assert_eq!(function.arguments[1].bare_type, "int");
    }

    #[test]
    fn test_parse_zero_arguments() {
        let function = parse_declaration("virtual int getX() const = 0;").unwrap();
        assert_eq!(function.return_type, "int");
        assert_eq!(function.name, "getX");
        assert!(function.arguments.is_empty());
        assert!(function.is_const);

        let function = parse_declaration("virtual void reset(void) = 0;").unwrap();
        assert!(function.arguments.is_empty());
    }

    #[test]
    fn test_parse_multi_token_return_type() {
        let function = parse_declaration("virtual const QString & title() const = 0;").unwrap();
        assert_eq!(function.return_type, "const QString &");
        assert_eq!(function.name, "title");

        let function = parse_declaration("virtual std::string name() = 0;").unwrap();
        assert_eq!(function.return_type, "std::string");
    }

    #[test]
    fn test_parse_missing_return_type() {
        let err = parse_declaration("virtual doStuff() = 0;").unwrap_err();
        assert_eq!(err.line, "virtual doStuff() = 0;");
        assert!(err.message.contains("return type"), "{}", err.message);
    }

    #[test]
    fn test_parse_rejects_unsupported_shapes() {
        let cases = [
            "virtual void f(int a = 5) = 0;",
            "virtual void f(std::vector<int> v) = 0;",
            "virtual void f(void (*cb)(int)) = 0;",
            "virtual void f(int) = 0;",
            "virtual void f(int a,) = 0;",
            "virtual void f(int a) override = 0;",
            "virtual void f = 0;",
            "virtual void f(int a = 0;",
        ];
        for case in cases {
            assert!(parse_declaration(case).is_err(), "accepted: {}", case);
        }
    }

    #[test]
    fn test_parse_rejects_parameter_without_name() {
        let err = parse_declaration("virtual void f(const Canvas) = 0;").unwrap_err();
        assert!(err.message.contains("qualifiers only"), "{}", err.message);

        let err = parse_declaration("virtual void f(unsigned int) = 0;").unwrap_err();
        assert!(err.message.contains("type keyword 'int'"), "{}", err.message);

        assert!(parse_argument("Canvas * const").is_err());
        assert!(parse_argument("const char").is_err());
    }

    #[test]
    fn test_parse_accepts_multi_word_types() {
        let argument = parse_argument("unsigned int count").unwrap();
        assert_eq!(argument.declared_type, "unsigned int");
        assert_eq!(argument.name, "count");

        let argument = parse_argument("Canvas * const target").unwrap();
        assert_eq!(argument.declared_type, "Canvas * const");
        assert_eq!(argument.bare_type, "Canvas");
    }

    #[test]
    fn test_parse_error_names_the_line() {
        let err = parse_declaration("  virtual void f(int a = 5) = 0;").unwrap_err();
        assert_eq!(err.line, "virtual void f(int a = 5) = 0;");
        assert!(err.to_string().contains("default arguments"));
    }

    #[test]
    fn test_parse_argument() {
        let argument = parse_argument("const Canvas &c").unwrap();
        assert_eq!(argument.declared_type, "const Canvas &");
        assert_eq!(argument.name, "c");
        assert_eq!(argument.bare_type, "Canvas");

        let argument = parse_argument("  QWidget*   parent ").unwrap();
        assert_eq!(argument.declared_type, "QWidget *");
        assert_eq!(argument.bare_type, "QWidget");

        let argument = parse_argument("const std::string& path").unwrap();
        assert_eq!(argument.declared_type, "const std::string &");
        assert_eq!(argument.bare_type, "std::string");
    }

    #[test]
    fn test_parse_argument_requires_name() {
        assert!(parse_argument("int").is_err());
        assert!(parse_argument("Canvas &").is_err());
        assert!(parse_argument("").is_err());
    }

    #[test]
    fn test_strip_qualifiers() {
        assert_eq!(strip_qualifiers("const Canvas &"), "Canvas");
        assert_eq!(strip_qualifiers("const char * const *"), "char");
        assert_eq!(strip_qualifiers("unsigned int"), "unsignedint");
        assert_eq!(strip_qualifiers(""), "");
    }

    #[test]
    fn test_strip_qualifiers_is_idempotent() {
        let inputs = [
            "const Canvas &",
            "conconstst",
            "con st Foo",
            "con*st Bar&",
            "  ",
            "std::map",
            "constexpr",
        ];
        for input in inputs {
            let once = strip_qualifiers(input);
            assert_eq!(strip_qualifiers(&once), once, "input: {:?}", input);
        }
    }
}
