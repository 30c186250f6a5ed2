//! Expression parser
//!
//! A tokenizer followed by recursive descent. Precedence, loosest first:
//!
//! 1. `+ -`
//! 2. `* /`
//! 3. implicit multiplication (`3 GeV`, `2 sin(x)`, `(a)(b)`)
//! 4. `number / number symbol`, read as `(number / number) symbol`
//! 5. `%` and `mod` (a trailing `%` divides by 100)
//! 6. unary `-` and `+`
//! 7. `^`, right associative; its exponent may carry a unary sign
//! 8. postfix `!`
//!
//! Whitespace is insignificant, so `GeV (2)` is a call to `GeV`.

use crate::ast::{BinOp, Expr, UnaryOp};
use natu_core::NatuError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Symbol(String),
    Str(String),
    Delim(char),
    Mod,
    End,
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    offset: usize,
}

/// Longest accepted expression, in tokens
pub const MAX_TOKENS: usize = 512;

/// Deepest accepted nesting of parentheses, calls, signs and exponents
pub const MAX_NESTING: usize = 100;

/// Parse an expression
pub fn parse_expr(input: &str) -> Result<Expr, NatuError> {
    let tokens = tokenize(input)?;
    // The trailing End token does not count
    if tokens.len() > MAX_TOKENS + 1 {
        return Err(NatuError::parse_error(format!("Expression too long (more than {} tokens)", MAX_TOKENS))
            .with_formula(input));
    }
    let mut parser = Parser { input, tokens, pos: 0, depth: 0 };

    if parser.peek() == &Token::End {
        return Err(NatuError::parse_error("Empty expression").with_formula(input));
    }

    let expr = parser.parse_additive()?;
    if parser.peek() != &Token::End {
        return Err(parser.unexpected());
    }
    Ok(expr)
}

fn is_symbol_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn syntax_error(input: &str, offset: usize, message: impl Into<String>) -> NatuError {
    NatuError::parse_error(message).with_formula(input).at_offset(offset)
}

fn tokenize(input: &str) -> Result<Vec<Spanned>, NatuError> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(input.len(), |&(o, _)| o);
    let is_digit_at = |i: usize| chars.get(i).map_or(false, |&(_, c)| c.is_ascii_digit());

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (offset, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Number: digits, optional fraction, optional exponent
        if c.is_ascii_digit() || (c == '.' && is_digit_at(i + 1)) {
            while is_digit_at(i) {
                i += 1;
            }
            if chars.get(i).map_or(false, |&(_, c)| c == '.') {
                i += 1;
                while is_digit_at(i) {
                    i += 1;
                }
            }
            if chars.get(i).map_or(false, |&(_, c)| c == 'e' || c == 'E') {
                let signed = chars.get(i + 1).map_or(false, |&(_, c)| c == '+' || c == '-');
                if signed || is_digit_at(i + 1) {
                    i += if signed { 2 } else { 1 };
                    if !is_digit_at(i) {
                        let got = chars.get(i).map_or("end of input".to_string(), |&(_, c)| format!("'{}'", c));
                        return Err(syntax_error(input, byte_at(i), format!("Digit expected, got {}", got)));
                    }
                    while is_digit_at(i) {
                        i += 1;
                    }
                }
            }
            tokens.push(Spanned { token: Token::Number(input[offset..byte_at(i)].to_string()), offset });
            continue;
        }

        if is_symbol_start(c) {
            while chars.get(i).map_or(false, |&(_, c)| is_symbol_char(c)) {
                i += 1;
            }
            let name = &input[offset..byte_at(i)];
            let token = if name == "mod" { Token::Mod } else { Token::Symbol(name.to_string()) };
            tokens.push(Spanned { token, offset });
            continue;
        }

        match c {
            '"' | '\'' => {
                let mut text = String::new();
                let mut closed = false;
                i += 1;
                while i < chars.len() {
                    let ch = chars[i].1;
                    if ch == '\\' {
                        if let Some(&(_, escaped)) = chars.get(i + 1) {
                            text.push(match escaped {
                                'n' => '\n',
                                't' => '\t',
                                other => other,
                            });
                            i += 2;
                            continue;
                        }
                    }
                    i += 1;
                    if ch == c {
                        closed = true;
                        break;
                    }
                    text.push(ch);
                }
                if !closed {
                    return Err(syntax_error(input, offset, "End of string expected"));
                }
                tokens.push(Spanned { token: Token::Str(text), offset });
            }
            '+' | '-' | '*' | '/' | '^' | '%' | '!' | '(' | ')' | '[' | ']' | ',' | ';' => {
                tokens.push(Spanned { token: Token::Delim(c), offset });
                i += 1;
            }
            _ => return Err(syntax_error(input, offset, format!("Unexpected character '{}'", c))),
        }
    }

    tokens.push(Spanned { token: Token::End, offset: input.len() });
    Ok(tokens)
}

/// An operand after which a bare number may not implicitly multiply
/// (`2 3` is an error, `x 2` and `3! 2` are products)
fn blocks_implicit_number(last: &Expr) -> bool {
    match last {
        Expr::Number(_) => true,
        Expr::Unary(UnaryOp::Factorial, _) => false,
        Expr::Binary(..) | Expr::Unary(..) => true,
        _ => false,
    }
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + ahead).min(last)].token
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].offset
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == &Token::Delim(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), NatuError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(syntax_error(self.input, self.offset(), format!("'{}' expected", c)))
        }
    }

    fn unexpected(&self) -> NatuError {
        let message = match self.peek() {
            Token::Number(text) => format!("Unexpected number {}", text),
            Token::Symbol(name) => format!("Unexpected symbol {}", name),
            Token::Str(text) => format!("Unexpected string \"{}\"", text),
            Token::Delim(c) => format!("Unexpected operator {}", c),
            Token::Mod => "Unexpected operator mod".to_string(),
            Token::End => "Unexpected end of expression".to_string(),
        };
        syntax_error(self.input, self.offset(), message)
    }

    fn parse_additive(&mut self) -> Result<Expr, NatuError> {
        let mut node = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Delim('+') => BinOp::Add,
                Token::Delim('-') => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            node = Expr::binary(node, op, rhs);
        }
        Ok(node)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, NatuError> {
        let mut node = self.parse_implicit()?;
        loop {
            let op = match self.peek() {
                Token::Delim('*') => BinOp::Mul,
                Token::Delim('/') => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_implicit()?;
            node = Expr::binary(node, op, rhs);
        }
        Ok(node)
    }

    fn parse_implicit(&mut self) -> Result<Expr, NatuError> {
        let mut node = self.parse_rule2()?;
        let mut number_blocked = blocks_implicit_number(&node);
        loop {
            let implicit = match self.peek() {
                Token::Symbol(_) | Token::Delim('(') => true,
                Token::Number(_) => !number_blocked,
                _ => false,
            };
            if !implicit {
                break;
            }
            let last = self.parse_rule2()?;
            number_blocked = blocks_implicit_number(&last);
            node = Expr::binary(node, BinOp::Mul, last);
        }
        Ok(node)
    }

    /// `1/2 GeV` is `(1/2) GeV`, not `1/(2 GeV)`
    fn parse_rule2(&mut self) -> Result<Expr, NatuError> {
        let mut node = self.parse_percentage()?;
        let mut last_is_constant = matches!(node, Expr::Number(_));
        while last_is_constant
            && self.peek() == &Token::Delim('/')
            && matches!(self.peek_at(1), Token::Number(_))
            && matches!(self.peek_at(2), Token::Symbol(_) | Token::Delim('('))
        {
            self.advance();
            let last = self.parse_percentage()?;
            last_is_constant = matches!(last, Expr::Number(_));
            node = Expr::binary(node, BinOp::Div, last);
        }
        Ok(node)
    }

    fn parse_percentage(&mut self) -> Result<Expr, NatuError> {
        let mut node = self.parse_unary()?;
        loop {
            match self.peek() {
                Token::Delim('%') => {
                    self.advance();
                    let trailing = match self.peek() {
                        Token::Delim(c) => *c != '(',
                        Token::End | Token::Mod => true,
                        _ => false,
                    };
                    if trailing {
                        node = Expr::binary(node, BinOp::Div, Expr::Number("100".to_string()));
                    } else {
                        let rhs = self.parse_unary()?;
                        node = Expr::binary(node, BinOp::Mod, rhs);
                    }
                }
                Token::Mod => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    node = Expr::binary(node, BinOp::Mod, rhs);
                }
                _ => break,
            }
        }
        Ok(node)
    }

    /// Every nested operand passes through here, so this is where depth is bounded
    fn parse_unary(&mut self) -> Result<Expr, NatuError> {
        if self.depth >= MAX_NESTING {
            return Err(syntax_error(self.input, self.offset(), "Expression nested too deeply"));
        }
        self.depth += 1;
        let result = self.parse_signed();
        self.depth -= 1;
        result
    }

    fn parse_signed(&mut self) -> Result<Expr, NatuError> {
        let op = match self.peek() {
            Token::Delim('-') => UnaryOp::Neg,
            Token::Delim('+') => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        self.advance();
        Ok(Expr::unary(op, self.parse_unary()?))
    }

    fn parse_power(&mut self) -> Result<Expr, NatuError> {
        let node = self.parse_postfix()?;
        if self.eat('^') {
            let exponent = self.parse_unary()?;
            return Ok(Expr::binary(node, BinOp::Pow, exponent));
        }
        Ok(node)
    }

    fn parse_postfix(&mut self) -> Result<Expr, NatuError> {
        let mut node = self.parse_primary()?;
        while self.eat('!') {
            node = Expr::unary(UnaryOp::Factorial, node);
        }
        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Expr, NatuError> {
        let offset = self.offset();
        match self.advance() {
            Token::Number(text) => Ok(Expr::Number(text)),
            Token::Symbol(name) => {
                if self.eat('(') {
                    let args = self.parse_args()?;
                    Ok(Expr::Call(name, args))
                } else {
                    Ok(Expr::Symbol(name))
                }
            }
            Token::Str(text) => Ok(Expr::StringLiteral(text)),
            Token::Delim('(') => {
                let inner = self.parse_additive()?;
                self.expect(')')?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            Token::Delim('[') => self.parse_list(),
            Token::Delim(c) => Err(syntax_error(self.input, offset, format!("Value expected, got '{}'", c))),
            Token::Mod => Err(syntax_error(self.input, offset, "Value expected, got 'mod'")),
            Token::End => Err(syntax_error(self.input, offset, "Unexpected end of expression")),
        }
    }

    /// Arguments after the opening parenthesis
    fn parse_args(&mut self) -> Result<Vec<Expr>, NatuError> {
        let mut args = Vec::new();
        if self.eat(')') {
            return Ok(args);
        }
        loop {
            args.push(self.parse_additive()?);
            if !self.eat(',') {
                self.expect(')')?;
                return Ok(args);
            }
        }
    }

    /// List after the opening bracket; `;` separates rows
    fn parse_list(&mut self) -> Result<Expr, NatuError> {
        if self.eat(']') {
            return Ok(Expr::List(Vec::new()));
        }
        let mut rows: Vec<Vec<Expr>> = vec![Vec::new()];
        loop {
            let item = self.parse_additive()?;
            if let Some(row) = rows.last_mut() {
                row.push(item);
            }
            if self.eat(',') {
                continue;
            }
            if self.eat(';') {
                rows.push(Vec::new());
                continue;
            }
            self.expect(']')?;
            break;
        }
        if rows.len() == 1 {
            return Ok(Expr::List(rows.remove(0)));
        }
        Ok(Expr::List(rows.into_iter().map(Expr::List).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natu_core::codes;

    fn num(text: &str) -> Expr {
        Expr::Number(text.to_string())
    }

    fn sym(name: &str) -> Expr {
        Expr::Symbol(name.to_string())
    }

    fn bin(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::binary(lhs, op, rhs)
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(parse_expr("3 GeV").unwrap(), bin(num("3"), BinOp::Mul, sym("GeV")));
        assert_eq!(
            parse_expr("4 GeV^2").unwrap(),
            bin(num("4"), BinOp::Mul, bin(sym("GeV"), BinOp::Pow, num("2")))
        );
    }

    #[test]
    fn test_implicit_binds_tighter_than_division() {
        let expected = bin(
            bin(num("6"), BinOp::Mul, sym("GeV")),
            BinOp::Div,
            bin(num("2"), BinOp::Mul, sym("GeV")),
        );
        assert_eq!(parse_expr("6 GeV / 2 GeV").unwrap(), expected);
    }

    #[test]
    fn test_number_over_number_symbol() {
        let expected = bin(bin(num("1"), BinOp::Div, num("2")), BinOp::Mul, sym("GeV"));
        assert_eq!(parse_expr("1/2 GeV").unwrap(), expected);
        assert_eq!(parse_expr("1 / 2 GeV").unwrap(), expected);
    }

    #[test]
    fn test_power_right_associative() {
        let expected = bin(num("2"), BinOp::Pow, bin(num("3"), BinOp::Pow, num("2")));
        assert_eq!(parse_expr("2^3^2").unwrap(), expected);
    }

    #[test]
    fn test_unary_minus_looser_than_power() {
        let expected = Expr::unary(UnaryOp::Neg, bin(num("2"), BinOp::Pow, num("2")));
        assert_eq!(parse_expr("-2^2").unwrap(), expected);

        let expected = bin(num("2"), BinOp::Pow, Expr::unary(UnaryOp::Neg, num("3")));
        assert_eq!(parse_expr("2^-3").unwrap(), expected);
    }

    #[test]
    fn test_additive_left_associative() {
        let expected = bin(bin(num("1"), BinOp::Sub, num("2")), BinOp::Add, num("3"));
        assert_eq!(parse_expr("1 - 2 + 3").unwrap(), expected);
    }

    #[test]
    fn test_parenthesis_node() {
        let inner = bin(num("2"), BinOp::Mul, sym("GeV"));
        let expected = bin(Expr::Paren(Box::new(inner)), BinOp::Pow, num("2"));
        assert_eq!(parse_expr("(2 GeV)^2").unwrap(), expected);
    }

    #[test]
    fn test_function_call() {
        let expected = Expr::Call(
            "sqrt".to_string(),
            vec![bin(num("4"), BinOp::Mul, bin(sym("GeV"), BinOp::Pow, num("2")))],
        );
        assert_eq!(parse_expr("sqrt(4 GeV^2)").unwrap(), expected);
        assert_eq!(parse_expr("f()").unwrap(), Expr::Call("f".to_string(), vec![]));
        assert_eq!(
            parse_expr("log(8, 2)").unwrap(),
            Expr::Call("log".to_string(), vec![num("8"), num("2")])
        );
    }

    #[test]
    fn test_symbol_before_paren_is_call() {
        assert_eq!(parse_expr("GeV (2)").unwrap(), Expr::Call("GeV".to_string(), vec![num("2")]));
        let expected = bin(Expr::Paren(Box::new(num("1"))), BinOp::Mul, Expr::Paren(Box::new(num("2"))));
        assert_eq!(parse_expr("(1)(2)").unwrap(), expected);
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(parse_expr("1e-3").unwrap(), num("1e-3"));
        assert_eq!(parse_expr(".5").unwrap(), num(".5"));
        assert_eq!(parse_expr("2.").unwrap(), num("2."));
        assert_eq!(parse_expr("2eV").unwrap(), bin(num("2"), BinOp::Mul, sym("eV")));
        assert_eq!(parse_expr("2e").unwrap(), bin(num("2"), BinOp::Mul, sym("e")));
    }

    #[test]
    fn test_exponent_needs_digits() {
        let err = parse_expr("2e+").unwrap_err();
        assert!(err.is(codes::PARSE_ERROR));
        assert!(err.message.contains("Digit expected"));
    }

    #[test]
    fn test_adjacent_numbers_rejected() {
        let err = parse_expr("2 3").unwrap_err();
        assert!(err.message.contains("Unexpected number 3"));
        assert_eq!(err.context.unwrap().offset, Some(2));
    }

    #[test]
    fn test_symbol_then_number() {
        assert_eq!(parse_expr("x 2").unwrap(), bin(sym("x"), BinOp::Mul, num("2")));
        let fact = Expr::unary(UnaryOp::Factorial, num("3"));
        assert_eq!(parse_expr("3! 2").unwrap(), bin(fact, BinOp::Mul, num("2")));
    }

    #[test]
    fn test_mod_and_percentage() {
        assert_eq!(parse_expr("10 mod 3").unwrap(), bin(num("10"), BinOp::Mod, num("3")));
        assert_eq!(parse_expr("7 % 2").unwrap(), bin(num("7"), BinOp::Mod, num("2")));
        assert_eq!(parse_expr("50%").unwrap(), bin(num("50"), BinOp::Div, num("100")));
    }

    #[test]
    fn test_strings_and_lists() {
        assert_eq!(parse_expr("'abc'").unwrap(), Expr::StringLiteral("abc".to_string()));
        assert_eq!(parse_expr("\"a\\\"b\"").unwrap(), Expr::StringLiteral("a\"b".to_string()));
        assert_eq!(parse_expr("[1, 2]").unwrap(), Expr::List(vec![num("1"), num("2")]));
        assert_eq!(
            parse_expr("[1, 2; 3, 4]").unwrap(),
            Expr::List(vec![
                Expr::List(vec![num("1"), num("2")]),
                Expr::List(vec![num("3"), num("4")]),
            ])
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(parse_expr("").unwrap_err().message.contains("Empty expression"));
        assert!(parse_expr("   ").is_err());

        let err = parse_expr("1 +").unwrap_err();
        assert!(err.message.contains("Unexpected end of expression"));
        assert_eq!(err.context.as_ref().unwrap().formula.as_deref(), Some("1 +"));

        assert!(parse_expr("(1").unwrap_err().message.contains("')' expected"));
        assert!(parse_expr("1 = 2").unwrap_err().message.contains("Unexpected character '='"));
        assert!(parse_expr("'open").unwrap_err().message.contains("End of string expected"));
        assert!(parse_expr("*2").unwrap_err().message.contains("Value expected"));
    }

    fn nested(depth: usize) -> String {
        format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_limit() {
        assert!(parse_expr(&nested(MAX_NESTING - 1)).is_ok());

        let err = parse_expr(&nested(MAX_NESTING + 1)).unwrap_err();
        assert!(err.is(codes::PARSE_ERROR));
        assert!(err.message.contains("Expression nested too deeply"));

        let signs = format!("{}1", "-".repeat(MAX_NESTING + 1));
        assert!(parse_expr(&signs).unwrap_err().message.contains("nested too deeply"));

        let calls = format!("{}1{}", "sin(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert!(parse_expr(&calls).unwrap_err().message.contains("nested too deeply"));
    }

    #[test]
    fn test_huge_input_is_rejected() {
        let err = parse_expr(&nested(100_000)).unwrap_err();
        assert!(err.is(codes::PARSE_ERROR));
        assert!(err.message.contains("Expression too long"));

        let signs = format!("{}1", "-".repeat(200_000));
        assert!(parse_expr(&signs).is_err());

        let sum = vec!["1"; 10_000].join(" + ");
        assert!(parse_expr(&sum).unwrap_err().message.contains("Expression too long"));
    }

    #[test]
    fn test_node_kinds() {
        assert_eq!(parse_expr("GeV").unwrap().kind(), "SymbolNode");
        assert_eq!(parse_expr("(GeV)").unwrap().kind(), "ParenthesisNode");
        assert_eq!(parse_expr("GeV*s").unwrap().kind(), "OperatorNode");
        assert_eq!(parse_expr("[1]").unwrap().kind(), "ArrayNode");
    }
}
