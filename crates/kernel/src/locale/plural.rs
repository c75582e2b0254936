//! Gettext plural forms.
//!
//! Parses the `Plural-Forms` header of a catalog, e.g.
//! `nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);`
//! and evaluates the expression to pick a form index for a count.
//!
//! The expression language is the C subset gettext uses: the variable
//! `n`, unsigned integer literals, `!`, `* / %`, `+ -`, `< <= > >=`,
//! `== !=`, `&&`, `||`, `?:`, and parentheses.

use crate::error::{KernelError, KernelResult};

/// A parsed plural rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForms {
    nplurals: usize,
    expr: Expr,
}

impl Default for PluralForms {
    /// Germanic rule: one form for 1, another for everything else.
    fn default() -> Self {
        Self {
            nplurals: 2,
            expr: Expr::Binary(BinOp::Ne, Box::new(Expr::N), Box::new(Expr::Num(1))),
        }
    }
}

impl PluralForms {
    /// Parse a `Plural-Forms` header value.
    pub fn parse(header: &str) -> KernelResult<Self> {
        let mut nplurals = None;
        let mut plural = None;

        for part in header.split(';') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "nplurals" => {
                    let n: usize = value.trim().parse().map_err(|_| {
                        KernelError::PluralForms(format!("bad nplurals '{}'", value.trim()))
                    })?;
                    nplurals = Some(n);
                }
                "plural" => plural = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let nplurals = nplurals
            .filter(|n| *n > 0)
            .ok_or_else(|| KernelError::PluralForms("missing nplurals".into()))?;
        let plural = plural.ok_or_else(|| KernelError::PluralForms("missing plural".into()))?;

        Ok(Self {
            nplurals,
            expr: Parser::new(&plural)?.parse()?,
        })
    }

    /// Number of plural forms in the catalog.
    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// Form index for `n`, clamped to the last form.
    pub fn index(&self, n: u64) -> usize {
        let raw = self.expr.eval(n);
        usize::try_from(raw)
            .unwrap_or(usize::MAX)
            .min(self.nplurals - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    N,
    Num(u64),
    Not(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Cond(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, n: u64) -> u64 {
        match self {
            Expr::N => n,
            Expr::Num(v) => *v,
            Expr::Not(e) => u64::from(e.eval(n) == 0),
            Expr::Cond(c, t, f) => {
                if c.eval(n) != 0 {
                    t.eval(n)
                } else {
                    f.eval(n)
                }
            }
            Expr::Binary(op, l, r) => {
                let l = l.eval(n);
                // && and || short-circuit
                match op {
                    BinOp::And => return u64::from(l != 0 && r.eval(n) != 0),
                    BinOp::Or => return u64::from(l != 0 || r.eval(n) != 0),
                    _ => {}
                }
                let r = r.eval(n);
                match op {
                    BinOp::Mul => l.wrapping_mul(r),
                    BinOp::Div => l.checked_div(r).unwrap_or(0),
                    BinOp::Rem => l.checked_rem(r).unwrap_or(0),
                    BinOp::Add => l.wrapping_add(r),
                    BinOp::Sub => l.wrapping_sub(r),
                    BinOp::Lt => u64::from(l < r),
                    BinOp::Le => u64::from(l <= r),
                    BinOp::Gt => u64::from(l > r),
                    BinOp::Ge => u64::from(l >= r),
                    BinOp::Eq => u64::from(l == r),
                    BinOp::Ne => u64::from(l != r),
                    BinOp::And | BinOp::Or => 0,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    N,
    Num(u64),
    Op(&'static str),
    LParen,
    RParen,
    Question,
    Colon,
}

fn tokenize(src: &str) -> KernelResult<Vec<Token>> {
    const TWO_CHAR: &[&str] = &["&&", "||", "==", "!=", "<=", ">="];
    const ONE_CHAR: &[&str] = &["!", "*", "/", "%", "+", "-", "<", ">"];

    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let value = src[start..i]
                .parse()
                .map_err(|_| KernelError::PluralForms(format!("number too large in '{src}'")))?;
            tokens.push(Token::Num(value));
            continue;
        }
        let rest = &src[i..];
        if let Some(op) = TWO_CHAR.iter().find(|op| rest.starts_with(**op)) {
            tokens.push(Token::Op(*op));
            i += 2;
            continue;
        }
        let token = match c {
            b'n' => Token::N,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'?' => Token::Question,
            b':' => Token::Colon,
            _ => match ONE_CHAR.iter().find(|op| rest.starts_with(**op)) {
                Some(op) => Token::Op(*op),
                None => {
                    return Err(KernelError::PluralForms(format!(
                        "unexpected '{}' in '{src}'",
                        char::from(c)
                    )));
                }
            },
        };
        tokens.push(token);
        i += 1;
    }
    Ok(tokens)
}

/// Binary operator precedence levels, loosest first.
const LEVELS: &[&[(&str, BinOp)]] = &[
    &[("||", BinOp::Or)],
    &[("&&", BinOp::And)],
    &[("==", BinOp::Eq), ("!=", BinOp::Ne)],
    &[
        ("<", BinOp::Lt),
        ("<=", BinOp::Le),
        (">", BinOp::Gt),
        (">=", BinOp::Ge),
    ],
    &[("+", BinOp::Add), ("-", BinOp::Sub)],
    &[("*", BinOp::Mul), ("/", BinOp::Div), ("%", BinOp::Rem)],
];

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> KernelResult<Self> {
        Ok(Self {
            tokens: tokenize(src)?,
            pos: 0,
        })
    }

    fn parse(mut self) -> KernelResult<Expr> {
        let expr = self.conditional()?;
        match self.peek() {
            None => Ok(expr),
            Some(t) => Err(KernelError::PluralForms(format!("trailing token {t:?}"))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, want: Token) -> KernelResult<()> {
        match self.advance() {
            Some(t) if t == want => Ok(()),
            other => Err(KernelError::PluralForms(format!(
                "expected {want:?}, found {other:?}"
            ))),
        }
    }

    fn conditional(&mut self) -> KernelResult<Expr> {
        let cond = self.binary(0)?;
        if self.peek() != Some(&Token::Question) {
            return Ok(cond);
        }
        self.pos += 1;
        let then = self.conditional()?;
        self.expect(Token::Colon)?;
        let otherwise = self.conditional()?;
        Ok(Expr::Cond(Box::new(cond), Box::new(then), Box::new(otherwise)))
    }

    fn binary(&mut self, level: usize) -> KernelResult<Expr> {
        let Some(ops) = LEVELS.get(level) else {
            return self.unary();
        };
        let mut lhs = self.binary(level + 1)?;
        loop {
            let op = match self.peek() {
                Some(Token::Op(sym)) => ops.iter().find(|(s, _)| s == sym).map(|(_, op)| *op),
                _ => None,
            };
            let Some(op) = op else {
                return Ok(lhs);
            };
            self.pos += 1;
            let rhs = self.binary(level + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> KernelResult<Expr> {
        if self.peek() == Some(&Token::Op("!")) {
            self.pos += 1;
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> KernelResult<Expr> {
        match self.advance() {
            Some(Token::N) => Ok(Expr::N),
            Some(Token::Num(v)) => Ok(Expr::Num(v)),
            Some(Token::LParen) => {
                let inner = self.conditional()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            other => Err(KernelError::PluralForms(format!(
                "unexpected {other:?}"
            ))),
        }
    }
}
