//! Core value model of the interpreter. The central enum, [`Atom`], is the
//! closed set of value kinds the language knows: the absent value, booleans,
//! 64-bit float numbers, symbols, and six geometric kinds. An [`Expression`]
//! is an owned tree of atoms; every evaluation result is a leaf. Equality on
//! atoms is type-tag-first and epsilon-aware for every numeric field, and
//! display follows the per-kind conventions hosts rely on when echoing
//! results. [`token_to_atom`] performs the lexical classification of one word
//! token. Ergonomic `From` conversions and the `sym`/`num`/`call` helpers
//! keep construction terse in code and tests.

use std::fmt;

use crate::SemanticError;

/// Signature shared by every builtin procedure: evaluated argument atoms in,
/// result expression out. Procedures are pure; each validates its own
/// argument count and types before computing.
pub type Procedure = fn(&[Atom]) -> Result<Expression, SemanticError>;

/// The floating-point equality relation used throughout the value model:
/// two numbers are the same value when they differ by less than machine
/// epsilon. Applies to `Number` atoms and to every numeric field of the
/// geometric kinds.
pub fn numbers_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

/// A 2-D coordinate pair.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A segment between two points.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub first: Point,
    pub second: Point,
}

/// A circular arc: center, a point on the circumference where the arc
/// starts, and the spanned angle in radians.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub center: Point,
    pub start: Point,
    pub span: f64,
}

/// An axis-aligned rectangle given by two corners. The corners are stored
/// exactly as constructed; nothing normalizes x1 <= x2 or y1 <= y2.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A filled rectangle: a [`Rect`] plus r/g/b color components, nominally
/// 0 to 255. Components are stored as given and not range-checked.
#[derive(Debug, Clone, Copy)]
pub struct FillRect {
    pub rect: Rect,
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// An ellipse inscribed in a bounding rectangle.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
    pub rect: Rect,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        numbers_equal(self.x, other.x) && numbers_equal(self.y, other.y)
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.first == other.first && self.second == other.second
    }
}

impl PartialEq for Arc {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && self.start == other.start
            && numbers_equal(self.span, other.span)
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        numbers_equal(self.x1, other.x1)
            && numbers_equal(self.y1, other.y1)
            && numbers_equal(self.x2, other.x2)
            && numbers_equal(self.y2, other.y2)
    }
}

impl PartialEq for FillRect {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect
            && numbers_equal(self.r, other.r)
            && numbers_equal(self.g, other.g)
            && numbers_equal(self.b, other.b)
    }
}

impl PartialEq for Ellipse {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect
    }
}

/// One value of the language. The set of kinds is closed; nothing outside
/// this enum can flow through the evaluator.
///
/// `None` is the default kind: the value of a fresh expression node, the
/// result of a `draw` form, and never a legal procedure argument. `Symbol`
/// only survives evaluation as an error (an unbound name); every successful
/// result is one of the other kinds.
#[derive(Debug, Clone, Default)]
pub enum Atom {
    /// The absent value
    #[default]
    None,
    Boolean(bool),
    Number(f64),
    /// A name: operator, variable, or special-form keyword
    Symbol(String),
    Point(Point),
    Line(Line),
    Arc(Arc),
    Rect(Rect),
    FillRect(FillRect),
    Ellipse(Ellipse),
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Atom::None, Atom::None) => true,
            (Atom::Boolean(a), Atom::Boolean(b)) => a == b,
            (Atom::Number(a), Atom::Number(b)) => numbers_equal(*a, *b),
            (Atom::Symbol(a), Atom::Symbol(b)) => a == b,
            (Atom::Point(a), Atom::Point(b)) => a == b,
            (Atom::Line(a), Atom::Line(b)) => a == b,
            (Atom::Arc(a), Atom::Arc(b)) => a == b,
            (Atom::Rect(a), Atom::Rect(b)) => a == b,
            (Atom::FillRect(a), Atom::FillRect(b)) => a == b,
            (Atom::Ellipse(a), Atom::Ellipse(b)) => a == b,
            _ => false, // different kinds are never equal
        }
    }
}

/// An expression node: a head atom plus ordered children. Programs parse
/// into one tree; evaluation reduces a tree to a leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub head: Atom,
    pub tail: Vec<Expression>,
}

impl Expression {
    /// True when the head is the `None` kind (e.g. the result of `draw`).
    pub fn is_none(&self) -> bool {
        matches!(self.head, Atom::None)
    }
}

impl From<Atom> for Expression {
    fn from(head: Atom) -> Self {
        Expression {
            head,
            tail: Vec::new(),
        }
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Atom::Symbol(name.to_owned())
    }
}

macro_rules! impl_atom_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Atom {
                fn from(value: $source) -> Self {
                    Atom::$variant(value)
                }
            }

            impl From<$source> for Expression {
                fn from(value: $source) -> Self {
                    Expression::from(Atom::$variant(value))
                }
            }
        )*
    };
}

// Generate From implementations for every payload-carrying kind
impl_atom_from!(
    bool => Boolean,
    f64 => Number,
    Point => Point,
    Line => Line,
    Arc => Arc,
    Rect => Rect,
    FillRect => FillRect,
    Ellipse => Ellipse,
);

/// Classify one word token into an atom.
///
/// Order matters: the literal spellings `True`/`False` win first; then any
/// numeric-looking token must parse fully as an f64 or the token is
/// rejected; everything else that is non-empty is a symbol, special
/// characters included.
pub fn token_to_atom(token: &str) -> Result<Atom, SemanticError> {
    if token == "True" {
        return Ok(Atom::Boolean(true));
    }
    if token == "False" {
        return Ok(Atom::Boolean(false));
    }
    if looks_numeric(token) {
        return token
            .parse::<f64>()
            .map(Atom::Number)
            .map_err(|_| SemanticError::new(format!("Invalid token: {token}")));
    }
    if token.is_empty() {
        return Err(SemanticError::new("Invalid token: empty"));
    }
    Ok(Atom::Symbol(token.to_owned()))
}

/// A token is numeric-looking when it starts with a digit, or with a sign
/// immediately followed by a digit. Bare `+` and `-` are symbols.
fn looks_numeric(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        None => false,
        Some(first_char) if first_char.is_ascii_digit() => true,
        Some('+' | '-') => matches!(chars.next(), Some(second_char) if second_char.is_ascii_digit()),
        Some(_) => false,
    }
}

/// Helper for creating symbol-headed leaves, used across module tests
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn sym<S: AsRef<str>>(name: S) -> Expression {
    Expression::from(Atom::Symbol(name.as_ref().to_owned()))
}

/// Helper for creating number leaves, used across module tests
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn num(value: f64) -> Expression {
    Expression::from(value)
}

/// Helper for creating a symbol-headed node with children, used across
/// module tests
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn call<S: AsRef<str>>(head: S, tail: Vec<Expression>) -> Expression {
    Expression {
        head: Atom::Symbol(head.as_ref().to_owned()),
        tail,
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::None => write!(f, "None"),
            Atom::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Atom::Number(n) => write!(f, "{n}"),
            Atom::Symbol(s) => write!(f, "{s}"),
            Atom::Point(p) => write!(f, "{p}"),
            Atom::Line(l) => write!(f, "({}),({})", l.first, l.second),
            Atom::Arc(a) => write!(f, "({}),({}) {}", a.center, a.start, a.span),
            Atom::Rect(r) => write!(f, "{r}"),
            Atom::FillRect(fr) => write!(f, "({}),{},{},{}", fr.rect, fr.r, fr.g, fr.b),
            Atom::Ellipse(e) => write!(f, "{}", e.rect),
        }
    }
}

impl fmt::Display for Expression {
    /// Results are leaves, so rendering an expression renders its head.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_classification_comprehensive() {
        // Test cases as (token, expected) tuples; None means the token is
        // rejected.
        let test_cases: Vec<(&str, Option<Atom>)> = vec![
            // Boolean literals are exact spellings
            ("True", Some(Atom::Boolean(true))),
            ("False", Some(Atom::Boolean(false))),
            ("true", Some(Atom::Symbol("true".to_owned()))),
            ("TrueX", Some(Atom::Symbol("TrueX".to_owned()))),
            // Numeric-looking tokens must fully parse
            ("42", Some(Atom::Number(42.0))),
            ("0", Some(Atom::Number(0.0))),
            ("-12.5", Some(Atom::Number(-12.5))),
            ("+3", Some(Atom::Number(3.0))),
            ("1e3", Some(Atom::Number(1000.0))),
            ("2.5e-2", Some(Atom::Number(0.025))),
            ("5.", Some(Atom::Number(5.0))),
            ("1.2.3", None),
            ("12ab", None),
            ("3..", None),
            ("1e", None),
            // Signs alone and sign-non-digit are symbols
            ("+", Some(Atom::Symbol("+".to_owned()))),
            ("-", Some(Atom::Symbol("-".to_owned()))),
            ("--5", Some(Atom::Symbol("--5".to_owned()))),
            ("+a", Some(Atom::Symbol("+a".to_owned()))),
            // A leading dot is not numeric-looking
            (".5", Some(Atom::Symbol(".5".to_owned()))),
            // Ordinary and special-character symbols
            ("abc", Some(Atom::Symbol("abc".to_owned()))),
            ("x1", Some(Atom::Symbol("x1".to_owned()))),
            ("!special_symbol", Some(Atom::Symbol("!special_symbol".to_owned()))),
            ("fill_rect", Some(Atom::Symbol("fill_rect".to_owned()))),
            ("pi", Some(Atom::Symbol("pi".to_owned()))),
            ("<=", Some(Atom::Symbol("<=".to_owned()))),
            // Empty input is rejected
            ("", None),
        ];

        for (token, expected) in test_cases {
            match (token_to_atom(token), expected) {
                (Ok(atom), Some(expected_atom)) => {
                    assert_eq!(atom, expected_atom, "token {token:?} misclassified");
                }
                (Err(_), None) => {}
                (Ok(atom), None) => panic!("token {token:?} should be rejected, got {atom:?}"),
                (Err(e), Some(expected_atom)) => {
                    panic!("token {token:?} should be {expected_atom:?}, got error: {e}");
                }
            }
        }
    }

    #[test]
    fn test_number_equality_within_epsilon() {
        assert_eq!(Atom::Number(0.1 + 0.2), Atom::Number(0.3));
        assert_eq!(Atom::Number(5.0), Atom::Number(5.0));
        assert_ne!(Atom::Number(5.0), Atom::Number(5.1));
        assert_ne!(Atom::Number(1.0), Atom::Number(1.0 + 1e-15));

        assert!(numbers_equal(0.1 + 0.2, 0.3));
        assert!(!numbers_equal(0.0, f64::EPSILON));
    }

    #[test]
    fn test_kind_mismatch_is_never_equal() {
        assert_ne!(Atom::Number(1.0), Atom::Boolean(true));
        assert_ne!(Atom::Boolean(false), Atom::None);
        assert_ne!(Atom::Symbol("5".to_owned()), Atom::Number(5.0));
        assert_ne!(
            Atom::Point(Point { x: 1.0, y: 2.0 }),
            Atom::Number(1.0)
        );
        // None is a real value and equals itself
        assert_eq!(Atom::None, Atom::None);
    }

    #[test]
    fn test_geometric_equality_uses_epsilon_per_field() {
        let p = Point { x: 0.1 + 0.2, y: 1.0 };
        let q = Point { x: 0.3, y: 1.0 };
        assert_eq!(p, q);
        assert_ne!(p, Point { x: 0.3, y: 1.5 });

        let line = Line { first: p, second: q };
        assert_eq!(line, Line { first: q, second: p });

        let arc = Arc { center: p, start: q, span: 0.1 + 0.2 };
        assert_eq!(arc, Arc { center: q, start: p, span: 0.3 });

        let rect = Rect { x1: 10.0, y1: 20.0, x2: 0.0, y2: -5.0 };
        assert_eq!(rect, Rect { x1: 10.0, y1: 20.0, x2: 0.0, y2: -5.0 });
        assert_ne!(rect, Rect { x1: 10.0, y1: 20.0, x2: 0.0, y2: -5.5 });

        let fill = FillRect { rect, r: 255.0, g: 128.0, b: 0.0 };
        assert_eq!(fill, FillRect { rect, r: 255.0, g: 128.0, b: 0.0 });
        assert_ne!(fill, FillRect { rect, r: 255.0, g: 128.0, b: 1.0 });

        assert_eq!(Ellipse { rect }, Ellipse { rect });
    }

    #[test]
    fn test_expression_equality_is_structural() {
        let flat = call("+", vec![num(1.0), num(2.0)]);
        assert_eq!(flat, call("+", vec![num(1.0), num(2.0)]));
        // same head, different tails
        assert_ne!(flat, call("+", vec![num(1.0), num(3.0)]));
        assert_ne!(flat, sym("+"));
        // leaves
        assert_eq!(num(0.1 + 0.2), num(0.3));
        assert_eq!(Expression::default(), Expression::from(Atom::None));
    }

    #[test]
    fn test_display_conventions() {
        let rect = Rect { x1: 150.0, y1: 150.0, x2: 160.0, y2: 170.0 };
        let cases: Vec<(Atom, &str)> = vec![
            (Atom::None, "None"),
            (Atom::Boolean(true), "True"),
            (Atom::Boolean(false), "False"),
            (Atom::Number(5.0), "5"),
            (Atom::Number(-12.5), "-12.5"),
            (Atom::Symbol("begin".to_owned()), "begin"),
            (Atom::Point(Point { x: 2.0, y: 4.0 }), "2,4"),
            (
                Atom::Line(Line {
                    first: Point { x: 10.0, y: 0.0 },
                    second: Point { x: 0.0, y: 10.0 },
                }),
                "(10,0),(0,10)",
            ),
            (
                Atom::Arc(Arc {
                    center: Point { x: 0.0, y: 0.0 },
                    start: Point { x: 100.0, y: 0.0 },
                    span: 1.5,
                }),
                "(0,0),(100,0) 1.5",
            ),
            (Atom::Rect(rect), "150,150,160,170"),
            (
                Atom::FillRect(FillRect { rect, r: 255.0, g: 255.0, b: 0.0 }),
                "(150,150,160,170),255,255,0",
            ),
            (Atom::Ellipse(Ellipse { rect }), "150,150,160,170"),
        ];

        for (atom, rendered) in cases {
            assert_eq!(atom.to_string(), rendered);
            // a leaf expression renders as its head
            assert_eq!(Expression::from(atom).to_string(), rendered);
        }
    }

    #[test]
    fn test_default_expression_is_none_leaf() {
        let e = Expression::default();
        assert!(e.is_none());
        assert!(e.tail.is_empty());
        assert!(!num(0.0).is_none());
    }
}
