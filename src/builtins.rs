//! The default procedure table: arithmetic, boolean logic, comparisons,
//! trigonometry, and the geometric constructors. Every entry is a pure
//! function over already-evaluated argument atoms that validates its own
//! argument count and types before computing; violations produce one
//! uniform error naming the procedure and what it expects. [`install`]
//! seeds an environment with the whole table plus the `pi` constant.

use crate::SemanticError;
use crate::ast::{Arc, Atom, Ellipse, Expression, FillRect, Line, Point, Procedure, Rect};
use crate::environment::Environment;

/// Name to procedure mapping for the default world.
pub(crate) static BUILTINS: &[(&str, Procedure)] = &[
    ("not", proc_not),
    ("and", proc_and),
    ("or", proc_or),
    ("+", proc_add),
    ("-", proc_subtract),
    ("*", proc_multiply),
    ("/", proc_divide),
    ("log10", proc_log10),
    ("pow", proc_pow),
    ("<", proc_less_than),
    ("<=", proc_less_than_or_equal),
    (">", proc_greater_than),
    (">=", proc_greater_than_or_equal),
    ("=", proc_equal),
    ("point", proc_point),
    ("line", proc_line),
    ("arc", proc_arc),
    ("rect", proc_rect),
    ("fill_rect", proc_fill_rect),
    ("ellipse", proc_ellipse),
    ("sin", proc_sin),
    ("cos", proc_cos),
    ("arctan", proc_arctan),
];

/// Seed an environment with every builtin procedure and the one default
/// variable, `pi`. A fresh `Interpreter` starts this way; hosts call it
/// again after `Environment::reset` to restore the default world.
pub fn install(env: &mut Environment) {
    for (name, procedure) in BUILTINS {
        env.add_procedure(name, *procedure);
    }
    env.add("pi", Expression::from(std::f64::consts::PI));
}

/// Look up a table entry by name.
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn find(name: &str) -> Option<Procedure> {
    BUILTINS
        .iter()
        .find(|(op, _)| *op == name)
        .map(|(_, procedure)| *procedure)
}

/// Boolean negation
fn proc_not(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Boolean(b)] => Ok(Expression::from(!b)),
        _ => Err(SemanticError::expects("not", "one boolean argument")),
    }
}

// Folding boolean connectives. Both return as soon as the stopping value
// appears, so arguments after that point are never type-checked.
macro_rules! boolean_fold {
    ($func_name:ident, $name:literal, $stop:literal) => {
        fn $func_name(args: &[Atom]) -> Result<Expression, SemanticError> {
            if args.is_empty() {
                return Err(SemanticError::expects(
                    $name,
                    "at least one boolean argument",
                ));
            }
            for arg in args {
                match arg {
                    Atom::Boolean(b) if *b == $stop => return Ok(Expression::from($stop)),
                    Atom::Boolean(_) => {}
                    _ => return Err(SemanticError::expects($name, "boolean arguments")),
                }
            }
            Ok(Expression::from(!$stop))
        }
    };
}

boolean_fold!(proc_and, "and", false);
boolean_fold!(proc_or, "or", true);

/// Variadic sum
fn proc_add(args: &[Atom]) -> Result<Expression, SemanticError> {
    if args.is_empty() {
        return Err(SemanticError::expects("+", "at least one numeric argument"));
    }
    let mut sum = 0.0;
    for arg in args {
        match arg {
            Atom::Number(n) => sum += n,
            _ => return Err(SemanticError::expects("+", "numeric arguments")),
        }
    }
    Ok(Expression::from(sum))
}

/// Unary negation or binary subtraction
fn proc_subtract(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(n)] => Ok(Expression::from(-n)),
        [Atom::Number(a), Atom::Number(b)] => Ok(Expression::from(a - b)),
        [_] | [_, _] => Err(SemanticError::expects("-", "numeric arguments")),
        _ => Err(SemanticError::expects("-", "one or two numeric arguments")),
    }
}

/// Variadic product
fn proc_multiply(args: &[Atom]) -> Result<Expression, SemanticError> {
    if args.is_empty() {
        return Err(SemanticError::expects("*", "at least one numeric argument"));
    }
    let mut product = 1.0;
    for arg in args {
        match arg {
            Atom::Number(n) => product *= n,
            _ => return Err(SemanticError::expects("*", "numeric arguments")),
        }
    }
    Ok(Expression::from(product))
}

/// Binary division; a divisor of exactly 0.0 fails
fn proc_divide(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(_), Atom::Number(divisor)] if *divisor == 0.0 => {
            Err(SemanticError::new("Division by zero"))
        }
        [Atom::Number(dividend), Atom::Number(divisor)] => Ok(Expression::from(dividend / divisor)),
        _ => Err(SemanticError::expects("/", "two numeric arguments")),
    }
}

fn proc_log10(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(n)] => Ok(Expression::from(n.log10())),
        _ => Err(SemanticError::expects("log10", "one numeric argument")),
    }
}

fn proc_pow(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(base), Atom::Number(exponent)] => {
            Ok(Expression::from(base.powf(*exponent)))
        }
        _ => Err(SemanticError::expects("pow", "two numeric arguments")),
    }
}

// Binary numeric comparisons, exact on floats (the epsilon relation belongs
// to value equality, not to these procedures).
macro_rules! numeric_comparison {
    ($func_name:ident, $name:literal, $op:tt) => {
        fn $func_name(args: &[Atom]) -> Result<Expression, SemanticError> {
            match args {
                [Atom::Number(a), Atom::Number(b)] => Ok(Expression::from(a $op b)),
                _ => Err(SemanticError::expects($name, "two numeric arguments")),
            }
        }
    };
}

numeric_comparison!(proc_less_than, "<", <);
numeric_comparison!(proc_less_than_or_equal, "<=", <=);
numeric_comparison!(proc_greater_than, ">", >);
numeric_comparison!(proc_greater_than_or_equal, ">=", >=);
numeric_comparison!(proc_equal, "=", ==);

fn proc_point(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(x), Atom::Number(y)] => Ok(Expression::from(Point { x: *x, y: *y })),
        _ => Err(SemanticError::expects("point", "two numeric arguments")),
    }
}

fn proc_line(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Point(first), Atom::Point(second)] => Ok(Expression::from(Line {
            first: *first,
            second: *second,
        })),
        _ => Err(SemanticError::expects("line", "two point arguments")),
    }
}

fn proc_arc(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Point(center), Atom::Point(start), Atom::Number(span)] => {
            Ok(Expression::from(Arc {
                center: *center,
                start: *start,
                span: *span,
            }))
        }
        _ => Err(SemanticError::expects(
            "arc",
            "two point arguments and a numeric argument",
        )),
    }
}

fn proc_rect(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        // corners are stored as given, never normalized
        [Atom::Number(x1), Atom::Number(y1), Atom::Number(x2), Atom::Number(y2)] => {
            Ok(Expression::from(Rect {
                x1: *x1,
                y1: *y1,
                x2: *x2,
                y2: *y2,
            }))
        }
        _ => Err(SemanticError::expects("rect", "four numeric arguments")),
    }
}

fn proc_fill_rect(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Rect(rect), Atom::Number(r), Atom::Number(g), Atom::Number(b)] => {
            Ok(Expression::from(FillRect {
                rect: *rect,
                r: *r,
                g: *g,
                b: *b,
            }))
        }
        _ => Err(SemanticError::expects(
            "fill_rect",
            "a rect argument and three numeric arguments",
        )),
    }
}

fn proc_ellipse(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Rect(rect)] => Ok(Expression::from(Ellipse { rect: *rect })),
        _ => Err(SemanticError::expects("ellipse", "one rect argument")),
    }
}

fn proc_sin(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(n)] => Ok(Expression::from(n.sin())),
        _ => Err(SemanticError::expects("sin", "one numeric argument")),
    }
}

fn proc_cos(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(n)] => Ok(Expression::from(n.cos())),
        _ => Err(SemanticError::expects("cos", "one numeric argument")),
    }
}

/// Two-argument arctangent; the arguments are (y, x)
fn proc_arctan(args: &[Atom]) -> Result<Expression, SemanticError> {
    match args {
        [Atom::Number(y), Atom::Number(x)] => Ok(Expression::from(y.atan2(*x))),
        _ => Err(SemanticError::expects("arctan", "two numeric arguments")),
    }
}
