use crate::SemanticError;
use crate::ast::{Atom, Expression};
use crate::builtins;
use crate::environment::Environment;
use crate::parser::parse_program;

/// Forms the evaluator resolves itself, never through the environment.
const RESERVED_WORDS: &[&str] = &["if", "begin", "define"];

/// Handler for symbols that are neither special forms nor bound names.
///
/// The handler receives the symbol text and the **unevaluated** tail
/// children; it may evaluate them through [`EvalContext::eval`] and append
/// results to the pending drawables. The default handler is [`eval_misc`].
pub type MiscHandler =
    fn(&str, &[Expression], &mut EvalContext<'_>) -> Result<Expression, SemanticError>;

/// Mutable evaluation state threaded through the recursive walk: the
/// environment, the pending drawables, and the installed misc handler.
pub struct EvalContext<'a> {
    pub env: &'a mut Environment,
    pub drawables: &'a mut Vec<Expression>,
    misc: MiscHandler,
}

impl EvalContext<'_> {
    /// Evaluate a subexpression under this context. Custom handlers use
    /// this to evaluate the tail children they receive.
    pub fn eval(&mut self, expr: &Expression) -> Result<Expression, SemanticError> {
        eval_expression(expr, self)
    }
}

/// The boundary facade: parse a program, evaluate it, collect what `draw`
/// produced. One interpreter owns one [`Environment`], seeded with the
/// default world, which persists across top-level `parse`/`eval` calls.
pub struct Interpreter {
    env: Environment,
    ast: Option<Expression>,
    drawables: Vec<Expression>,
    misc: MiscHandler,
}

impl Interpreter {
    /// An interpreter over the default world with the default `draw` hook.
    pub fn new() -> Self {
        Self::with_handler(eval_misc)
    }

    /// An interpreter whose misc hook is `misc` instead of [`eval_misc`].
    pub fn with_handler(misc: MiscHandler) -> Self {
        let mut env = Environment::new();
        builtins::install(&mut env);
        Interpreter {
            env,
            ast: None,
            drawables: Vec::new(),
            misc,
        }
    }

    /// Replace the misc hook on a live interpreter.
    pub fn set_handler(&mut self, misc: MiscHandler) {
        self.misc = misc;
    }

    /// Parse a program, retaining the tree for [`Interpreter::eval`] only
    /// on success. A failed parse drops any previously retained tree.
    /// Failure details are available through
    /// [`parse_program`](crate::parser::parse_program).
    pub fn parse(&mut self, input: &str) -> bool {
        self.ast = parse_program(input).ok();
        self.ast.is_some()
    }

    /// Evaluate the most recently parsed program.
    pub fn eval(&mut self) -> Result<Expression, SemanticError> {
        let ast = self
            .ast
            .as_ref()
            .ok_or_else(|| SemanticError::new("Empty AST"))?;
        let mut scope = EvalContext {
            env: &mut self.env,
            drawables: &mut self.drawables,
            misc: self.misc,
        };
        eval_expression(ast, &mut scope)
    }

    /// Drawables accumulated by `draw` since the last drain. The engine
    /// never clears this on its own; drawables appended before a program
    /// failed are still here.
    pub fn drawables(&self) -> &[Expression] {
        &self.drawables
    }

    /// Drain the pending drawables, leaving the collection empty.
    pub fn take_drawables(&mut self) -> Vec<Expression> {
        std::mem::take(&mut self.drawables)
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate one node. Dispatch order: self-evaluating atoms, the three
/// special forms, variable lookup, procedure application, then the misc
/// hook for anything still unrecognized.
fn eval_expression(
    expr: &Expression,
    scope: &mut EvalContext<'_>,
) -> Result<Expression, SemanticError> {
    match &expr.head {
        Atom::Number(_) | Atom::Boolean(_) => Ok(Expression::from(expr.head.clone())),
        Atom::Symbol(name) => match name.as_str() {
            "begin" => eval_begin(&expr.tail, scope),
            "define" => eval_define(&expr.tail, scope),
            "if" => eval_if(&expr.tail, scope),
            // a bound variable wins over everything else; its tail is ignored
            _ if scope.env.is_symbol_defined(name) => Ok(scope.env.get(name)?.clone()),
            _ if scope.env.is_procedure_defined(name) => apply_procedure(name, &expr.tail, scope),
            _ => {
                let misc = scope.misc;
                misc(name, &expr.tail, scope)
            }
        },
        _ => Err(SemanticError::new("Invalid expression")),
    }
}

/// Evaluate every child in order; the last result is the form's result.
fn eval_begin(
    tail: &[Expression],
    scope: &mut EvalContext<'_>,
) -> Result<Expression, SemanticError> {
    if tail.is_empty() {
        return Err(SemanticError::new("begin requires at least one expression"));
    }
    let mut result = Expression::default();
    for child in tail {
        result = eval_expression(child, scope)?;
    }
    Ok(result)
}

/// Bind a fresh name. The value expression is evaluated before the name
/// checks run, so its side effects persist even when the define fails.
/// Returns the bound value.
fn eval_define(
    tail: &[Expression],
    scope: &mut EvalContext<'_>,
) -> Result<Expression, SemanticError> {
    let (name, value_expr) = match tail {
        [Expression { head: Atom::Symbol(name), tail: inner }, value_expr] if inner.is_empty() => {
            (name.as_str(), value_expr)
        }
        _ => {
            return Err(SemanticError::new(
                "define requires a symbol and an expression",
            ));
        }
    };

    let value = eval_expression(value_expr, scope)?;

    if RESERVED_WORDS.contains(&name) {
        return Err(SemanticError::new(format!(
            "cannot define reserved name {name}"
        )));
    }
    if scope.env.is_symbol_defined(name) || scope.env.is_procedure_defined(name) {
        return Err(SemanticError::new(format!("{name} already defined")));
    }

    scope.env.add(name, value.clone());
    Ok(value)
}

/// Conditional; only the selected branch is evaluated.
fn eval_if(tail: &[Expression], scope: &mut EvalContext<'_>) -> Result<Expression, SemanticError> {
    match tail {
        [condition_expr, then_expr, else_expr] => {
            let condition = eval_expression(condition_expr, scope)?;
            match condition.head {
                Atom::Boolean(true) => eval_expression(then_expr, scope),
                Atom::Boolean(false) => eval_expression(else_expr, scope),
                _ => Err(SemanticError::new("if condition must be a boolean")),
            }
        }
        _ => Err(SemanticError::new("if requires three expressions")),
    }
}

/// Evaluate the tail children left to right and apply the named procedure
/// to the resulting atoms. A child evaluating to `None` is rejected before
/// the procedure is called.
fn apply_procedure(
    name: &str,
    tail: &[Expression],
    scope: &mut EvalContext<'_>,
) -> Result<Expression, SemanticError> {
    let procedure = scope.env.get_procedure(name)?;

    let mut args = Vec::with_capacity(tail.len());
    for child in tail {
        let evaluated = eval_expression(child, scope)?;
        if evaluated.is_none() {
            return Err(SemanticError::new(format!(
                "Invalid argument for procedure: {name}"
            )));
        }
        args.push(evaluated.head);
    }

    procedure(&args)
}

/// The default miscellaneous hook. It recognizes exactly one form, `draw`:
/// every tail child is evaluated and its result appended to the pending
/// drawables, and the form itself produces a `None` leaf. Any other symbol
/// is unknown. A custom handler may call this to fall back to the default
/// behavior for the forms it does not handle itself.
pub fn eval_misc(
    op: &str,
    tail: &[Expression],
    scope: &mut EvalContext<'_>,
) -> Result<Expression, SemanticError> {
    if op != "draw" {
        return Err(SemanticError::new(format!("Unknown symbol: {op}")));
    }
    if tail.is_empty() {
        return Err(SemanticError::expects("draw", "at least one expression"));
    }
    for child in tail {
        let drawable = eval_expression(child, scope)?;
        scope.drawables.push(drawable);
    }
    Ok(Expression::default())
}
