use std::fmt;

use operator::Operator;

use crate::utils::format_number;

/// A formula tree as produced by [`parse_formula`](crate::equation::parse_formula).
///
/// Only `Times`, `Divide`, `Power`, names, and numbers have unit meaning.
/// The remaining shapes are kept so that a formula like `meter + second` can
/// be parsed and then rejected with its original text.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitExpr {
    Name(String),
    /// A numeral, optionally annotated with a unit (`5 mole`).
    Number {
        value: f64,
        units: Option<String>,
    },
    Times(Vec<UnitExpr>),
    Divide(Vec<UnitExpr>),
    Power(Vec<UnitExpr>),
    Plus(Vec<UnitExpr>),
    Minus(Vec<UnitExpr>),
    Negate(Box<UnitExpr>),
    Call {
        name: String,
        args: Vec<UnitExpr>,
    },
}

impl UnitExpr {
    pub fn name(name: impl Into<String>) -> Self {
        UnitExpr::Name(name.into())
    }

    pub fn number(value: f64) -> Self {
        UnitExpr::Number { value, units: None }
    }

    pub fn number_with_units(value: f64, units: impl Into<String>) -> Self {
        UnitExpr::Number {
            value,
            units: Some(units.into()),
        }
    }

    pub fn times(children: Vec<UnitExpr>) -> Self {
        UnitExpr::Times(children)
    }

    pub fn divide(numerator: UnitExpr, denominator: UnitExpr) -> Self {
        UnitExpr::Divide(vec![numerator, denominator])
    }

    pub fn power(base: UnitExpr, exponent: UnitExpr) -> Self {
        UnitExpr::Power(vec![base, exponent])
    }

    pub fn minus(lhs: UnitExpr, rhs: UnitExpr) -> Self {
        UnitExpr::Minus(vec![lhs, rhs])
    }

    pub fn negate(inner: UnitExpr) -> Self {
        UnitExpr::Negate(Box::new(inner))
    }

    /// Builds a call node. `pow(a, b)` and `power(a, b)` are the function
    /// spelling of `a ^ b` and become [`UnitExpr::Power`].
    pub fn call(name: impl Into<String>, args: Vec<UnitExpr>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case("pow") || name.eq_ignore_ascii_case("power") {
            UnitExpr::Power(args)
        } else {
            UnitExpr::Call { name, args }
        }
    }

    /// Appends a factor, flattening nested products into one n-ary node.
    pub fn times_with(self, rhs: UnitExpr) -> Self {
        match self {
            UnitExpr::Times(mut children) => {
                children.push(rhs);
                UnitExpr::Times(children)
            }
            lhs => UnitExpr::Times(vec![lhs, rhs]),
        }
    }

    /// Appends a term, flattening nested sums into one n-ary node.
    pub fn plus_with(self, rhs: UnitExpr) -> Self {
        match self {
            UnitExpr::Plus(mut children) => {
                children.push(rhs);
                UnitExpr::Plus(children)
            }
            lhs => UnitExpr::Plus(vec![lhs, rhs]),
        }
    }

    /// The value of a numeral without a unit annotation, looking through
    /// unary minus.
    pub fn bare_number(&self) -> Option<f64> {
        match self {
            UnitExpr::Number { value, units: None } => Some(*value),
            UnitExpr::Negate(inner) => inner.bare_number().map(|v| -v),
            _ => None,
        }
    }

    pub fn top_operator(&self) -> Option<Operator> {
        match self {
            UnitExpr::Times(_) => Some(Operator::Times),
            UnitExpr::Divide(_) => Some(Operator::Divide),
            UnitExpr::Power(_) => Some(Operator::Power),
            UnitExpr::Plus(_) => Some(Operator::Plus),
            UnitExpr::Minus(_) => Some(Operator::Minus),
            UnitExpr::Negate(_) => Some(Operator::Negate),
            UnitExpr::Name(_) | UnitExpr::Number { .. } | UnitExpr::Call { .. } => None,
        }
    }

    fn binds_looser_than(&self, op: Operator) -> bool {
        self.top_operator()
            .is_some_and(|inner| inner.precedence() < op.precedence())
    }

    fn binds_no_tighter_than(&self, op: Operator) -> bool {
        self.top_operator()
            .is_some_and(|inner| inner.precedence() <= op.precedence())
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &UnitExpr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes an n-ary node. Left-associative operators parenthesize looser
/// children on the left and equal-or-looser children on the right; `^` is
/// right-associative and does the opposite.
fn write_chain(f: &mut fmt::Formatter<'_>, children: &[UnitExpr], op: Operator) -> fmt::Result {
    let separator = format!(" {} ", op);
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", separator)?;
        }
        let first = i == 0;
        let parens = match op {
            Operator::Power if first => child.binds_no_tighter_than(op),
            Operator::Power => child.binds_looser_than(op),
            Operator::Times | Operator::Plus => child.binds_looser_than(op),
            _ if first => child.binds_looser_than(op),
            _ => child.binds_no_tighter_than(op),
        };
        write_operand(f, child, parens)?;
    }
    Ok(())
}

impl fmt::Display for UnitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitExpr::Name(name) => write!(f, "{}", name),
            UnitExpr::Number { value, units } => {
                write!(f, "{}", format_number(*value))?;
                if let Some(units) = units {
                    write!(f, " {}", units)?;
                }
                Ok(())
            }
            UnitExpr::Times(children) => write_chain(f, children, Operator::Times),
            UnitExpr::Divide(children) => write_chain(f, children, Operator::Divide),
            UnitExpr::Power(children) => write_chain(f, children, Operator::Power),
            UnitExpr::Plus(children) => write_chain(f, children, Operator::Plus),
            UnitExpr::Minus(children) => write_chain(f, children, Operator::Minus),
            UnitExpr::Negate(inner) => {
                write!(f, "-")?;
                write_operand(f, inner, inner.binds_looser_than(Operator::Negate))
            }
            UnitExpr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

pub mod operator {
    //! ### Formula Operators
    //!
    //! Supported operators in precedence order, loosest first. All but
    //! exponentiation and unary minus are left-associative.
    //!
    //! | Operators | Precedence Group         |
    //! |:---------:|:-------------------------|
    //! | + –       | Addition, subtraction    |
    //! | * /       | Multiplication, division |
    //! | –         | Unary minus              |
    //! | ^         | Exponentiation           |
    //!
    //! Only multiplication, division, and exponentiation by a literal number
    //! are meaningful in a unit definition.

    use std::{cmp, fmt};

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub enum Operator {
        Plus,
        Minus,
        Times,
        Divide,
        Negate,
        Power,
    }

    impl Operator {
        pub fn precedence(&self) -> u8 {
            match self {
                Operator::Plus | Operator::Minus => 1,
                Operator::Times | Operator::Divide => 2,
                Operator::Negate => 3,
                Operator::Power => 4,
            }
        }
    }

    impl fmt::Display for Operator {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let symbol = match self {
                Operator::Plus => "+",
                Operator::Minus | Operator::Negate => "-",
                Operator::Times => "*",
                Operator::Divide => "/",
                Operator::Power => "^",
            };
            write!(f, "{}", symbol)
        }
    }

    impl PartialOrd for Operator {
        fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Operator {
        fn cmp(&self, other: &Self) -> cmp::Ordering {
            self.precedence().cmp(&other.precedence())
        }
    }
}
