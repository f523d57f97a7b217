use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, multispace1, one_of},
    combinator::{map, map_res, opt, recognize, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
};
use thiserror::Error;

use crate::equation::{Operator, UnitExpr};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// No expression could be read at all.
    #[error("Unable to parse the formula '{formula}': {message}")]
    Syntax { formula: String, message: String },

    /// An expression was read but input remained after it.
    #[error("Unexpected trailing characters after the formula '{formula}': '{rest}'")]
    TrailingInput { formula: String, rest: String },
}

/// Parse whitespace (spaces, tabs, newlines)
fn ws<'a, P, O>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier (unit name or function name)
fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        String::from,
    )
    .parse(input)
}

/// Parse a decimal literal with an optional exponent.
///
/// Written out rather than using `nom::number::complete::double`, which also
/// accepts `inf` and `nan` and would swallow the start of unit names such as
/// `info` or `nanometer`.
fn numeral(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize((
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
            opt((one_of("eE"), opt(one_of("+-")), digit1)),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

/// Parse a numeral, optionally followed by a unit annotation (`5 mole`)
fn number(input: &str) -> IResult<&str, UnitExpr> {
    map(
        pair(numeral, opt(preceded(multispace1, identifier))),
        |(value, units)| UnitExpr::Number { value, units },
    )
    .parse(input)
}

/// Parse a parenthesised expression
fn parentheses(input: &str) -> IResult<&str, UnitExpr> {
    delimited(ws(char('(')), expression, ws(char(')'))).parse(input)
}

/// Parse function arguments. The opening parenthesis must follow the name
/// directly.
fn function_arguments(input: &str) -> IResult<&str, Vec<UnitExpr>> {
    delimited(
        char('('),
        separated_list0(ws(char(',')), expression),
        ws(char(')')),
    )
    .parse(input)
}

/// Parse a function call
fn function_call(input: &str) -> IResult<&str, UnitExpr> {
    map(pair(identifier, function_arguments), |(name, args)| {
        UnitExpr::call(name, args)
    })
    .parse(input)
}

/// Parse primary expressions (atoms)
fn primary(input: &str) -> IResult<&str, UnitExpr> {
    ws(alt((
        number,
        // Try function call before bare name since both start with identifier
        function_call,
        map(identifier, UnitExpr::Name),
        parentheses,
    )))
    .parse(input)
}

/// Parse exponentiation (right-associative)
fn exponentiation(input: &str) -> IResult<&str, UnitExpr> {
    let (input, base) = primary(input)?;

    if let Ok((input, _)) = ws(char('^')).parse(input) {
        let (input, exponent) = unary(input)?; // Right-associative
        Ok((input, UnitExpr::power(base, exponent)))
    } else {
        Ok((input, base))
    }
}

/// Parse unary expressions. Binds looser than `^`, so `-a^2` is `-(a^2)`.
fn unary(input: &str) -> IResult<&str, UnitExpr> {
    alt((
        preceded(ws(char('+')), unary),
        map(preceded(ws(char('-')), unary), UnitExpr::negate),
        exponentiation,
    ))
    .parse(input)
}

/// Parse multiplication and division (left-associative)
fn multiplicative(input: &str) -> IResult<&str, UnitExpr> {
    let (mut input, mut left) = unary(input)?;

    loop {
        let op_result = alt((
            value(Operator::Times, ws(char('*'))),
            value(Operator::Divide, ws(char('/'))),
        ))
        .parse(input);

        if let Ok((new_input, op)) = op_result {
            let (new_input, right) = unary(new_input)?;
            input = new_input;
            left = match op {
                Operator::Times => left.times_with(right),
                _ => UnitExpr::divide(left, right),
            };
        } else {
            break;
        }
    }

    Ok((input, left))
}

/// Parse addition and subtraction (left-associative)
fn additive(input: &str) -> IResult<&str, UnitExpr> {
    let (mut input, mut left) = multiplicative(input)?;

    loop {
        let op_result = alt((
            value(Operator::Plus, ws(char('+'))),
            value(Operator::Minus, ws(char('-'))),
        ))
        .parse(input);

        if let Ok((new_input, op)) = op_result {
            let (new_input, right) = multiplicative(new_input)?;
            input = new_input;
            left = match op {
                Operator::Plus => left.plus_with(right),
                _ => UnitExpr::minus(left, right),
            };
        } else {
            break;
        }
    }

    Ok((input, left))
}

/// Parse a complete expression
pub fn expression(input: &str) -> IResult<&str, UnitExpr> {
    ws(additive).parse(input)
}

/// Parses a whole formula. Anything left over after the expression is an
/// error.
pub fn parse_formula(formula: &str) -> Result<UnitExpr, FormulaError> {
    let (rest, expr) = expression(formula).map_err(|e| FormulaError::Syntax {
        formula: formula.to_string(),
        message: e.to_string(),
    })?;

    if !rest.is_empty() {
        return Err(FormulaError::TrailingInput {
            formula: formula.to_string(),
            rest: rest.to_string(),
        });
    }

    Ok(expr)
}
