use crate::{
    ast::{ast::NodeId, types::Operator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    // First parse NUD
    let nud = parser
        .get_nud_lookup()
        .get(&parser.current_token_kind())
        .copied();
    let mut left = match nud {
        Some(nud) => nud(parser)?,
        None => return Err(parser.unexpected("expected an expression")),
    };

    // While the current token binds tighter than `bp`, keep extending the lhs
    while parser.current_binding_power() > bp {
        let operator_bp = parser.current_binding_power();
        let led = parser
            .get_led_lookup()
            .get(&parser.current_token_kind())
            .copied();

        left = match led {
            Some(led) => led(parser, left, operator_bp)?,
            None => return Err(parser.unexpected("expected an operator")),
        };
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.current_token().clone();
            let value = token.value.parse::<i32>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    parser.get_position(),
                )
            })?;

            parser.advance();
            Ok(parser.ast_mut().new_const(token.line, value))
        }
        TokenKind::Identifier => {
            let token = parser.advance().clone();
            Ok(parser.ast_mut().new_id(token.line, token.value))
        }
        _ => Err(parser.unexpected("expected a number or identifier")),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: NodeId,
    bp: BindingPower,
) -> Result<NodeId, Error> {
    let operator_token = parser.advance().clone();
    let op = Operator::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            parser.get_position(),
        )
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(parser
        .ast_mut()
        .new_op(operator_token.line, op, left, right))
}

/// Comparisons take exactly two operands; `a < b < c` is rejected.
pub fn parse_comparison_expr(
    parser: &mut Parser,
    left: NodeId,
    bp: BindingPower,
) -> Result<NodeId, Error> {
    let comparison = parse_binary_expr(parser, left, bp)?;

    if parser.current_binding_power() == BindingPower::Relational {
        return Err(parser.unexpected("comparison operators do not chain"));
    }

    Ok(comparison)
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let error = parser.unexpected("expected `)`");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    Ok(expr)
}
