use tracing::debug;

use crate::{
    ast::ast::NodeId,
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => {
            let line = parser.current_token().line;
            let stmt = handler(parser)?;
            debug!(line, "parsed statement");
            Ok(stmt)
        }
        None => Err(parser.unexpected("expected a statement")),
    }
}

/// Parses `statement { ";" statement }`, linking the statements as siblings.
///
/// The sequence ends at `end`, `else`, `until` or end of input; anything
/// else between two statements must be a semicolon.
pub fn parse_stmt_sequence(parser: &mut Parser) -> Result<NodeId, Error> {
    let head = parse_stmt(parser)?;
    let mut tail = head;

    while !parser.current_token_kind().ends_sequence() {
        parser.expect(TokenKind::Semicolon)?;
        let next = parse_stmt(parser)?;
        parser.ast_mut().set_sibling(tail, next);
        tail = next;
    }

    Ok(head)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.advance().line;

    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then_part = parse_stmt_sequence(parser)?;

    let else_part;
    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        else_part = Some(parse_stmt_sequence(parser)?);
    } else {
        else_part = None;
    }

    parser.expect(TokenKind::End)?;

    Ok(parser.ast_mut().new_if(line, test, then_part, else_part))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.advance().line;

    let body = parse_stmt_sequence(parser)?;
    parser.expect(TokenKind::Until)?;
    let test = parse_expr(parser, BindingPower::Default)?;

    Ok(parser.ast_mut().new_repeat(line, body, test))
}

pub fn parse_assign_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let target = parser.expect(TokenKind::Identifier)?;

    let error = parser.unexpected("expected `:=` after assignment target");
    parser.expect_error(TokenKind::Assignment, Some(error))?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(parser.ast_mut().new_assign(target.line, target.value, value))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.advance().line;

    let error = parser.unexpected("expected identifier after `read`");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    Ok(parser.ast_mut().new_read(line, name))
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<NodeId, Error> {
    let line = parser.advance().line;

    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(parser.ast_mut().new_write(line, value))
}
