#![allow(clippy::module_inception)]

use std::{fmt::Write, rc::Rc};

use tracing::debug;

use crate::{
    analyzer::{analyzer::analyze, symbol_table::SymbolTable},
    ast::ast::Ast,
    codegen::{codegen::generate, instruction::Program},
    errors::errors::{CompileError, Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod vm;

extern crate regex;

/// Source line and file name an error is reported at.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

/// Everything a successful compilation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// The tree, with every expression annotated
    pub ast: Ast,
    pub symbols: SymbolTable,
    pub program: Program,
}

/// Runs the whole pipeline over one source file.
///
/// # Arguments
///
/// * `source` - Program text
/// * `file` - File name used in error positions (defaults to `<input>`)
///
/// # Returns
///
/// The annotated tree, symbol table and program, or the first syntax error,
/// or every type error. Code is only generated when analysis is clean.
pub fn compile(source: String, file: Option<String>) -> Result<Compilation, CompileError> {
    let file = Rc::new(file.unwrap_or_else(|| String::from("<input>")));

    let tokens = tokenize(source, Some(file.to_string())).map_err(CompileError::Syntax)?;
    let mut ast = parse(tokens, Rc::clone(&file)).map_err(CompileError::Syntax)?;

    let symbols = analyze(&mut ast, file)
        .into_symbols()
        .map_err(CompileError::Semantic)?;

    let program = generate(&ast, &symbols)?;
    debug!(instructions = program.len(), "compiled");

    Ok(Compilation {
        ast,
        symbols,
        program,
    })
}

/// Renders an error together with the source line it points at.
///
/// ```text
/// Error: TypeError (if test is not Boolean)
/// -> sample.tny
///    |
///  3 | if x then
///    | ^^^^^^^^^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line = position.0;
    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = match error.get_tip() {
        ErrorTip::None => writeln!(out, "Error: {}", error.get_error_name()),
        tip => writeln!(out, "Error: {} ({})", error.get_error_name(), tip),
    };
    let _ = writeln!(out, "-> {}", position.1);

    let line_text = source
        .lines()
        .nth((line as usize).saturating_sub(1))
        .unwrap_or("");
    let line_text = remove_starting_whitespace(line_text).trim_end();

    let _ = writeln!(out, "{:>padding$}", "|");
    let _ = writeln!(out, " {} | {}", line_string, line_text);
    if !line_text.is_empty() {
        let _ = writeln!(out, "{:>padding$} {}", "|", "^".repeat(line_text.chars().count()));
    }

    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> &str {
    string.trim_start_matches([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use crate::errors::errors::{CompileError, ErrorImpl};

    use super::{compile, format_error};

    #[test]
    fn test_compile_clean_program() {
        let compilation = compile("read x; write x".to_string(), None).unwrap();

        assert_eq!(compilation.symbols.len(), 1);
        assert_eq!(compilation.program.len(), 4);
    }

    #[test]
    fn test_compile_reports_every_type_error() {
        let error = compile(
            "if 1 then write 2 end;\nwrite 1 < 2".to_string(),
            Some("bad.tny".to_string()),
        )
        .unwrap_err();

        match error {
            CompileError::Semantic(diagnostics) => {
                assert_eq!(diagnostics.len(), 2);
                assert_eq!(diagnostics[0].line(), 1);
                assert_eq!(diagnostics[1].line(), 2);
            }
            other => panic!("expected type errors, found {:?}", other),
        }
    }

    #[test]
    fn test_compile_stops_at_syntax_error() {
        let error = compile("read ;".to_string(), None).unwrap_err();

        match error {
            CompileError::Syntax(error) => {
                assert_eq!(error.get_position().1.as_str(), "<input>");
            }
            other => panic!("expected syntax error, found {:?}", other),
        }
    }

    #[test]
    fn test_format_error() {
        let source = "read x;\n  if x then write x end";
        let error = match compile(source.to_string(), Some("sample.tny".to_string())) {
            Err(CompileError::Semantic(mut diagnostics)) => diagnostics.remove(0),
            other => panic!("expected type errors, found {:?}", other),
        };

        assert_eq!(*error.kind(), ErrorImpl::IfTestNotBoolean);
        assert_eq!(
            format_error(&error, source),
            "Error: TypeError (if test is not Boolean)\n\
             -> sample.tny\n\
             \x20 |\n\
             \x202 | if x then write x end\n\
             \x20 | ^^^^^^^^^^^^^^^^^^^^^\n"
        );
    }
}
