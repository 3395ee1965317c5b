use std::io::Write;

use lox_core::{scan, Scanned};

use crate::error::{Error, RunError};
use crate::interpreter::Interpreter;
use crate::parser::{ExprStream, Parser};
use crate::printer::{AstPrinter, RpnPrinter};

/// What a run should write to its output, besides the computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub print_tokens: bool,
    pub print_ast: bool,
    pub print_rpn: bool,
    pub evaluate: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            print_tokens: false,
            print_ast: false,
            print_rpn: false,
            evaluate: true,
        }
    }
}

/// Runs source text through the whole pipeline: scan, parse, then print and/or evaluate each
/// expression. Runs don't share any state, a failed run has no effect on the next one.
pub struct Lox<'a> {
    options: Options,
    interpreter: Interpreter,

    // Values and debug forms are written here, diagnostics are returned to the caller
    stdout: &'a mut dyn Write,
}

impl<'a> Lox<'a> {
    pub fn new(options: Options, stdout: &'a mut dyn Write) -> Self {
        Lox {
            options,
            interpreter: Interpreter::new(),
            stdout,
        }
    }

    pub fn run(&mut self, src: &str) -> Result<(), RunError> {
        let Scanned { tokens, errors } = scan(src);

        if self.options.print_tokens {
            for token in &tokens {
                writeln!(self.stdout, "{}", token)?;
            }
        }

        // Parsing goes ahead on a stream with lexical errors, so syntax errors get reported too
        let mut errs: Vec<Error> = errors.into_iter().map(Error::from).collect();
        let exprs = match Parser::new(&tokens).parse_all() {
            Ok(ExprStream(exprs)) => exprs,
            Err(parser_errs) => {
                errs.extend(parser_errs);
                Vec::new()
            }
        };

        if !errs.is_empty() {
            // Stable, so a lexical error still comes before a syntax error on the same line
            errs.sort_by_key(Error::line);
            return Err(RunError::Static(errs));
        }

        for expr in &exprs {
            #[cfg(feature = "debug-trace")]
            writeln!(self.stdout, "[ {} ]", AstPrinter.print(expr))?;

            if self.options.print_ast {
                writeln!(self.stdout, "{}", AstPrinter.print(expr))?;
            }

            if self.options.print_rpn {
                writeln!(self.stdout, "{}", RpnPrinter.print(expr))?;
            }

            if self.options.evaluate {
                let value = self
                    .interpreter
                    .evaluate(expr)
                    .map_err(RunError::Runtime)?;
                writeln!(self.stdout, "{}", value)?;
            }
        }

        Ok(())
    }
}
