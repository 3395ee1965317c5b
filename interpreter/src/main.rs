use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use interpreter::error::{EX_IOERR, EX_USAGE};
use interpreter::{Lox, Options};

/// Scans, parses and evaluates Lox expressions, either from a file or an interactive prompt.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File to run. Starts an interactive prompt when omitted.
    path: Option<PathBuf>,

    /// Print every token produced by the scanner.
    #[arg(long)]
    tokens: bool,

    /// Print the parenthesized syntax tree of each expression.
    #[arg(long)]
    ast: bool,

    /// Print each expression in reverse polish notation.
    #[arg(long)]
    rpn: bool,

    /// Don't evaluate, only print the requested debug forms.
    #[arg(long)]
    no_eval: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            print_tokens: self.tokens,
            print_ast: self.ast,
            print_rpn: self.rpn,
            evaluate: !self.no_eval,
        }
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            process::exit(EX_USAGE);
        }
    };

    let code = match &args.path {
        Some(path) => run_file(path, args.options()),
        None => run_prompt(args.options()),
    };
    process::exit(code);
}

fn run_file(path: &Path, options: Options) -> i32 {
    let src = match fs::read_to_string(path) {
        Ok(src) => src,
        Err(err) => {
            eprintln!("Failed to read '{}': {}", path.display(), err);
            return EX_USAGE;
        }
    };

    let mut stdout = io::stdout();
    match Lox::new(options, &mut stdout).run(&src) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            err.exit_code()
        }
    }
}

// Every line is its own run, an error on one line doesn't carry over to the next
fn run_prompt(options: Options) -> i32 {
    let mut stdout = io::stdout();
    let mut lox = Lox::new(options, &mut stdout);
    let mut lines = io::stdin().lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return EX_IOERR;
        }

        let line = match lines.next() {
            None => return 0,
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("Failed to read input: {}", err);
                return EX_IOERR;
            }
        };

        if let Err(err) = lox.run(&line) {
            eprintln!("{}", err);
        }
    }
}
