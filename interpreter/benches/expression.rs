use criterion::{criterion_group, criterion_main, Criterion};
use interpreter::interpreter::Interpreter;
use interpreter::parser::Parser;
use interpreter::{Lox, Options};
use lox_core::scan;
use std::io;

fn source() -> String {
    let line = "(1 + 2) * 3 - 4 / 5 == 6 ? \"yes\" + \"!\" : !nil, -7 >= 8;\n";
    line.repeat(200)
}

fn benchmark(c: &mut Criterion) {
    let src = source();

    c.bench_function("scan 200 lines", |b| b.iter(|| scan(&src)));

    let tokens = scan(&src).tokens;
    c.bench_function("parse 200 lines", |b| {
        b.iter(|| Parser::new(&tokens).parse_all().unwrap())
    });

    let exprs = Parser::new(&tokens).parse_all().unwrap().0;
    c.bench_function("evaluate 200 lines", |b| {
        b.iter(|| {
            let mut interpreter = Interpreter::new();
            for expr in &exprs {
                interpreter.evaluate(expr).unwrap();
            }
        })
    });

    let mut sink = io::sink();
    c.bench_function("run 200 lines", |b| {
        b.iter(|| {
            Lox::new(Options::default(), &mut sink).run(&src).unwrap();
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
