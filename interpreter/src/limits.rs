// How many times the parser may descend into a nested expression (a group, a unary operand,
// a ternary branch) before giving up
pub(crate) const PARSER_MAX_NESTING: usize = 64;

// Deepest tree the parser will build, long operator chains count too. Evaluation and printing
// recurse once per level.
pub(crate) const PARSER_MAX_HEIGHT: usize = 256;
