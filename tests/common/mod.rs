#![allow(dead_code)]

use yalp_lalr::{Assoc, Grammar, GrammarBuilder};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// %left '+' '-' ; %left '*' '/' ; %right '^'
/// E := E op E | '(' E ')' | num
pub fn arith_grammar() -> Grammar {
    let mut builder = GrammarBuilder::default();

    builder
        .terminal("num")
        .unwrap()
        .precedence(Assoc::Left, ["'+'", "'-'"])
        .unwrap()
        .precedence(Assoc::Left, ["'*'", "'/'"])
        .unwrap()
        .precedence(Assoc::Right, ["'^'"])
        .unwrap();

    for op in ["'+'", "'-'", "'*'", "'/'", "'^'"] {
        builder.rule("E", ["E", op, "E"]).unwrap();
    }

    builder
        .rule("E", ["'('", "E", "')'"])
        .unwrap()
        .rule("E", ["num"])
        .unwrap();

    builder.build().unwrap()
}

/// The same expressions without any precedence directive.
pub fn ambiguous_grammar() -> Grammar {
    let mut builder = GrammarBuilder::default();

    builder
        .terminal("num")
        .unwrap()
        .rule("E", ["E", "'+'", "E"])
        .unwrap()
        .rule("E", ["num"])
        .unwrap();

    builder.build().unwrap()
}

/// S := L '=' R | R ; L := '*' R | id ; R := L
pub fn assign_grammar() -> Grammar {
    let mut builder = GrammarBuilder::default();

    builder
        .terminal("id")
        .unwrap()
        .rule("S", ["L", "'='", "R"])
        .unwrap()
        .rule("S", ["R"])
        .unwrap()
        .rule("L", ["'*'", "R"])
        .unwrap()
        .rule("L", ["id"])
        .unwrap()
        .rule("R", ["L"])
        .unwrap();

    builder.build().unwrap()
}

/// Statement lists with optional declarations and an unreachable rule.
///
/// ```grammar
/// prog := decls stmts
/// decls := decls decl | ε
/// decl := 'd' id ';'
/// stmts := stmts stmt | stmt
/// stmt := id '=' id ';'
/// X := 'a'
/// ```
pub fn program_grammar() -> Grammar {
    let mut builder = GrammarBuilder::default();

    builder
        .terminal("id")
        .unwrap()
        .start("prog")
        .rule("prog", ["decls", "stmts"])
        .unwrap()
        .rule("decls", ["decls", "decl"])
        .unwrap()
        .rule("decls", [] as [&str; 0])
        .unwrap()
        .rule("decl", ["'d'", "id", "';'"])
        .unwrap()
        .rule("stmts", ["stmts", "stmt"])
        .unwrap()
        .rule("stmts", ["stmt"])
        .unwrap()
        .rule("stmt", ["id", "'='", "id", "';'"])
        .unwrap()
        .rule("X", ["'a'"])
        .unwrap();

    builder.build().unwrap()
}

pub fn all_grammars() -> Vec<Grammar> {
    vec![
        arith_grammar(),
        ambiguous_grammar(),
        assign_grammar(),
        program_grammar(),
    ]
}
