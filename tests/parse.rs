mod common;

use common::{arith_grammar, assign_grammar, init_logger, program_grammar};
use yalp_lalr::{
    lr::{Step, Tables},
    Config, ErrorKind, LrParser, MachineType,
};

#[test]
fn test_001_accepts_derivable_input() {
    init_logger();

    let grammar = program_grammar();
    let tables = Tables::build(&grammar, Config::default());
    let mut parser = LrParser::new(&tables);

    let input = ["'d'", "id", "';'", "id", "'='", "id", "';'", "id", "'='", "id", "';'"];
    let ast = parser.parse(input).unwrap();

    assert_eq!(ast.kind, "prog");
    assert_eq!(parser.consumed(), input.len());

    // Statements without declarations.
    assert!(parser.parse(["id", "'='", "id", "';'"]).is_ok());
}

#[test]
fn test_002_precedence_shapes_the_tree() {
    let grammar = arith_grammar();
    let tables = Tables::build(&grammar, Config::default());
    let mut parser = LrParser::new(&tables);

    let ast = parser.parse(["num", "'+'", "num", "'*'", "num"]).unwrap();
    assert_eq!(ast.to_sexpr(), "(E (E num) '+' (E (E num) '*' (E num)))");

    let ast = parser.parse(["num", "'-'", "num", "'-'", "num"]).unwrap();
    assert_eq!(ast.to_sexpr(), "(E (E (E num) '-' (E num)) '-' (E num))");

    let ast = parser.parse(["num", "'^'", "num", "'^'", "num"]).unwrap();
    assert_eq!(ast.to_sexpr(), "(E (E num) '^' (E (E num) '^' (E num)))");

    let ast = parser.parse(["'('", "num", "'+'", "num", "')'", "'*'", "num"]).unwrap();
    assert_eq!(ast.to_sexpr(), "(E (E '(' (E (E num) '+' (E num)) ')') '*' (E num))");
}

#[test]
fn test_003_error_at_invalid_symbol() {
    let grammar = program_grammar();
    let tables = Tables::build(&grammar, Config::default());

    let valid = ["'d'", "id", "';'", "id", "'='", "id", "';'"];

    for k in 1..=valid.len() {
        // Replace the k-th symbol with a terminal that is never expected there.
        let mut input = valid.to_vec();
        let invalid = if input[k - 1] == "'='" { "id" } else { "'='" };
        input[k - 1] = invalid;

        let mut parser = LrParser::new(&tables);
        let err = parser.parse(input.iter()).unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::UnexpectedSymbol { .. }));
        assert_eq!(parser.consumed(), k - 1);
        assert_eq!(parser.next_symbol(), grammar.symbol_id(invalid));
        assert_eq!(err.state(), Some(parser.state()));

        // The same state is reached by feeding the k - 1 valid symbols to the driver.
        let mut stack = vec![0];
        for name in valid[..k - 1].iter().chain([&invalid]) {
            let symbol = grammar.symbol_id(name).unwrap();
            while let Step::Reduce { .. } = tables.step(&mut stack, symbol) {}
        }
        assert_eq!(stack.last().copied(), Some(parser.state()));
    }
}

#[test]
fn test_004_every_machine_accepts_conflict_free_input() {
    let grammar = assign_grammar();

    for machine in [MachineType::Slr1, MachineType::Lalr1] {
        let tables = Tables::build(&grammar, Config::new(machine));
        let mut parser = LrParser::new(&tables);

        let ast = parser.parse(["'*'", "id", "'='", "id"]).unwrap();
        assert_eq!(ast.kind, "S");
    }
}

#[test]
fn test_005_expected_symbols_in_error() {
    let grammar = arith_grammar();
    let tables = Tables::build(&grammar, Config::default());
    let mut parser = LrParser::new(&tables);

    let err = parser.parse(["num", "num"]).unwrap_err();

    match err.kind() {
        ErrorKind::UnexpectedSymbol { expecting, got } => {
            assert_eq!(got, "num");
            let expecting = expecting.iter().collect::<Vec<_>>();
            assert!(expecting.contains(&"'+'"));
            assert!(expecting.contains(&"$end"));
            assert!(!expecting.contains(&"num"));
        }
        kind => panic!("unexpected error {:?}", kind),
    }
}
