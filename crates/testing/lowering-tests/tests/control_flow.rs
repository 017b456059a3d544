//! Loops, conditionals, switch and return

use ch_diagnostics::ErrorKind;
use ch_hir::{Assignment, CompoundOperator, DataType, Expression, Statement};
use ch_lower::LowerOptions;
use expect_test::expect;
use lowering_tests::*;

fn counter_body(count: f64) -> Vec<Statement> {
    vec![
        declare("c", DataType::Number, Some(num(0.0))),
        inline_repeat(num(count), vec![assign("c", Assignment::PlusPlus)]),
    ]
}

/// An inline repeat copies its body instead of looping
#[test]
fn test_inline_repeat_unrolls() {
    let lowered = lower_body(counter_body(3.0));

    expect![[r#"
        append:toList:(0, "stack")
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), 1))
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), 1))
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), 1))
        deleteLine:ofList:("last", "stack")
    "#]]
    .assert_eq(&lowered.render());
    assert!(lowered.diagnostics.is_empty());
}

/// Fractional counts are floored; zero and negative counts emit nothing
#[test]
fn test_inline_repeat_counts() {
    assert_eq!(lower_body(counter_body(2.7)).blocks().len(), 4);
    assert_eq!(lower_body(counter_body(0.0)).blocks().len(), 2);
    assert_eq!(lower_body(counter_body(-3.0)).blocks().len(), 2);
    assert!(lower_body(counter_body(0.0)).diagnostics.is_empty());
}

/// Locals declared in an unrolled body are allocated and released per copy
#[test]
fn test_inline_repeat_body_scope() {
    let lowered = lower_body(vec![inline_repeat(
        num(2.0),
        vec![declare("t", DataType::Number, Some(num(1.0)))],
    )]);

    expect![[r#"
        append:toList:(1, "stack")
        deleteLine:ofList:("last", "stack")
        append:toList:(1, "stack")
        deleteLine:ofList:("last", "stack")
    "#]]
    .assert_eq(&lowered.render());
}

/// An inline repeat needs a number literal as its count
#[test]
fn test_inline_repeat_requires_literal() {
    let lowered = lower_body(vec![
        declare("c", DataType::Number, Some(num(3.0))),
        inline_repeat(var("c"), vec![assign("c", Assignment::PlusPlus)]),
        inline_repeat(text("3"), Vec::new()),
    ]);

    assert_eq!(
        lowered.messages(),
        vec!["Loop cannot be inlined", "Loop cannot be inlined"]
    );
    assert_eq!(lowered.kinds(), vec![ErrorKind::InvalidArgument; 2]);
    assert_eq!(lowered.blocks().len(), 2);
}

/// Counts above the configured limit are rejected
#[test]
fn test_inline_repeat_limit() {
    let options = LowerOptions {
        max_inline_repetitions: 4,
        ..LowerOptions::default()
    };
    let fixture = Fixture::new().method(method(METHOD, Vec::new(), counter_body(5.0)));

    let lowered = fixture.lower_with(METHOD, &options);
    assert_eq!(
        lowered.messages(),
        vec!["Loop cannot be inlined more than 4 times"]
    );
    assert_eq!(lowered.blocks().len(), 2);

    let fixture = Fixture::new().method(method(METHOD, Vec::new(), counter_body(4.0)));
    assert!(fixture.lower_with(METHOD, &options).diagnostics.is_empty());
}

/// A plain repeat wraps its body, which releases its own locals
#[test]
fn test_repeat_loop() {
    let lowered = lower_body(vec![repeat(
        num(3.0),
        vec![declare("t", DataType::Number, None)],
    )]);

    assert_eq!(
        lowered.render(),
        "doRepeat(3, { append:toList:(0, \"stack\"); deleteLine:ofList:(\"last\", \"stack\") })\n"
    );
}

/// `while` loops until the negated condition holds
#[test]
fn test_while_loop() {
    let lowered = lower_body(vec![
        declare("c", DataType::Number, Some(num(0.0))),
        while_loop(
            binary(CompoundOperator::Less, var("c"), num(10.0)),
            vec![assign("c", Assignment::PlusPlus)],
        ),
    ]);

    assert_eq!(
        lowered.blocks()[1].to_string(),
        r#"doUntil(not(<(getLine:ofList:("last", "stack"), 10)), { setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), 1)) })"#
    );
}

/// A literal `while` condition is negated at compile time
#[test]
fn test_while_literal_condition() {
    let lowered = lower_body(vec![while_loop(boolean(true), Vec::new())]);
    assert_eq!(lowered.render(), "doUntil(false, {})\n");
}

/// `forever` has a body and nothing else
#[test]
fn test_forever_loop() {
    let lowered = Fixture::new()
        .sprite_decl(global("ticks", DataType::Number, None))
        .method(method(
            METHOD,
            Vec::new(),
            vec![forever(vec![assign("ticks", Assignment::PlusPlus)])],
        ))
        .lower(METHOD);

    assert_eq!(lowered.render(), "doForever({ changeVar:by:(\"ticks\", 1) })\n");
}

/// Each branch of an `if` gets its own scope
#[test]
fn test_if_else_scopes() {
    let lowered = lower_body(vec![if_else(
        boolean(true),
        vec![declare("a", DataType::Number, None)],
        vec![declare("a", DataType::String, None)],
    )]);

    assert_eq!(
        lowered.render(),
        concat!(
            "doIfElse(true, ",
            "{ append:toList:(0, \"stack\"); deleteLine:ofList:(\"last\", \"stack\") }, ",
            "{ append:toList:(\"\", \"stack\"); deleteLine:ofList:(\"last\", \"stack\") })\n"
        )
    );
    assert!(lowered.diagnostics.is_empty());
}

/// An `if` without an else branch uses the one-armed block
#[test]
fn test_if_without_else() {
    let lowered = lower_body(vec![if_else(boolean(false), Vec::new(), Vec::new())]);
    assert_eq!(lowered.render(), "doIf(false, {})\n");
}

fn equals_c(value: f64) -> Expression {
    binary(CompoundOperator::Equal, var("c"), num(value))
}

fn set_c(value: f64) -> Statement {
    assign("c", Assignment::Equals(num(value)))
}

/// Cases become nested conditionals with the default as the innermost else
#[test]
fn test_switch_with_default() {
    let lowered = lower_body(vec![
        declare("c", DataType::Number, None),
        switch(
            var("c"),
            vec![
                case(vec![equals_c(1.0)], vec![set_c(10.0)]),
                case(vec![equals_c(2.0)], vec![set_c(20.0)]),
                default_case(vec![set_c(0.0)]),
            ],
        ),
    ]);

    assert_eq!(
        lowered.blocks()[1].to_string(),
        concat!(
            r#"doIfElse(=(getLine:ofList:("last", "stack"), 1), "#,
            r#"{ setLine:ofList:to:("last", "stack", 10) }, "#,
            r#"{ doIfElse(=(getLine:ofList:("last", "stack"), 2), "#,
            r#"{ setLine:ofList:to:("last", "stack", 20) }, "#,
            r#"{ setLine:ofList:to:("last", "stack", 0) }) })"#
        )
    );
}

/// Without a default the innermost conditional has no else branch
#[test]
fn test_switch_without_default() {
    let lowered = lower_body(vec![
        declare("c", DataType::Number, None),
        switch(
            var("c"),
            vec![
                case(vec![equals_c(1.0)], vec![set_c(10.0)]),
                case(vec![equals_c(2.0)], vec![set_c(20.0)]),
            ],
        ),
    ]);

    assert_eq!(
        lowered.blocks()[1].to_string(),
        concat!(
            r#"doIfElse(=(getLine:ofList:("last", "stack"), 1), "#,
            r#"{ setLine:ofList:to:("last", "stack", 10) }, "#,
            r#"{ doIf(=(getLine:ofList:("last", "stack"), 2), "#,
            r#"{ setLine:ofList:to:("last", "stack", 20) }) })"#
        )
    );
}

/// A case with several conditions requires all of them, in order
#[test]
fn test_switch_case_conditions_are_joined() {
    let lowered = lower_body(vec![
        declare("c", DataType::Number, None),
        switch(
            var("c"),
            vec![case(
                vec![
                    binary(CompoundOperator::Greater, var("c"), num(1.0)),
                    binary(CompoundOperator::Less, var("c"), num(5.0)),
                    binary(CompoundOperator::NotEqual, var("c"), num(3.0)),
                ],
                Vec::new(),
            )],
        ),
    ]);

    assert_eq!(
        lowered.blocks()[1].to_string(),
        concat!(
            r#"doIf(&(>(getLine:ofList:("last", "stack"), 1), "#,
            r#"&(<(getLine:ofList:("last", "stack"), 5), "#,
            r#"not(=(getLine:ofList:("last", "stack"), 3)))), {})"#
        )
    );
}

/// A switch with only a default runs it unconditionally
#[test]
fn test_switch_only_default() {
    let lowered = lower_body(vec![
        declare("c", DataType::Number, None),
        switch(var("c"), vec![default_case(vec![set_c(1.0)])]),
    ]);

    assert_eq!(
        lowered.blocks()[1].to_string(),
        r#"setLine:ofList:to:("last", "stack", 1)"#
    );
    assert_eq!(lowered.blocks().len(), 3);
}

/// `return` writes the value, releases every live local, then stops
#[test]
fn test_return_releases_all_scopes() {
    let lowered = Fixture::new()
        .method(returning(
            METHOD,
            DataType::Number,
            Vec::new(),
            vec![
                declare("a", DataType::Number, Some(num(1.0))),
                scope(vec![
                    declare("b", DataType::Number, Some(num(2.0))),
                    ret(Some(binary(CompoundOperator::Add, var("a"), var("b")))),
                ]),
            ],
        ))
        .lower(METHOD);

    expect![[r#"
        append:toList:(1, "stack")
        append:toList:(2, "stack")
        setVar:to:("return test", +(getLine:ofList:(-(lineCountOfList:("stack"), 1), "stack"), getLine:ofList:("last", "stack")))
        deleteLine:ofList:("last", "stack")
        deleteLine:ofList:("last", "stack")
        stopScripts("this script")
        deleteLine:ofList:("last", "stack")
        deleteLine:ofList:("last", "stack")
    "#]]
    .assert_eq(&lowered.render());
    assert!(lowered.diagnostics.is_empty());
}

/// A bare `return` only releases and stops
#[test]
fn test_bare_return() {
    let lowered = lower_body(vec![ret(None)]);
    assert_eq!(lowered.render(), "stopScripts(\"this script\")\n");
}

/// A method without a return type cannot return a value
#[test]
fn test_return_value_from_void_method() {
    let lowered = lower_body(vec![ret(Some(num(1.0)))]);

    assert_eq!(lowered.kinds(), vec![ErrorKind::ImproperUsage]);
    assert_eq!(lowered.messages(), vec!["Method 'test' does not return a value"]);
    assert_eq!(lowered.render(), "stopScripts(\"this script\")\n");
}

/// The returned value must fit the declared return type
#[test]
fn test_return_type_mismatch() {
    let lowered = Fixture::new()
        .method(returning(
            METHOD,
            DataType::Number,
            Vec::new(),
            vec![ret(Some(text("abc")))],
        ))
        .lower(METHOD);

    assert_eq!(
        lowered.messages(),
        vec!["Expected value of type 'num' but instead found value of type 'string'"]
    );
    assert_eq!(lowered.blocks().len(), 2);
}
