//! Assignment operators on locals, globals and read-only names

use ch_diagnostics::ErrorKind;
use ch_hir::{Assignment, CompoundOperator, DataType, Literal};
use expect_test::expect;
use lowering_tests::*;

fn every_operator() -> Vec<Assignment> {
    vec![
        Assignment::Equals(num(1.0)),
        Assignment::AddEquals(num(1.0)),
        Assignment::MinusEquals(num(1.0)),
        Assignment::DotEquals(text("a")),
        Assignment::PlusPlus,
        Assignment::MinusMinus,
    ]
}

/// No operator may write to a constant, and nothing is emitted
#[test]
fn test_constants_are_readonly() {
    for assignment in every_operator() {
        let lowered = Fixture::new()
            .project_decl(constant("MAX", DataType::Number, Literal::Number(10.0)))
            .method(method(METHOD, Vec::new(), vec![assign("MAX", assignment)]))
            .lower(METHOD);

        assert!(lowered.blocks().is_empty());
        assert_eq!(lowered.messages(), vec!["Value 'MAX' is read-only"]);
        assert_eq!(lowered.kinds(), vec![ErrorKind::ValueIsReadonly]);
    }
}

/// No operator may write to a parameter
#[test]
fn test_parameters_are_readonly() {
    for assignment in every_operator() {
        let lowered = Fixture::new()
            .method(method(
                METHOD,
                vec![param("steps", DataType::Object)],
                vec![assign("steps", assignment)],
            ))
            .lower(METHOD);

        assert!(lowered.blocks().is_empty());
        assert_eq!(lowered.messages(), vec!["Value 'steps' is read-only"]);
    }
}

/// Numeric operators on a local read, combine and write back the slot
#[test]
fn test_local_stepping_operators() {
    let lowered = Fixture::new()
        .method(method(
            METHOD,
            vec![param("by", DataType::Number)],
            vec![
                declare("x", DataType::Number, Some(num(0.0))),
                assign("x", Assignment::PlusPlus),
                assign("x", Assignment::MinusMinus),
                assign("x", Assignment::AddEquals(num(4.0))),
                assign("x", Assignment::MinusEquals(var("by"))),
            ],
        ))
        .lower(METHOD);

    expect![[r#"
        append:toList:(0, "stack")
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), 1))
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), -1))
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), 4))
        setLine:ofList:to:("last", "stack", +(getLine:ofList:("last", "stack"), -(0, getParam("by", "r"))))
        deleteLine:ofList:("last", "stack")
    "#]]
    .assert_eq(&lowered.render());
    assert!(lowered.diagnostics.is_empty());
}

/// `.=` appends to the current value of a local
#[test]
fn test_local_concat_assignment() {
    let lowered = lower_body(vec![
        declare("s", DataType::String, Some(text("ab"))),
        assign("s", Assignment::DotEquals(text("c"))),
    ]);

    assert_eq!(
        lowered.blocks()[1].to_string(),
        r#"setLine:ofList:to:("last", "stack", concatenate:with:(getLine:ofList:("last", "stack"), "c"))"#
    );
}

/// Globals are written by name; stepping operators use a change block
#[test]
fn test_global_assignments() {
    let lowered = Fixture::new()
        .sprite_decl(global("score", DataType::Number, None))
        .sprite_decl(global("name", DataType::String, None))
        .method(method(
            METHOD,
            Vec::new(),
            vec![
                assign("score", Assignment::Equals(num(5.0))),
                assign("score", Assignment::AddEquals(num(2.0))),
                assign("score", Assignment::MinusEquals(num(2.0))),
                assign("score", Assignment::PlusPlus),
                assign("score", Assignment::MinusMinus),
                assign("name", Assignment::DotEquals(text("!"))),
            ],
        ))
        .lower(METHOD);

    expect![[r#"
        setVar:to:("score", 5)
        changeVar:by:("score", 2)
        changeVar:by:("score", -2)
        changeVar:by:("score", 1)
        changeVar:by:("score", -1)
        setVar:to:("name", concatenate:with:(readVariable("name"), "!"))
    "#]]
    .assert_eq(&lowered.render());
    assert!(lowered.diagnostics.is_empty());
}

/// Numeric operators on a string are reported, but code is still emitted
#[test]
fn test_numeric_operator_on_string() {
    let lowered = lower_body(vec![
        declare("s", DataType::String, Some(text("a"))),
        assign("s", Assignment::AddEquals(num(1.0))),
        assign("s", Assignment::MinusEquals(num(1.0))),
        assign("s", Assignment::PlusPlus),
        assign("s", Assignment::MinusMinus),
    ]);

    assert_eq!(
        lowered.messages(),
        vec![
            "Cannot use operator '+=' on a value of type 'string'",
            "Cannot use operator '-=' on a value of type 'string'",
            "Cannot use operator '++' on a value of type 'string'",
            "Cannot use operator '--' on a value of type 'string'",
        ]
    );
    assert_eq!(lowered.blocks().len(), 6);
}

/// `.=` on a number or boolean is reported
#[test]
fn test_concat_operator_on_non_string() {
    let lowered = Fixture::new()
        .sprite_decl(global("flag", DataType::Boolean, None))
        .method(method(
            METHOD,
            Vec::new(),
            vec![
                declare("n", DataType::Number, Some(num(0.0))),
                assign("n", Assignment::DotEquals(text("x"))),
                assign("flag", Assignment::DotEquals(text("x"))),
            ],
        ))
        .lower(METHOD);

    assert_eq!(
        lowered.messages(),
        vec![
            "Cannot use operator '.=' on a value of type 'num'",
            "Cannot use operator '.=' on a value of type 'bool'",
        ]
    );
    assert_eq!(lowered.diagnostics.count(ErrorKind::TypeMismatch), 2);
}

/// Object-typed targets accept every operator
#[test]
fn test_object_accepts_every_operator() {
    let mut body = vec![declare("o", DataType::Object, None)];
    body.extend(every_operator().into_iter().map(|assignment| assign("o", assignment)));

    let lowered = lower_body(body);
    assert!(lowered.diagnostics.is_empty());
    assert_eq!(lowered.blocks().len(), 8);
}

/// Plain `=` is never restricted by the target's type
#[test]
fn test_plain_assignment_is_unchecked() {
    let lowered = lower_body(vec![
        declare("n", DataType::Number, None),
        assign("n", Assignment::Equals(text("oops"))),
    ]);

    assert!(lowered.diagnostics.is_empty());
}

/// A mismatched initializer is reported with the declared and found types
#[test]
fn test_initializer_type_mismatch() {
    let lowered = lower_body(vec![
        declare("n", DataType::Number, Some(text("five"))),
        declare("b", DataType::Boolean, Some(num(1.0))),
        declare("m", DataType::Number, Some(boolean(true))),
        declare(
            "s",
            DataType::String,
            Some(binary(CompoundOperator::Concat, text("a"), num(1.0))),
        ),
    ]);

    assert_eq!(
        lowered.messages(),
        vec![
            "Expected value of type 'num' but instead found value of type 'string'",
            "Expected value of type 'bool' but instead found value of type 'num'",
        ]
    );
    assert_eq!(lowered.blocks().len(), 8);
}

/// Every array element is checked against the element type
#[test]
fn test_array_element_type_mismatch() {
    let lowered = lower_body(vec![declare_array(
        "xs",
        DataType::Number,
        vec![num(1.0), text("two")],
    )]);

    assert_eq!(
        lowered.messages(),
        vec!["Expected value of type 'num' but instead found value of type 'string'"]
    );
    assert_eq!(lowered.blocks().len(), 3);
}
