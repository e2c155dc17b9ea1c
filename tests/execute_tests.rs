//! Integration tests for template execution
//!
//! Covers single-node and template execution (substitution rounds, the
//! `@_` escape, chained resolution through spliced names) and
//! multi-template resolution over a mutual-reference graph.

use pretty_assertions::assert_eq;

use sigil::{parse_node, parse_template, parse_templates, Assignments, ROOT_TEMPLATE};

fn base_assignments() -> Assignments {
    [
        ("Fmt", "TORPOR"),
        ("Op", "ReCode"),
        ("Mod", "NonLocal"),
        ("TORPORReCode", "For_Great_Justice!"),
        ("TORPORReCodeNonLocal", "ZigZigZig"),
        ("TORPORReCode_NonLocal", "ZIG!"),
        ("Replace", "Maybe @Op?"),
    ]
    .into_iter()
    .collect()
}

struct NodeCase {
    template: &'static str,
    bound: bool,
    expect_change: bool,
    expected_display: &'static str,
    expected_annotated: &'static str,
    expected_result: &'static str,
}

const NODE_CASES: &[NodeCase] = &[
    NodeCase {
        template: "@@Fmt_@Op__",
        bound: false,
        expect_change: false,
        expected_display: "{@@Fmt_@Op__{@Fmt_}{@Op_}}",
        expected_annotated: "{'@@Fmt_@Op__'[0,11]{'@Fmt_'[1,6]}{'@Op_'[6,10]}}",
        expected_result: "@@Fmt_@Op__",
    },
    NodeCase {
        template: "@Fmt@Op__",
        bound: true,
        expect_change: true,
        expected_display: "{@FmtReCode_}",
        expected_annotated: "{'@FmtReCode_'[0,9]}",
        expected_result: "@FmtReCode_",
    },
    NodeCase {
        template: "@@Op@Fmt___",
        bound: true,
        expect_change: true,
        expected_display: "{@@OpTORPOR__{@OpTORPOR_}}",
        expected_annotated: "{'@@OpTORPOR__'[0,11]{'@OpTORPOR_'[1,11]}}",
        expected_result: "@@OpTORPOR__",
    },
    NodeCase {
        template: "@@Fmt_@Op__",
        bound: true,
        expect_change: true,
        expected_display: "{For_Great_Justice!}",
        expected_annotated: "{'For_Great_Justice!'[0,11]}",
        expected_result: "For_Great_Justice!",
    },
    NodeCase {
        template: "@@Fmt_@Op_@_@Mod__",
        bound: true,
        expect_change: true,
        expected_display: "{ZIG!}",
        expected_annotated: "{'ZIG!'[0,18]}",
        expected_result: "ZIG!",
    },
    NodeCase {
        template: "@@Fmt_@Op_@Mod__",
        bound: true,
        expect_change: true,
        expected_display: "{ZigZigZig}",
        expected_annotated: "{'ZigZigZig'[0,16]}",
        expected_result: "ZigZigZig",
    },
];

#[test]
fn node_execute_in_place() {
    for case in NODE_CASES {
        let (mut node, _) = parse_node(case.template).expect(case.template);
        let mut assignments = if case.bound {
            base_assignments()
        } else {
            Assignments::new()
        };
        let changed = node.execute_in_place(&mut assignments);
        assert_eq!(changed, case.expect_change, "{}", case.template);
        assert_eq!(node.to_string(), case.expected_display, "{}", case.template);
        assert_eq!(node.annotated(), case.expected_annotated, "{}", case.template);
        assert_eq!(node.text.to_string(), case.expected_result, "{}", case.template);
    }
}

#[test]
fn node_execute_preserves_the_original() {
    for case in NODE_CASES {
        let (node, _) = parse_node(case.template).expect(case.template);
        let mut assignments = if case.bound {
            base_assignments()
        } else {
            Assignments::new()
        };
        let (result, resolved) = node.execute(&mut assignments);
        assert_eq!(node.text.to_string(), case.template, "{}", case.template);
        assert_eq!(result, case.expected_result, "{}", case.template);
        assert_eq!(
            resolved.to_string(),
            case.expected_display,
            "{}",
            case.template
        );
    }
}

struct TemplateCase {
    template: &'static str,
    bound: bool,
    expect_change: bool,
    expected_display: &'static str,
    expected_result: &'static str,
}

const TEMPLATE_CASES: &[TemplateCase] = &[
    TemplateCase {
        template: "Hello @: @@Fmt_@Op bob",
        bound: false,
        expect_change: false,
        expected_display: "Template:\n\tHello @: @@Fmt_@Op bob\nVariables:\n\t{@@Fmt_@Op__{@Fmt_}{@Op_}}\n",
        expected_result: "Hello @: @@Fmt_@Op bob",
    },
    TemplateCase {
        template: "o@_o",
        bound: true,
        expect_change: true,
        expected_display: "Template:\n\to_o\nVariables:\n",
        expected_result: "o_o",
    },
    TemplateCase {
        template: "->@Replace<-",
        bound: true,
        expect_change: true,
        expected_display: "Template:\n\t->Maybe ReCode?<-\nVariables:\n",
        expected_result: "->Maybe ReCode?<-",
    },
    TemplateCase {
        template: "func @Fmt@Op()",
        bound: true,
        expect_change: true,
        expected_display: "Template:\n\tfunc @FmtReCode_()\nVariables:\n\t{@FmtReCode_}\n",
        expected_result: "func @FmtReCode_()",
    },
    TemplateCase {
        template: "func @@Op@Fmt()",
        bound: true,
        expect_change: true,
        expected_display: "Template:\n\tfunc @@OpTORPOR__()\nVariables:\n\t{@@OpTORPOR__{@OpTORPOR_}}\n",
        expected_result: "func @@OpTORPOR__()",
    },
    TemplateCase {
        template: "func @@Fmt_@Op()",
        bound: true,
        expect_change: true,
        expected_display: "Template:\n\tfunc For_Great_Justice!()\nVariables:\n",
        expected_result: "func For_Great_Justice!()",
    },
    TemplateCase {
        template: "(@Fmt_@Op_@_@Mod)",
        bound: true,
        expect_change: true,
        expected_display: "Template:\n\t(TORPORReCode_NonLocal)\nVariables:\n",
        expected_result: "(TORPORReCode_NonLocal)",
    },
];

#[test]
fn template_execute_in_place() {
    for case in TEMPLATE_CASES {
        let mut template = parse_template(case.template);
        let mut assignments = if case.bound {
            base_assignments()
        } else {
            Assignments::new()
        };
        let changed = template.execute_in_place(&mut assignments);
        assert_eq!(changed, case.expect_change, "{}", case.template);
        assert_eq!(
            template.to_string(),
            case.expected_display,
            "{}",
            case.template
        );
        assert_eq!(
            template.text.to_string(),
            case.expected_result,
            "{}",
            case.template
        );
    }
}

#[test]
fn template_execute_preserves_the_original() {
    for case in TEMPLATE_CASES {
        let template = parse_template(case.template);
        let mut assignments = if case.bound {
            base_assignments()
        } else {
            Assignments::new()
        };
        let (result, resolved) = template.execute(&mut assignments);
        assert_eq!(template.text.to_string(), case.template, "{}", case.template);
        assert_eq!(result, case.expected_result, "{}", case.template);
        assert_eq!(
            resolved.text.to_string(),
            case.expected_result,
            "{}",
            case.template
        );
    }
}

fn function_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("FuncName", "@Op_@Fmt_@Mod"),
        ("FuncArgs", "(@InArg_@OptArg_@OutArg)"),
        ("FuncRets", "(@OptRet_@OutRet_@ErrRet)"),
        (ROOT_TEMPLATE, "func @FuncName_@FuncArgs @FuncRets {}"),
    ]
}

#[test]
fn multi_template_resolves_function_composition() {
    let templates = parse_templates(function_templates());
    let mut assignments: Assignments = [
        ("Op", "ReCode"),
        ("Fmt", "TORPOR"),
        ("Mod", "NonLocal"),
        ("InArg", "n int, "),
        ("OptArg", ""),
        ("OutArg", "Polo@_o"),
        ("OptRet", "X, "),
        ("OutRet", "@Op_rRet, "),
        ("ErrRet", "Error"),
    ]
    .into_iter()
    .collect();

    let mut resolved = templates.clone();
    assert!(resolved.execute_in_place(&mut assignments));

    assert_eq!(
        resolved.templates[ROOT_TEMPLATE].text.to_string(),
        "func ReCodeTORPORNonLocal(n int, Polo_o) (X, ReCoderRet, Error) {}"
    );
    assert_eq!(
        resolved.templates["FuncName"].text.to_string(),
        "ReCodeTORPORNonLocal"
    );
    assert_eq!(
        resolved.templates["FuncArgs"].text.to_string(),
        "(n int, Polo_o)"
    );
    assert_eq!(
        resolved.templates["FuncRets"].text.to_string(),
        "(X, ReCoderRet, Error)"
    );

    assert_eq!(
        resolved.to_string(),
        concat!(
            ".:\n",
            "\tTemplate:\n",
            "\t\tfunc ReCodeTORPORNonLocal(n int, Polo_o) (X, ReCoderRet, Error) {}\n",
            "\tVariables:\n",
            "\n",
            "FuncArgs:\n",
            "\tTemplate:\n",
            "\t\t(n int, Polo_o)\n",
            "\tVariables:\n",
            "\n",
            "FuncName:\n",
            "\tTemplate:\n",
            "\t\tReCodeTORPORNonLocal\n",
            "\tVariables:\n",
            "\n",
            "FuncRets:\n",
            "\tTemplate:\n",
            "\t\t(X, ReCoderRet, Error)\n",
            "\tVariables:\n",
        )
    );

    // resolved template text is written back under the template names
    assert_eq!(
        assignments.get("FuncName"),
        Some("ReCodeTORPORNonLocal".to_string())
    );
}

#[test]
fn multi_template_resolves_values_that_are_templates() {
    let templates = parse_templates(function_templates());
    let mut assignments: Assignments = [
        ("Op", "Operate|"),
        ("Fmt", "zz"),
        ("Mod", "@B@Fmt__"),
        ("Bzz", "Abort|"),
        ("InArg", "n int, "),
        ("OptArg", "@Mod_@OutRet, "),
        ("OutArg", "Error"),
        ("OptRet", "Out, "),
        ("OutRet", "out@Op__"),
        ("ErrRet", ""),
    ]
    .into_iter()
    .collect();

    let (result, resolved) = templates.execute(&mut assignments);
    assert_eq!(
        result,
        "func Operate|zzAbort|(n int, Abort|outOperate|_, Error) (Out, outOperate|_) {}"
    );
    assert_eq!(
        resolved.templates["FuncName"].text.to_string(),
        "Operate|zzAbort|"
    );
    assert_eq!(
        resolved.templates["FuncArgs"].text.to_string(),
        "(n int, Abort|outOperate|_, Error)"
    );
    assert_eq!(
        resolved.templates["FuncRets"].text.to_string(),
        "(Out, outOperate|_)"
    );

    // the non-destructive form left the originals alone
    assert_eq!(
        templates.templates[ROOT_TEMPLATE].text.to_string(),
        "func @FuncName_@FuncArgs @FuncRets {}"
    );
}

#[test]
fn multi_template_execution_is_idempotent() {
    let mut templates = parse_templates(function_templates());
    let mut assignments: Assignments = [
        ("Op", "ReCode"),
        ("Fmt", "TORPOR"),
        ("Mod", "NonLocal"),
        ("InArg", ""),
        ("OptArg", ""),
        ("OutArg", ""),
        ("OptRet", ""),
        ("OutRet", ""),
        ("ErrRet", ""),
    ]
    .into_iter()
    .collect();

    assert!(templates.execute_in_place(&mut assignments));
    assert!(!templates.execute_in_place(&mut assignments));
}
