// tests/scenarios.rs - End-to-end rule scenarios on parsed sources
use sonde_core::analysis::{Dispatcher, RunOutput};
use sonde_core::config::RuleConfig;
use sonde_core::frontend;
use sonde_core::lang::Lang;
use sonde_core::rules;
use sonde_core::semantic::SourceModel;
use sonde_core::types::Finding;

fn run(lang: Lang, source: &str, config: &RuleConfig) -> RunOutput {
    let unit = frontend::load(lang, source, config.max_depth).unwrap();
    assert_eq!(unit.syntax_errors, 0, "fixture must parse cleanly");
    let registry = rules::registry(config);
    Dispatcher::new(&registry)
        .with_limits(config.limits())
        .run(&unit.root, &SourceModel::new(source))
}

fn findings_for<'a>(out: &'a RunOutput, rule: &str) -> Vec<&'a Finding> {
    out.findings.iter().filter(|f| f.rule == rule).collect()
}

#[test]
fn scenario_a_duplicate_operand() {
    let source = "fn f(a: i32) -> i32 { a - a }";
    let out = run(Lang::Rust, source, &RuleConfig::default());
    assert!(out.failures.is_empty());
    assert_eq!(out.findings.len(), 1);

    let finding = &out.findings[0];
    assert_eq!(finding.rule, "duplicate-operand");
    let operator_at = source.find(" - ").unwrap() + 1;
    assert_eq!((finding.span.start, finding.span.end), (operator_at, operator_at + 1));
    assert_eq!(finding.args, vec!["-".to_string()]);
}

#[test]
fn scenario_a_grouping_does_not_hide_duplicates() {
    let out = run(Lang::Python, "ok = (a.b) == a.b\n", &RuleConfig::default());
    assert_eq!(findings_for(&out, "duplicate-operand").len(), 1);

    let out = run(Lang::Python, "ok = f(a) == f(a)\n", &RuleConfig::default());
    assert!(findings_for(&out, "duplicate-operand").is_empty());
}

#[test]
fn scenario_b_pointless_conditional() {
    let source = "const y = c ? x : x;";
    let out = run(Lang::TypeScript, source, &RuleConfig::default());
    let found = findings_for(&out, "pointless-conditional");
    assert_eq!(found.len(), 1);
    let start = source.find("c ?").unwrap();
    assert_eq!((found[0].span.start, found[0].span.end), (start, source.len() - 1));
}

#[test]
fn scenario_c_function_complexity() {
    let config = RuleConfig {
        max_function_complexity: 2,
        ..RuleConfig::default()
    };
    let source = "function f(a, b, c) { return a && b && c ? 1 : 2; }";
    let out = run(Lang::TypeScript, source, &config);
    let found = findings_for(&out, "function-complexity");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].args, vec!["f".to_string(), "3".to_string(), "2".to_string()]);
    assert_eq!(found[0].span.start, 0);
    // the whole expression scores 3, which the default threshold allows
    assert!(findings_for(&out, "expression-complexity").is_empty());
}

#[test]
fn scenario_d_lambda_is_its_own_boundary() {
    let config = RuleConfig {
        max_function_complexity: 0,
        ..RuleConfig::default()
    };
    let source = "function f(a, b, c) { const g = () => a && b; return g() && c ? 1 : 2; }";
    let out = run(Lang::TypeScript, source, &config);
    let scores: Vec<(&str, &str)> = findings_for(&out, "function-complexity")
        .iter()
        .map(|f| (f.args[0].as_str(), f.args[1].as_str()))
        .collect();
    assert_eq!(scores, vec![("f", "2"), ("<lambda>", "1")]);
}

#[test]
fn python_function_complexity_counts_branches() {
    let config = RuleConfig {
        max_function_complexity: 3,
        ..RuleConfig::default()
    };
    let source = "\
def handle(x):
    if x > 1:
        return 1
    elif x < 0:
        return 2
    for i in range(x):
        while i:
            i -= 1
    try:
        pass
    except ValueError:
        pass
    return 0
";
    let out = run(Lang::Python, source, &config);
    let found = findings_for(&out, "function-complexity");
    assert_eq!(found.len(), 1);
    // if, elif, for, while, except
    assert_eq!(found[0].args[..2], ["handle".to_string(), "5".to_string()]);
}

#[test]
fn repeated_condition_in_rust_chain() {
    let source = "fn f(a: i32) -> i32 { if a == 1 { 1 } else if a > 2 { 2 } else if a == 1 { 3 } else { 4 } }";
    let out = run(Lang::Rust, source, &RuleConfig::default());
    let found = findings_for(&out, "duplicate-condition");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].span.start, source.rfind("a == 1").unwrap());
    assert_eq!(found[0].args, vec!["a == 1".to_string()]);
}

#[test]
fn identical_branches_in_typescript() {
    let source = "if (ready) { start(); } else { start(); }";
    let out = run(Lang::TypeScript, source, &RuleConfig::default());
    assert_eq!(findings_for(&out, "identical-branches").len(), 1);

    let source = "if (ready) { start(); } else { stop(); }";
    let out = run(Lang::TypeScript, source, &RuleConfig::default());
    assert!(findings_for(&out, "identical-branches").is_empty());
}

#[test]
fn self_assignment_in_python() {
    let out = run(Lang::Python, "x = x\nself.total = self.total\ny = x\n", &RuleConfig::default());
    let found = findings_for(&out, "self-assignment");
    let names: Vec<&str> = found.iter().map(|f| f.args[0].as_str()).collect();
    assert_eq!(names, vec!["x", "self.total"]);
}

#[test]
fn long_condition_exceeds_expression_threshold() {
    let source = "const ok = a && b || c && d || e;";
    let out = run(Lang::TypeScript, source, &RuleConfig::default());
    let found = findings_for(&out, "expression-complexity");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].args, vec!["4".to_string(), "3".to_string()]);
}

fn expression_findings(lang: Lang, source: &str) -> Vec<(usize, Vec<String>)> {
    let out = run(lang, source, &RuleConfig::default());
    findings_for(&out, "expression-complexity")
        .into_iter()
        .map(|f| (f.span.start, f.args.clone()))
        .collect()
}

fn over_threshold() -> Vec<String> {
    vec!["4".to_string(), "3".to_string()]
}

#[test]
fn keyword_argument_is_counted_once() {
    let found = expression_findings(Lang::Python, "f(x=a and b and c and d and e)\n");
    assert_eq!(found, vec![(0, over_threshold())]);
}

#[test]
fn nested_call_argument_is_counted_once() {
    let found = expression_findings(Lang::Python, "print(f(a or b or c or d or e))\n");
    assert_eq!(found, vec![(0, over_threshold())]);

    let found = expression_findings(Lang::TypeScript, "f(a && b && c && d && e);");
    assert_eq!(found, vec![(0, over_threshold())]);
}

#[test]
fn object_property_is_counted_once() {
    let source = "const o = { k: a && b && c && d && e };";
    let found = expression_findings(Lang::TypeScript, source);
    assert_eq!(found, vec![(source.find('{').unwrap(), over_threshold())]);
}

#[test]
fn constructor_argument_is_scored() {
    let source = "const o = new Foo(a && b && c && d && e);";
    let found = expression_findings(Lang::TypeScript, source);
    assert_eq!(found, vec![(source.find("new").unwrap(), over_threshold())]);
}

#[test]
fn wildcard_match_arm_does_not_count() {
    let config = RuleConfig {
        max_function_complexity: 0,
        ..RuleConfig::default()
    };
    let source = "fn f(x: i32) -> i32 { match x { 1 => 1, _ => 2 } }";
    let out = run(Lang::Rust, source, &config);
    let found = findings_for(&out, "function-complexity");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].args, vec!["f".to_string(), "1".to_string(), "0".to_string()]);
}
