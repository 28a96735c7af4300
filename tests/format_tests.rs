//! Regression tests pinned to observed behavior of the dialect: the
//! timetable header slot, inheritance, column 0-basing and the exact
//! validator verdicts for the canonical worked examples.

use luatab::{output_from_str, schema_from_str};

#[test]
fn test_integer_range_verdicts() {
    let doc = schema_from_str(r#"p={n={type="Integer",default=5,range={1,10}}}"#).unwrap();

    // out of range: exactly one Range ERROR
    let report = doc.validate_values(&["", "15"]).unwrap();
    assert_eq!(report.violations().len(), 1);
    assert_eq!(report.message(), "Range ERROR: n should be in Range {1,10}\n");

    // mistyped: exactly one Type ERROR
    let report = doc.validate_values(&["", "\"x\""]).unwrap();
    assert_eq!(report.violations().len(), 1);
    assert_eq!(
        report.message(),
        "Type ERROR: \"n\" should be of type Integer\n"
    );

    // in range: valid
    let report = doc.validate_values(&["", "7"]).unwrap();
    assert!(report.is_valid());
}

#[test]
fn test_x_axis_metadata_and_zero_basing() {
    let doc = output_from_str(
        r#"
        outputFiles={
            f1={
                filename="f1.dat",
                x={alpha={unit="s",col=3}},
                col=5,
            },
            f2={
                filename="f2.dat",
                x={beta={unit="h",col=7}},
                col=9,
            },
        }
        "#,
    )
    .unwrap();

    let f1 = &doc.entries()[0];
    assert_eq!(f1.filename, "f1.dat");
    assert_eq!(f1.col, Some(4));
    assert_eq!(f1.x_col, Some(2));
    assert_eq!(f1.x_name, "alpha");
    assert_eq!(f1.x_unit, "s");

    let f2 = &doc.entries()[1];
    assert_eq!(f2.col, Some(8));
    assert_eq!(f2.x_col, Some(6));
    assert_eq!(f2.x_name, "beta");
}

#[test]
fn test_timetable_expands_to_declared_plus_one() {
    let doc = schema_from_str(
        r#"p={t={type="Double",default=0.0,timeTableContent={numberEntries=2}}}"#,
    )
    .unwrap();
    let slots = doc
        .entries()
        .iter()
        .filter(|e| e.is_timetable_slot())
        .count();
    assert_eq!(slots, 3);
}

#[test]
fn test_array_elements_inherit_type_and_braced_default() {
    let doc = schema_from_str(
        r#"p={arr={type="String[]",default={"x","y"},tableContent={values={"a","b"}}}}"#,
    )
    .unwrap();

    let children: Vec<_> = doc
        .entries()
        .iter()
        .filter(|e| e.has_quoted_label())
        .collect();
    assert_eq!(children.len(), 2);
    for child in children {
        assert_eq!(child.ty, "String[]");
        assert_eq!(child.default, "{\"x\",\"y\"}");
    }
}

#[test]
fn test_inherited_type_is_never_overwritten() {
    // The quoted table carries its own type= clause, but the inherited
    // declaration got there first and wins.
    let doc = schema_from_str(
        r#"p={a={type="String[]",default="d"},"q"={type="Integer"}}"#,
    )
    .unwrap();
    let q = doc
        .entries()
        .iter()
        .find(|e| e.label == "\"q\"")
        .unwrap();
    assert_eq!(q.ty, "String[]");
    assert_eq!(q.default, "d");
}

#[test]
fn test_display_text_format() {
    let doc = schema_from_str(
        r#"p={n={type="Integer",default=5,range={1,10}},s={type="String",default="LU"}}"#,
    )
    .unwrap();
    assert_eq!(
        doc.display_text(),
        "0 15 p  \n1 0 n Integer 5\n1 0 s String LU"
    );
}

#[test]
fn test_tree_and_values_text_have_no_trailing_newline() {
    let doc = output_from_str(
        r#"outputFiles={f={filename="f.dat",x={t={unit="s",col=1}},y={v={col=2,unit="K"}}}}"#,
    )
    .unwrap();
    assert!(!doc.tree_text().ends_with('\n'));
    assert!(!doc.values_text().ends_with('\n'));

    let schema = schema_from_str(r#"p={v={type="Integer",default=1}}"#).unwrap();
    assert!(!schema.display_text().ends_with('\n'));
    assert!(schema.defaults_text().ends_with('\n'));
    assert!(schema.spec_text().ends_with('\n'));
}

#[test]
fn test_defaults_text_order() {
    let doc = schema_from_str(
        r#"p={a={type="Integer",default=1},b={type="Integer",default=2}}"#,
    )
    .unwrap();
    assert_eq!(doc.defaults_text(), "\n1\n2\n");
}

#[test]
fn test_comment_and_whitespace_stripping() {
    let doc = schema_from_str(
        "-- header comment\np = {\n\tv = { type = \"Integer\", default = 1 }, -- trailing\n}\n",
    )
    .unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.entries()[1].label, "v");
}
