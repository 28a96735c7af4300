//! Parse a vali schema, apply a spec document, validate it and write the
//! round-tripped table literal.
//!
//! Run with: `cargo run --example validate`

use luatab::schema_from_str;

fn main() {
    let vali = r#"
    fermenter={
        volume={type="Double",default=1.0,range={0.5,2.5}},
        stirred={type="Boolean",default="true"},
        solver={type="String",default="LU"},
    }
    "#;

    let spec = r#"
    fermenter={
        volume=9.0,
        stirred=maybe,
        solver="ILU",
    }
    "#;

    let mut doc = schema_from_str(vali).expect("vali parses");
    doc.load_spec_str(spec).expect("spec aligns");

    println!("schema tree:\n{}\n", doc.display_text());

    let report = doc.validate_lines(&doc.spec_text()).expect("aligned");
    if report.is_valid() {
        let text = doc.write_lines(&doc.spec_text()).expect("validated");
        println!("serialized:\n{}", text);
    } else {
        println!("validation failed:\n{}", report.message());
        println!("offending entries: {:?}", report.indices());
    }

    // Fix the values and serialize.
    let fixed = ["", "2.0", "false", "\"ILU\""];
    let text = doc.write_values(&fixed).expect("valid values");
    println!("serialized after fixing:\n{}", text);
}
