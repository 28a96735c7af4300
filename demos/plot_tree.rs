//! Parse an output descriptor and print the two text tables the plot UI
//! consumes.
//!
//! Run with: `cargo run --example plot_tree`

use luatab::output_from_str;

fn main() {
    let descriptor = r#"
    -- files produced by the last run
    outputFiles={
        reactor={
            filename="reactor.dat",
            x={time={unit="s",col=1}},
            y={
                volume={col=2,unit="m^3"},
                mass={col=3,unit="kg"},
            },
        },
        gas={
            filename="gas.dat",
            x={hour={unit="h",col=3}},
            y={
                methane={col=5,unit="%"},
            },
        },
    }
    "#;

    let doc = output_from_str(descriptor).expect("descriptor parses");

    println!("tree ({} entries):\n{}\n", doc.len(), doc.tree_text());
    println!("values:\n{}", doc.values_text());
}
