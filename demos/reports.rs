//! Rendering one record set as CSV, JSON and XML.
//!
//! Run with: cargo run --example reports

use recast::{
    record, to_csv, to_json, to_xml_with_options, CsvEncoder, CsvOptions, Delimiter, XmlOptions,
};
use std::error::Error;

record! {
    #[derive(Debug, Clone, Default)]
    struct Sale {
        pub region: String,
        pub product: String,
        pub units: u32,
        pub revenue: f64,
        pub note: Option<String>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let sales = vec![
        Some(Sale {
            region: "North".to_string(),
            product: "Widget, large".to_string(),
            units: 120,
            revenue: 2399.5,
            note: None,
        }),
        None,
        Some(Sale {
            region: "South".to_string(),
            product: "Gadget".to_string(),
            units: 8,
            revenue: 159.92,
            note: Some("backorder <2 weeks> & rising".to_string()),
        }),
    ];

    println!("CSV:");
    for line in to_csv(sales.clone(), true) {
        println!("{}", line?);
    }

    // Tab-separated, no header
    println!("\nTSV:");
    let tsv = CsvEncoder::new(
        CsvOptions::new()
            .with_delimiter(Delimiter::Tab)
            .without_header(),
    );
    for line in tsv.lines(sales.clone()) {
        println!("{}", line?);
    }

    println!("\nJSON:\n{}", to_json(&sales)?);

    let options = XmlOptions::new()
        .with_root_name("sales")
        .with_item_name("sale");
    println!("\nXML:\n{}", to_xml_with_options(sales, options)?);

    Ok(())
}
