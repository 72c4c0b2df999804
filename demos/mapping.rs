//! Mapping between differently shaped records.
//!
//! Run with: cargo run --example mapping

use chrono::NaiveDate;
use recast::{map_to, record, Mapper};
use std::error::Error;

record! {
    #[derive(Debug, Default)]
    struct Customer {
        pub id: u32,
        pub name: String,
        pub email: Option<String>,
        pub joined: Option<NaiveDate>,
        pub vip: bool,
    }
}

record! {
    #[derive(Debug, Default)]
    #[allow(non_snake_case)]
    struct CustomerDto {
        pub Id: u32,
        pub Name: String,
        pub Email: Option<String>,
        pub Joined: Option<String>,
        pub vip: String,
        pub Region: Option<String>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let customer = Customer {
        id: 17,
        name: "Nadia".to_string(),
        email: None,
        joined: NaiveDate::from_ymd_opt(2021, 6, 14),
        vip: true,
    };

    let dto: CustomerDto = map_to(&customer)?;
    println!("{:#?}\n", dto);

    // Which tier resolved each destination attribute
    let mapping = Mapper::new().map_traced::<Customer, CustomerDto>(Some(&customer))?;
    for (attribute, tier) in mapping.resolution.iter() {
        println!("{:<8} <- {}", attribute, tier);
    }
    let unresolved: Vec<_> = recast::describe::<CustomerDto>()
        .names()
        .filter(|name| !mapping.resolution.is_resolved(name))
        .collect();
    println!("unresolved: {:?}", unresolved);

    Ok(())
}
