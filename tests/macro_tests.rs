use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use num_bigint::BigInt;
use recast::{
    describe, map_to, record, to_csv, to_json, to_xml_with_options, Field, Record, RecordMut,
    TypeTag, Value, XmlOptions,
};

mod model {
    recast::record! {
        /// A catalogue item.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct Item {
            /// Stock keeping unit.
            pub sku: String,
            pub price: f64,
            pub stocked: bool,
            pub(crate) margin: f64,
        }
    }
}

use model::Item;

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Everything {
        pub small: i8,
        pub wide: i64,
        pub unsigned: u64,
        pub size: usize,
        pub ratio: f32,
        pub letter: char,
        pub text: String,
        pub maybe: Option<i32>,
        pub big: BigInt,
        pub day: NaiveDate,
        pub at: Option<DateTime<Utc>>,
        pub trailing: bool,
    }
}

record! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Shelf {
        pub label: String,
        pub item: Item,
    }
}

#[test]
fn test_shape_follows_declaration_order() {
    let names: Vec<_> = describe::<Everything>().names().collect();
    assert_eq!(
        names,
        [
            "small", "wide", "unsigned", "size", "ratio", "letter", "text", "maybe", "big", "day",
            "at", "trailing"
        ]
    );
}

#[test]
fn test_type_tags() {
    let shape = describe::<Everything>();
    let tag = |name: &str| shape.get(name).map(|a| a.type_tag());

    assert_eq!(tag("small"), Some(TypeTag::Primitive));
    assert_eq!(tag("ratio"), Some(TypeTag::Primitive));
    assert_eq!(tag("letter"), Some(TypeTag::Primitive));
    assert_eq!(tag("text"), Some(TypeTag::String));
    assert_eq!(tag("maybe"), Some(TypeTag::Primitive));
    assert_eq!(tag("big"), Some(TypeTag::Primitive));
    assert_eq!(tag("day"), Some(TypeTag::Other));
    assert_eq!(tag("trailing"), Some(TypeTag::Boolean));
    assert_eq!(<Item as Field>::TYPE_TAG, TypeTag::Other);
}

#[test]
fn test_every_attribute_is_readable_and_writable() {
    let shape = describe::<Everything>();
    assert_eq!(shape.readable().count(), shape.len());
    assert_eq!(shape.writable().count(), shape.len());
}

#[test]
fn test_identity_mapping_of_all_field_kinds() {
    let original = Everything {
        small: -8,
        wide: i64::MIN,
        unsigned: u64::MAX,
        size: 42,
        ratio: 0.25,
        letter: 'ß',
        text: "text".into(),
        maybe: Some(3),
        big: BigInt::from(-7),
        day: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap_or_default(),
        at: Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).single(),
        trailing: true,
    };
    let copy: Everything = map_to(&original).unwrap();
    assert_eq!(copy, original);
}

#[test]
fn test_module_visibility_and_docs() {
    let item = Item { sku: "A-1".into(), price: 2.5, stocked: true, margin: 0.4 };
    assert_eq!(item.read("price").unwrap(), Value::from(2.5));
    assert!(item.read("margin").is_err());
    assert_eq!(describe::<Item>().type_name(), "Item");
    assert_eq!(describe::<Item>().names().collect::<Vec<_>>(), ["sku", "price", "stocked"]);
}

#[test]
fn test_nested_record_mapping_and_encoding() {
    let shelf = Shelf {
        label: "top".into(),
        item: Item { sku: "B-2".into(), price: 1.0, stocked: false, margin: 0.5 },
    };

    let copy: Shelf = map_to(&shelf).unwrap();
    assert_eq!(copy.label, "top");
    assert_eq!(copy.item.sku, "B-2");
    assert_eq!(copy.item.margin, 0.0);

    assert_eq!(
        to_json([&shelf]).unwrap(),
        r#"[{"label":"top","item":{"sku":"B-2","price":1,"stocked":false}}]"#
    );
}

record! {
    #[derive(Debug, Clone, Default)]
    pub struct Account {
        pub login: String,
        password_hash: String,
        pub r#type: String,
    }
}

record! {
    #[derive(Debug, Default)]
    #[allow(non_snake_case)]
    struct AccountView {
        pub login: String,
        pub password_hash: String,
        pub TYPE: String,
    }
}

fn account() -> Account {
    Account {
        login: "a".into(),
        password_hash: "s3cret".into(),
        r#type: "t".into(),
    }
}

#[test]
fn test_only_pub_fields_are_attributes() {
    assert_eq!(describe::<Account>().names().collect::<Vec<_>>(), ["login", "type"]);

    let account = account();
    assert!(account.read("password_hash").is_err());
    assert_eq!(account.read("type").unwrap(), Value::from("t"));
    assert!(account.read("r#type").is_err());
}

#[test]
fn test_private_field_never_encoded() {
    let accounts = [account()];

    let lines = to_csv(&accounts, true).collect::<recast::Result<Vec<_>>>().unwrap();
    assert_eq!(lines, ["login,type", "a,t"]);

    assert_eq!(to_json(&accounts).unwrap(), r#"[{"login":"a","type":"t"}]"#);

    let xml = to_xml_with_options(&accounts, XmlOptions::compact()).unwrap();
    assert_eq!(xml, "<root><Account><login>a</login><type>t</type></Account></root>");
}

#[test]
fn test_private_field_never_mapped() {
    let view: AccountView = map_to(&account()).unwrap();
    assert_eq!(view.login, "a");
    assert_eq!(view.password_hash, "");
    assert_eq!(view.TYPE, "t");

    let source = AccountView {
        login: "b".into(),
        password_hash: "leak".into(),
        TYPE: "u".into(),
    };
    let mapped: Account = map_to(&source).unwrap();
    assert_eq!(mapped.login, "b");
    assert_eq!(mapped.password_hash, "");
    assert_eq!(mapped.r#type, "u");

    let mut blank = Account::construct().unwrap();
    assert!(blank.write("password_hash", Value::from("x")).is_err());
    blank.write("type", Value::from("w")).unwrap();
    assert_eq!(blank.r#type, "w");
}

#[test]
fn test_writes_convert_values() {
    let mut everything = Everything::construct().unwrap();
    everything.write("wide", Value::from(5)).unwrap();
    everything.write("maybe", Value::Null).unwrap();
    everything.write("text", Value::from("hello")).unwrap();
    everything.write("letter", Value::from("x")).unwrap();

    assert_eq!(everything.wide, 5);
    assert_eq!(everything.maybe, None);
    assert_eq!(everything.text, "hello");
    assert_eq!(everything.letter, 'x');
    assert!(everything.write("trailing", Value::from("yes")).is_err());
    assert!(everything.write("missing", Value::Null).is_err());
}
