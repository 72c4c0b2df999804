/// Declares a struct together with its compile-time attribute table.
///
/// The generated code implements [`Record`](crate::Record),
/// [`RecordMut`](crate::RecordMut), [`ToValue`](crate::ToValue) and
/// [`Field`](crate::Field) for the struct, so it can be mapped, encoded, and nested
/// inside other records. Attributes are the `pub` fields, in declaration order, named
/// like the fields with any `r#` prefix removed. Fields with any other visibility,
/// `pub(crate)` included, stay ordinary fields. The shape is built once and cached for
/// the lifetime of the process.
///
/// The struct must implement `Default`; that is its zero-argument construction path.
/// Every `pub` field type must implement [`Field`](crate::Field).
///
/// # Examples
///
/// ```rust
/// use recast::{describe, record, Record, Value};
///
/// record! {
///     #[derive(Debug, Clone, Default, PartialEq)]
///     pub struct Product {
///         pub sku: String,
///         pub price: f64,
///         pub r#type: String,
///         cost: f64,
///     }
/// }
///
/// let product = Product { sku: "A-1".into(), price: 9.5, r#type: "tool".into(), cost: 4.0 };
/// assert_eq!(describe::<Product>().names().collect::<Vec<_>>(), ["sku", "price", "type"]);
/// assert_eq!(product.read("type").unwrap(), Value::from("tool"));
/// assert!(product.read("cost").is_err());
/// ```
#[macro_export]
macro_rules! record {
    // All fields consumed: emit the impls for the collected `pub` fields.
    (@collect $name:ident [$( ($field:ident : $ty:ty) )*]) => {
        impl $crate::Record for $name {
            fn shape() -> &'static $crate::Shape {
                static SHAPE: ::std::sync::OnceLock<$crate::Shape> = ::std::sync::OnceLock::new();
                SHAPE.get_or_init(|| {
                    let attributes: ::std::vec::Vec<$crate::AttributeDescriptor> = ::std::vec![
                        $(
                            $crate::AttributeDescriptor::of::<$ty>(
                                $crate::shape::field_name(::std::stringify!($field)),
                            )
                        ),*
                    ];
                    $crate::Shape::new(::std::stringify!($name), attributes)
                })
            }

            fn read(&self, name: &str) -> $crate::Result<$crate::Value> {
                $(
                    if name == $crate::shape::field_name(::std::stringify!($field)) {
                        return $crate::ToValue::to_value(&self.$field);
                    }
                )*
                ::std::result::Result::Err($crate::Error::unknown_attribute(
                    ::std::stringify!($name),
                    name,
                ))
            }
        }

        impl $crate::RecordMut for $name {
            fn construct() -> $crate::Result<Self> {
                ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
            }

            #[allow(unused_variables)]
            fn write(&mut self, name: &str, value: $crate::Value) -> $crate::Result<()> {
                $(
                    if name == $crate::shape::field_name(::std::stringify!($field)) {
                        self.$field = <$ty as $crate::Field>::from_value(value)?;
                        return ::std::result::Result::Ok(());
                    }
                )*
                ::std::result::Result::Err($crate::Error::unknown_attribute(
                    ::std::stringify!($name),
                    name,
                ))
            }
        }

        impl $crate::ToValue for $name {
            fn to_value(&self) -> $crate::Result<$crate::Value> {
                $crate::RecordValue::capture(self).map($crate::Value::Record)
            }
        }

        impl $crate::Field for $name {
            const TYPE_TAG: $crate::TypeTag = $crate::TypeTag::Other;

            fn from_value(value: $crate::Value) -> $crate::Result<Self> {
                match value {
                    $crate::Value::Record(captured) => captured.rebuild(),
                    other => ::std::result::Result::Err($crate::Error::type_mismatch(
                        ::std::stringify!($name),
                        other.kind(),
                    )),
                }
            }
        }
    };

    // A `pub` field becomes an attribute.
    (@collect $name:ident [$($attrs:tt)*]
        $(#[$field_meta:meta])*
        pub $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@collect $name [$($attrs)* ($field : $ty)] $($($rest)*)?);
    };

    // Any other visibility is skipped.
    (@collect $name:ident [$($attrs:tt)*]
        $(#[$field_meta:meta])*
        $field_vis:vis $field:ident : $ty:ty
        $(, $($rest:tt)*)?
    ) => {
        $crate::record!(@collect $name [$($attrs)*] $($($rest)*)?);
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($body)*
        }

        $crate::record!(@collect $name [] $($body)*);
    };
}
