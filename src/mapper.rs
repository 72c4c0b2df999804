//! Tiered record mapping.
//!
//! [`Mapper`] copies attribute values from a source record into a freshly constructed
//! destination record. Matching runs as an ordered chain of [`Tier`]s; the default
//! chain is:
//!
//! 1. [`ExactTier`]: same name (case-sensitive) and same declared type, copied verbatim
//! 2. [`CaseInsensitiveTier`]: same name ignoring case and same declared type
//! 3. [`SameNameTextTier`]: string destinations only; same name, any source type,
//!    assigned the source value's text conversion
//! 4. [`CaseInsensitiveTextTier`]: as tier 3 with case-insensitive names
//!
//! Each destination attribute is resolved at most once. The [`Resolution`] set records
//! which tier resolved it, and later tiers skip it even when the copied value equals
//! the attribute's default. When several source attributes satisfy a tier, the first
//! one in the source shape's declaration order wins.
//!
//! ## Examples
//!
//! ```rust
//! use recast::{map_to, record};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct Order {
//!         pub Id: i32,
//!         pub Customer: String,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     #[allow(non_snake_case)]
//!     pub struct OrderRow {
//!         pub Id: Option<String>,
//!         pub customer: String,
//!     }
//! }
//!
//! let row: OrderRow = map_to(&Order { Id: 5, Customer: "Acme".into() }).unwrap();
//! assert_eq!(row.Id.as_deref(), Some("5"));
//! assert_eq!(row.customer, "Acme");
//! ```

use crate::{AttributeDescriptor, Error, Record, RecordMut, Result, Shape, TypeTag, Value};
use indexmap::IndexMap;
use std::fmt;

/// One phase of the mapping algorithm.
///
/// A tier decides which destination attributes it handles, which source attribute
/// feeds each of them, and how the source value is converted.
pub trait Tier: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this tier ever handles `dest`.
    fn accepts(&self, _dest: &AttributeDescriptor) -> bool {
        true
    }

    /// Picks the source attribute that feeds `dest`.
    fn select<'s>(
        &self,
        dest: &AttributeDescriptor,
        source: &'s Shape,
    ) -> Option<&'s AttributeDescriptor>;

    /// Converts the source value. `None` leaves the destination unresolved.
    fn convert(&self, value: Value) -> Option<Value> {
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTier;

impl Tier for ExactTier {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn select<'s>(
        &self,
        dest: &AttributeDescriptor,
        source: &'s Shape,
    ) -> Option<&'s AttributeDescriptor> {
        source.get(dest.name()).filter(|s| s.same_type(dest))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveTier;

impl Tier for CaseInsensitiveTier {
    fn name(&self) -> &'static str {
        "case-insensitive"
    }

    fn select<'s>(
        &self,
        dest: &AttributeDescriptor,
        source: &'s Shape,
    ) -> Option<&'s AttributeDescriptor> {
        source
            .attributes()
            .find(|s| s.name_eq_ignore_case(dest.name()) && s.same_type(dest))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SameNameTextTier;

impl Tier for SameNameTextTier {
    fn name(&self) -> &'static str {
        "same-name-text"
    }

    fn accepts(&self, dest: &AttributeDescriptor) -> bool {
        dest.type_tag() == TypeTag::String
    }

    fn select<'s>(
        &self,
        dest: &AttributeDescriptor,
        source: &'s Shape,
    ) -> Option<&'s AttributeDescriptor> {
        source.get(dest.name())
    }

    fn convert(&self, value: Value) -> Option<Value> {
        value.to_text().map(Value::String)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveTextTier;

impl Tier for CaseInsensitiveTextTier {
    fn name(&self) -> &'static str {
        "case-insensitive-text"
    }

    fn accepts(&self, dest: &AttributeDescriptor) -> bool {
        dest.type_tag() == TypeTag::String
    }

    fn select<'s>(
        &self,
        dest: &AttributeDescriptor,
        source: &'s Shape,
    ) -> Option<&'s AttributeDescriptor> {
        source
            .attributes()
            .find(|s| s.name_eq_ignore_case(dest.name()))
    }

    fn convert(&self, value: Value) -> Option<Value> {
        value.to_text().map(Value::String)
    }
}

/// Destination attributes already assigned, with the tier that assigned each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    resolved: IndexMap<&'static str, &'static str>,
}

impl Resolution {
    #[must_use]
    pub fn is_resolved(&self, attribute: &str) -> bool {
        self.resolved.contains_key(attribute)
    }

    /// Name of the tier that resolved `attribute`.
    #[must_use]
    pub fn tier_of(&self, attribute: &str) -> Option<&'static str> {
        self.resolved.get(attribute).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// `(attribute, tier)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.resolved.iter().map(|(a, t)| (*a, *t))
    }

    fn insert(&mut self, attribute: &'static str, tier: &'static str) {
        self.resolved.insert(attribute, tier);
    }
}

/// A mapped destination record and how each attribute was resolved.
#[derive(Debug, Clone)]
pub struct Mapping<D> {
    pub value: D,
    pub resolution: Resolution,
}

/// An ordered chain of tiers.
#[derive(Debug)]
pub struct Mapper {
    tiers: Vec<Box<dyn Tier>>,
}

impl Default for Mapper {
    fn default() -> Self {
        Mapper {
            tiers: vec![
                Box::new(ExactTier),
                Box::new(CaseInsensitiveTier),
                Box::new(SameNameTextTier),
                Box::new(CaseInsensitiveTextTier),
            ],
        }
    }
}

impl Mapper {
    /// The standard four-tier chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapper running exactly `tiers`, in order.
    #[must_use]
    pub fn with_tiers(tiers: Vec<Box<dyn Tier>>) -> Self {
        Mapper { tiers }
    }

    pub fn tiers(&self) -> impl Iterator<Item = &dyn Tier> + '_ {
        self.tiers.iter().map(|t| t.as_ref())
    }

    /// Maps `source` into a new `D`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] when `source` is `None`
    /// - [`Error::Construction`] when `D` cannot be constructed; no tier runs
    /// - accessor and mutator failures, unchanged
    pub fn map<S: Record, D: RecordMut>(&self, source: Option<&S>) -> Result<D> {
        self.map_traced(source).map(|mapping| mapping.value)
    }

    /// Like [`Mapper::map`], also returning the [`Resolution`] set.
    ///
    /// # Errors
    ///
    /// See [`Mapper::map`].
    pub fn map_traced<S: Record, D: RecordMut>(&self, source: Option<&S>) -> Result<Mapping<D>> {
        let source =
            source.ok_or_else(|| Error::invalid_argument("source", "source record cannot be absent"))?;
        let mut dest = D::construct()?;

        let source_shape = S::shape();
        let dest_shape = D::shape();
        tracing::debug!(
            source = source_shape.type_name(),
            dest = dest_shape.type_name(),
            "mapping record"
        );

        let mut resolution = Resolution::default();
        for tier in &self.tiers {
            run_tier(tier.as_ref(), source, source_shape, &mut dest, dest_shape, &mut resolution)?;
        }

        tracing::debug!(
            source = source_shape.type_name(),
            dest = dest_shape.type_name(),
            resolved = resolution.len(),
            "mapped record"
        );
        Ok(Mapping {
            value: dest,
            resolution,
        })
    }
}

fn run_tier<S: Record, D: RecordMut>(
    tier: &dyn Tier,
    source: &S,
    source_shape: &Shape,
    dest: &mut D,
    dest_shape: &Shape,
    resolution: &mut Resolution,
) -> Result<()> {
    for attribute in dest_shape.writable() {
        if resolution.is_resolved(attribute.name()) || !tier.accepts(attribute) {
            continue;
        }
        let Some(matched) = tier.select(attribute, source_shape) else {
            continue;
        };
        if !matched.can_read() {
            continue;
        }
        let Some(value) = tier.convert(source.read(matched.name())?) else {
            continue;
        };
        dest.write(attribute.name(), value)?;
        resolution.insert(attribute.name(), tier.name());
        tracing::trace!(
            tier = tier.name(),
            from = matched.name(),
            to = attribute.name(),
            "resolved attribute"
        );
    }
    Ok(())
}
