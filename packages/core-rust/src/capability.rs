//! Name-keyed capability descriptors and the sets they are collected into.
//!
//! A [`Capability`] is identified by its name alone: two tokens built
//! independently from the same name are interchangeable, so collaborating
//! modules can mint their own tokens without a shared registry. The built-in
//! tokens live in a small bitset inside [`CapabilitySet`]; custom tokens fall
//! back to an ordered set keyed by name.
//!
//! # Cursor profiles
//!
//! Cursor capability sets must satisfy direction symmetry: `NEXT` requires
//! `START`, `PREVIOUS` requires `END`, and at least one of `NEXT`/`PREVIOUS`
//! must be present. [`CapabilitySet::for_cursor`] enforces this, and the
//! predefined [`FORWARD`], [`BACKWARD`] and [`BIDIRECTIONAL`] profiles satisfy
//! it by construction.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Validation faults raised while building capability tokens or sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    #[error("capability name must not be empty")]
    EmptyName,
    #[error("cursor advertises `next` without `start`")]
    NextWithoutStart,
    #[error("cursor advertises `previous` without `end`")]
    PreviousWithoutEnd,
    #[error("cursor advertises neither `next` nor `previous`")]
    NoDirection,
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Immutable, name-keyed capability token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capability {
    name: Cow<'static, str>,
}

/// Names of the built-in tokens, indexed by their bit position.
const BUILTIN_NAMES: [&str; 10] = [
    "start",
    "previous",
    "next",
    "end",
    "before",
    "remove",
    "bounded",
    "distinct",
    "sorted",
    "absent-elements",
];

const START_BIT: u16 = 1 << 0;
const PREVIOUS_BIT: u16 = 1 << 1;
const NEXT_BIT: u16 = 1 << 2;
const END_BIT: u16 = 1 << 3;
const BEFORE_BIT: u16 = 1 << 4;

impl Capability {
    /// Cursor can jump to the first element.
    pub const START: Self = Self::builtin(0);
    /// Cursor can step towards the first element.
    pub const PREVIOUS: Self = Self::builtin(1);
    /// Cursor can step towards the last element.
    pub const NEXT: Self = Self::builtin(2);
    /// Cursor can jump to the last element.
    pub const END: Self = Self::builtin(3);
    /// Cursor can answer whether an element precedes its position.
    /// Distinct from [`Capability::END`]; the two are unrelated.
    pub const BEFORE: Self = Self::builtin(4);
    /// Elements can be removed.
    pub const REMOVE: Self = Self::builtin(5);
    /// Container has a fixed upper bound on its size.
    pub const BOUNDED: Self = Self::builtin(6);
    /// Container never holds two equal elements.
    pub const DISTINCT: Self = Self::builtin(7);
    /// Traversal order follows the element ordering.
    pub const SORTED: Self = Self::builtin(8);
    /// Container accepts absent (`None`) elements.
    pub const ABSENT_ELEMENTS: Self = Self::builtin(9);

    const fn builtin(bit: usize) -> Self {
        Self {
            name: Cow::Borrowed(BUILTIN_NAMES[bit]),
        }
    }

    /// Mints a capability token from a name.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::EmptyName`] if `name` is empty or only
    /// whitespace.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Result<Self, CapabilityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CapabilityError::EmptyName);
        }
        Ok(Self { name })
    }

    /// The name this token is keyed by.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn builtin_bit(&self) -> Option<u16> {
        BUILTIN_NAMES
            .iter()
            .position(|candidate| *candidate == self.name)
            .map(|index| 1 << index)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// CapabilitySet
// ---------------------------------------------------------------------------

/// Order-irrelevant set of capability tokens.
///
/// Membership checks for built-in tokens are a single mask test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CapabilitySet {
    bits: u16,
    custom: BTreeSet<Capability>,
}

/// Forward-only cursor profile: `start` + `next`.
pub static FORWARD: CapabilitySet = CapabilitySet::from_bits(START_BIT | NEXT_BIT);

/// Backward-only cursor profile: `end` + `previous` + `before`.
pub static BACKWARD: CapabilitySet =
    CapabilitySet::from_bits(END_BIT | PREVIOUS_BIT | BEFORE_BIT);

/// Bidirectional cursor profile: all four directions plus `before`.
pub static BIDIRECTIONAL: CapabilitySet =
    CapabilitySet::from_bits(START_BIT | PREVIOUS_BIT | NEXT_BIT | END_BIT | BEFORE_BIT);

impl CapabilitySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    const fn from_bits(bits: u16) -> Self {
        Self {
            bits,
            custom: BTreeSet::new(),
        }
    }

    /// Builds a cursor capability set, validating direction symmetry.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] naming the first violated rule.
    pub fn for_cursor<I>(capabilities: I) -> Result<Self, CapabilityError>
    where
        I: IntoIterator<Item = Capability>,
    {
        let set: Self = capabilities.into_iter().collect();
        set.validate_cursor()?;
        Ok(set)
    }

    /// Checks the direction-symmetry rules a cursor set must satisfy.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] naming the first violated rule.
    pub fn validate_cursor(&self) -> Result<(), CapabilityError> {
        let has = |bit: u16| self.bits & bit != 0;
        if has(NEXT_BIT) && !has(START_BIT) {
            return Err(CapabilityError::NextWithoutStart);
        }
        if has(PREVIOUS_BIT) && !has(END_BIT) {
            return Err(CapabilityError::PreviousWithoutEnd);
        }
        if !has(NEXT_BIT) && !has(PREVIOUS_BIT) {
            return Err(CapabilityError::NoDirection);
        }
        Ok(())
    }

    /// Returns `true` if the set holds a token with the same name.
    #[must_use]
    pub fn contains(&self, capability: &Capability) -> bool {
        match capability.builtin_bit() {
            Some(bit) => self.bits & bit != 0,
            None => self.custom.contains(capability),
        }
    }

    /// Adds a token. Returns `true` if it was not already present.
    pub fn insert(&mut self, capability: Capability) -> bool {
        match capability.builtin_bit() {
            Some(bit) => {
                let fresh = self.bits & bit == 0;
                self.bits |= bit;
                fresh
            }
            None => self.custom.insert(capability),
        }
    }

    /// Removes a token. Returns `true` if it was present.
    pub fn remove(&mut self, capability: &Capability) -> bool {
        match capability.builtin_bit() {
            Some(bit) => {
                let present = self.bits & bit != 0;
                self.bits &= !bit;
                present
            }
            None => self.custom.remove(capability),
        }
    }

    /// Builder-style [`insert`](CapabilitySet::insert).
    #[must_use]
    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bits: self.bits | other.bits,
            custom: self.custom.union(&other.custom).cloned().collect(),
        }
    }

    /// Number of tokens in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize + self.custom.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0 && self.custom.is_empty()
    }

    /// Iterates built-in tokens first (in bit order), then custom tokens by name.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        (0..BUILTIN_NAMES.len())
            .filter(move |&bit| self.bits & (1_u16 << bit) != 0)
            .map(Capability::builtin)
            .chain(self.custom.iter().cloned())
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<Capability> for CapabilitySet {
    fn extend<I: IntoIterator<Item = Capability>>(&mut self, iter: I) {
        for capability in iter {
            self.insert(capability);
        }
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, capability) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{capability}")?;
        }
        f.write_str("}")
    }
}

/// `hasFeature`: free-function form of [`CapabilitySet::contains`].
#[must_use]
pub fn has_feature(set: &CapabilitySet, capability: &Capability) -> bool {
    set.contains(capability)
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Capability, CapabilitySet};

    impl Serialize for Capability {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for Capability {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let name = String::deserialize(deserializer)?;
            Capability::new(name).map_err(D::Error::custom)
        }
    }

    impl Serialize for CapabilitySet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de> Deserialize<'de> for CapabilitySet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let names = Vec::<Capability>::deserialize(deserializer)?;
            Ok(names.into_iter().collect())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Capability ----

    #[test]
    fn tokens_compare_by_name() {
        let minted = Capability::new("next").unwrap();
        assert_eq!(minted, Capability::NEXT);

        let owned = Capability::new(String::from("checksum")).unwrap();
        let borrowed = Capability::new("checksum").unwrap();
        assert_eq!(owned, borrowed);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(Capability::new(""), Err(CapabilityError::EmptyName));
        assert_eq!(Capability::new("  \t"), Err(CapabilityError::EmptyName));
    }

    #[test]
    fn before_and_end_are_distinct() {
        assert_ne!(Capability::BEFORE, Capability::END);
        let set = CapabilitySet::empty().with(Capability::END);
        assert!(!set.contains(&Capability::BEFORE));
    }

    // ---- CapabilitySet ----

    #[test]
    fn minted_builtin_name_lands_in_bitset() {
        let mut set = CapabilitySet::empty();
        assert!(set.insert(Capability::new("start").unwrap()));
        assert!(!set.insert(Capability::START));
        assert_eq!(set.len(), 1);
        assert_eq!(set, CapabilitySet::empty().with(Capability::START));
    }

    #[test]
    fn custom_tokens_are_members() {
        let checksum = Capability::new("checksum").unwrap();
        let set = CapabilitySet::empty()
            .with(Capability::BOUNDED)
            .with(checksum.clone());
        assert!(has_feature(&set, &checksum));
        assert!(has_feature(&set, &Capability::new("checksum").unwrap()));
        assert!(!has_feature(&set, &Capability::SORTED));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insertion_order_is_irrelevant() {
        let a: CapabilitySet = [Capability::NEXT, Capability::START, Capability::REMOVE]
            .into_iter()
            .collect();
        let b: CapabilitySet = [Capability::REMOVE, Capability::NEXT, Capability::START]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn remove_reports_presence() {
        let mut set = FORWARD.clone();
        assert!(set.remove(&Capability::NEXT));
        assert!(!set.remove(&Capability::NEXT));
        assert!(!set.remove(&Capability::new("missing").unwrap()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn union_merges_builtin_and_custom() {
        let custom = Capability::new("persistent").unwrap();
        let merged = FORWARD.union(&CapabilitySet::empty().with(custom.clone()));
        assert!(merged.contains(&Capability::START));
        assert!(merged.contains(&Capability::NEXT));
        assert!(merged.contains(&custom));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn display_lists_builtins_then_custom() {
        let set = FORWARD.clone().with(Capability::new("audited").unwrap());
        assert_eq!(set.to_string(), "{start, next, audited}");
        assert_eq!(CapabilitySet::empty().to_string(), "{}");
    }

    // ---- Cursor validation ----

    #[test]
    fn predefined_profiles_are_valid() {
        assert!(FORWARD.validate_cursor().is_ok());
        assert!(BACKWARD.validate_cursor().is_ok());
        assert!(BIDIRECTIONAL.validate_cursor().is_ok());
    }

    #[test]
    fn backward_profiles_advertise_before() {
        assert!(BACKWARD.contains(&Capability::BEFORE));
        assert!(BIDIRECTIONAL.contains(&Capability::BEFORE));
        assert!(!FORWARD.contains(&Capability::BEFORE));
        assert_eq!(BACKWARD.to_string(), "{previous, end, before}");
    }

    #[test]
    fn next_requires_start() {
        let result = CapabilitySet::for_cursor([Capability::NEXT]);
        assert_eq!(result, Err(CapabilityError::NextWithoutStart));
    }

    #[test]
    fn previous_requires_end() {
        let result = CapabilitySet::for_cursor([Capability::PREVIOUS, Capability::START]);
        assert_eq!(result, Err(CapabilityError::PreviousWithoutEnd));
    }

    #[test]
    fn one_shot_cursor_is_rejected() {
        let result = CapabilitySet::for_cursor([Capability::START, Capability::END]);
        assert_eq!(result, Err(CapabilityError::NoDirection));
    }

    #[test]
    fn for_cursor_accepts_extra_tokens() {
        let set = CapabilitySet::for_cursor([
            Capability::START,
            Capability::NEXT,
            Capability::REMOVE,
        ])
        .unwrap();
        assert!(set.contains(&Capability::REMOVE));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_names() {
        let set = FORWARD.clone().with(Capability::new("audited").unwrap());
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["start","next","audited"]"#);
        let back: CapabilitySet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(serde_json::from_str::<Capability>(r#""""#).is_err());
    }
}
