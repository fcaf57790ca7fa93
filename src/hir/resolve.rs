//! Name resolution — the whole-document semantic index.
//!
//! The index is rebuilt from scratch by every analysis pass:
//!
//! 1. **Definitions** - every defining node registers its (kind, name) entry
//! 2. **Forward references** - uses of names not defined yet are recorded
//!    and dropped again as soon as a matching definition shows up
//! 3. **Finalization** - whatever forward references remain at the end of the
//!    document are handed back to the driver as unresolved

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smol_str::SmolStr;

use super::symbols::{Definition, DefinitionDetail, ForwardReference, Reference, SymbolKind};
use crate::base::Range;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Document-scoped settings declared by singleton pragmas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentSettings {
    /// Name declared by `%class`.
    pub class_name: Option<SmolStr>,
    /// Whether `%walkers` has been seen.
    pub walkers_declared: bool,
    /// The default walker; `%walkers` sets it to its first name.
    pub default_walker: Option<SmolStr>,
    /// Whether an explicit `%default_walker` has been seen.
    pub default_walker_specified: bool,
    /// Rule named by `%start`.
    pub start_rule: Option<SmolStr>,
}

/// The whole-document index: kind → name → defining entries.
///
/// Names keep their first-definition order, so outlines come out in source
/// order.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    definitions: FxHashMap<SymbolKind, FxIndexMap<SmolStr, Vec<Definition>>>,
    forward_references: Vec<ForwardReference>,
    settings: DocumentSettings,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Definitions ====================

    /// Append a definition to its (kind, name) bucket.
    pub fn add_definition(&mut self, definition: Definition) {
        tracing::trace!(kind = %definition.kind, name = %definition.name, "definition");
        self.definitions
            .entry(definition.kind)
            .or_default()
            .entry(definition.name.clone())
            .or_default()
            .push(definition);
    }

    /// Whether the referenced entity has at least one definition.
    pub fn lookup(&self, reference: &Reference) -> bool {
        self.is_defined(reference.kind, &reference.name)
    }

    pub fn is_defined(&self, kind: SymbolKind, name: &str) -> bool {
        !self.definitions_of(kind, name).is_empty()
    }

    /// All definitions of (kind, name), in source order.
    pub fn definitions_of(&self, kind: SymbolKind, name: &str) -> &[Definition] {
        self.definitions
            .get(&kind)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ranges of the defining names of (kind, name).
    pub fn definition_ranges(&self, kind: SymbolKind, name: &str) -> Vec<Range> {
        self.definitions_of(kind, name)
            .iter()
            .map(|def| def.range)
            .collect()
    }

    /// Every definition of a kind, grouped by name in first-definition order.
    pub fn definitions_by_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Definition> {
        self.definitions
            .get(&kind)
            .into_iter()
            .flat_map(|names| names.values().flatten())
    }

    /// Distinct names defined for a kind.
    pub fn names(&self, kind: SymbolKind) -> impl Iterator<Item = &SmolStr> {
        self.definitions
            .get(&kind)
            .into_iter()
            .flat_map(|names| names.keys())
    }

    /// Every definition in the index.
    pub fn all_definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions
            .values()
            .flat_map(|names| names.values().flatten())
    }

    /// Total number of definitions.
    pub fn definition_count(&self) -> usize {
        self.all_definitions().count()
    }

    /// Number of bodies already defined for a rule name.
    pub fn rule_definition_count(&self, name: &str) -> usize {
        self.definitions_of(SymbolKind::Rule, name).len()
    }

    /// Disambiguated name for the next body of `name`: `name`, `name_1`, ...
    pub fn next_rule_internal_name(&self, name: &str) -> SmolStr {
        match self.rule_definition_count(name) {
            0 => SmolStr::from(name),
            n => SmolStr::from(format!("{name}_{n}")),
        }
    }

    /// `%function` declarations for a rule (prefix match on `rule::`).
    pub fn functions_for_rule(&self, rule: &str) -> Vec<&Definition> {
        let prefix = format!("{rule}::");
        self.definitions_by_kind(SymbolKind::Function)
            .filter(|def| def.name.starts_with(&prefix))
            .collect()
    }

    /// External type registered for a walker by `%walker_interface`.
    pub fn walker_interface(&self, walker: &str) -> Option<&SmolStr> {
        self.definitions_of(SymbolKind::WalkerInterface, walker)
            .iter()
            .find_map(|def| match &def.detail {
                DefinitionDetail::WalkerInterface { type_name } => Some(type_name),
                _ => None,
            })
    }

    // ==================== Forward references ====================

    /// Record a use of a name that is not defined yet.
    pub fn add_forward_reference(
        &mut self,
        name: impl Into<SmolStr>,
        kind: SymbolKind,
        range: Range,
    ) {
        self.forward_references.push(ForwardReference {
            name: name.into(),
            kind,
            range,
        });
    }

    /// Drop every pending use of (kind, name).
    pub fn remove_forward_reference(&mut self, name: &str, kind: SymbolKind) {
        self.forward_references
            .retain(|fwd| !(fwd.kind == kind && fwd.name == name));
    }

    /// Pending forward references.
    pub fn forward_references(&self) -> &[ForwardReference] {
        &self.forward_references
    }

    /// Discard the forward-reference list, returning the entries that are
    /// still undefined.
    pub fn take_unresolved(&mut self) -> Vec<ForwardReference> {
        let pending = std::mem::take(&mut self.forward_references);
        pending
            .into_iter()
            .filter(|fwd| !self.is_defined(fwd.kind, &fwd.name))
            .collect()
    }

    // ==================== Settings ====================

    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut DocumentSettings {
        &mut self.settings
    }
}
