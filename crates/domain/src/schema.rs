//! Validation contract for quest forms.
//!
//! The rules themselves are declared with `#[validate(...)]` attributes on
//! [`QuestForm`], [`TimeRange`], [`Objective`](crate::quest::Objective) and
//! [`Target`](crate::quest::Target). This module holds the custom predicates
//! those attributes refer to, the [`FieldPath`] addressing scheme, and
//! [`FormErrors`], the flattened per-field view of a validation run.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::blocks::is_known_block;
use crate::form::{QuestForm, TimeRange};

/// Error code for a missing value
pub const REQUIRED: &str = "required";

const SCHEMA_KEY: &str = "__all__";

// =============================================================================
// Custom predicates
// =============================================================================

/// Text that is empty or only whitespace counts as missing.
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error(REQUIRED, "This field is required"));
    }
    Ok(())
}

/// Target blocks must come from the vanilla block table.
pub fn known_block(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    if !is_known_block(value) {
        return Err(error("unknown_block", "Choose a block from the list"));
    }
    Ok(())
}

/// The end of a quest window must come after its start.
pub fn ordered_range(range: &TimeRange) -> Result<(), ValidationError> {
    match (range.start, range.end) {
        (Some(start), Some(end)) if end <= start => Err(error(
            "range_order",
            "End time must be after start time",
        )),
        _ => Ok(()),
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// =============================================================================
// Field paths
// =============================================================================

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Key(Cow<'static, str>),
    Index(usize),
}

/// Location of a field inside a [`QuestForm`], e.g. `objectives[0].targets[1].count`.
///
/// Keys are the Rust field names used by the validation attributes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The whole form.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A top-level field.
    pub fn field(name: &'static str) -> Self {
        Self::root().key(name)
    }

    /// `objectives[index]`
    pub fn objective(index: usize) -> Self {
        Self::field("objectives").index(index)
    }

    /// `objectives[objective].targets[target]`
    pub fn target(objective: usize, target: usize) -> Self {
        Self::objective(objective).key("targets").index(target)
    }

    /// Child path under a named key.
    pub fn key(&self, name: impl Into<Cow<'static, str>>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(name.into()));
        Self(segments)
    }

    /// Child path at a collection index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Rewrite the index that directly follows `collection` in this path.
    ///
    /// Paths outside `collection` are returned unchanged. Returns `None` when
    /// `map` drops the index, i.e. the element this path points into is gone.
    pub fn remap_index(
        &self,
        collection: &FieldPath,
        map: impl Fn(usize) -> Option<usize>,
    ) -> Option<FieldPath> {
        if !self.starts_with(collection) {
            return Some(self.clone());
        }
        let depth = collection.0.len();
        match self.0.get(depth) {
            Some(PathSegment::Index(old)) => {
                let new = map(*old)?;
                let mut segments = self.0.clone();
                segments[depth] = PathSegment::Index(new);
                Some(Self(segments))
            }
            _ => Some(self.clone()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Key(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Flattened errors
// =============================================================================

/// Validation messages keyed by the field they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    by_path: BTreeMap<FieldPath, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a `validator` error tree into per-field messages.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut flat = Self::new();
        flat.collect(&FieldPath::root(), errors);
        flat
    }

    fn collect(&mut self, prefix: &FieldPath, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let name: &str = field;
            let path = if name == SCHEMA_KEY {
                prefix.clone()
            } else {
                prefix.key(name.to_string())
            };
            match kind {
                ValidationErrorsKind::Field(errs) => {
                    for err in errs {
                        self.insert(path.clone(), message_for(err));
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(&path, inner),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect(&path.index(*index), inner);
                    }
                }
            }
        }
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.by_path.entry(path).or_default().push(message.into());
    }

    /// Messages for exactly this field (not its descendants).
    pub fn get(&self, path: &FieldPath) -> &[String] {
        self.by_path.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.by_path.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[String])> {
        self.by_path.iter().map(|(p, m)| (p, m.as_slice()))
    }
}

fn message_for(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match &*err.code {
        REQUIRED => "This field is required".to_string(),
        "length" => "Invalid length".to_string(),
        "range" => "Value is out of range".to_string(),
        other => format!("Invalid value ({})", other),
    }
}

/// Run every declared rule against a form.
pub fn validate_form(form: &QuestForm) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::new(),
        Err(errors) => FormErrors::from_validation(&errors),
    }
}
