//! The input-slot model: typed, range-anchored descriptions of editable
//! locations handed to the visual widget layer.

use smol_str::SmolStr;

use crate::base::TextRange;
use crate::hir::ColorConstructor;
use crate::project::ResourceUri;

use super::classify::TypeCategory;

/// Whether a slot is a swappable value or an assignable storage location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SlotKind {
    Value,
    Address,
}

/// Whether the slot currently holds a concrete value or references a
/// predefined name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InputKind {
    InPlace,
    Predefined,
}

/// A recognized color-constructor call, evaluated to its components.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColorValue {
    pub constructor: ColorConstructor,
    /// One numeric component per call argument; arity is fixed by the
    /// constructor.
    pub args: Vec<f64>,
}

/// The current value of an in-place slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SlotValue {
    Integer(i64),
    Decimal(f64),
    String(String),
    Boolean(bool),
    /// A fixed vocabulary constant, by name (special objects, effect
    /// kinds, play actions, keys, rotation styles).
    Constant(SmolStr),
    /// A resolved resource reference.
    Resource(ResourceUri),
    Color(ColorValue),
}

/// The current occupant of a slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SlotInput {
    pub kind: InputKind,
    /// Category of the current value or name.
    pub ty: TypeCategory,
    /// Present iff `kind` is `InPlace`.
    pub value: Option<SlotValue>,
    /// Present iff `kind` is `Predefined` (or the slot is an address).
    pub name: Option<SmolStr>,
}

/// One editable location in source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InputSlot {
    pub kind: SlotKind,
    /// The category the containing context requires.
    pub accept: TypeCategory,
    pub input: SlotInput,
    /// In-scope names substitutable at this position, in scope order.
    pub predefined_names: Vec<SmolStr>,
    /// The exact span of the originating token or expression. Never
    /// empty.
    pub range: TextRange,
}

impl InputSlot {
    /// A value slot holding a concrete value.
    pub fn in_place(
        accept: TypeCategory,
        ty: TypeCategory,
        value: SlotValue,
        range: TextRange,
    ) -> Self {
        Self {
            kind: SlotKind::Value,
            accept,
            input: SlotInput { kind: InputKind::Predefined, ty, value: None, name: None },
            predefined_names: Vec::new(),
            range,
        }
        .with_value(value)
    }

    fn with_value(mut self, value: SlotValue) -> Self {
        self.input.kind = InputKind::InPlace;
        self.input.value = Some(value);
        self
    }

    /// A value slot referencing a predefined name.
    pub fn predefined(
        accept: TypeCategory,
        ty: TypeCategory,
        name: impl Into<SmolStr>,
        range: TextRange,
    ) -> Self {
        Self {
            kind: SlotKind::Value,
            accept,
            input: SlotInput {
                kind: InputKind::Predefined,
                ty,
                value: None,
                name: Some(name.into()),
            },
            predefined_names: Vec::new(),
            range,
        }
    }

    /// An address slot. Addresses are always predefined names with
    /// unknown categories on both sides.
    pub fn address(name: impl Into<SmolStr>, range: TextRange) -> Self {
        Self {
            kind: SlotKind::Address,
            accept: TypeCategory::Unknown,
            input: SlotInput {
                kind: InputKind::Predefined,
                ty: TypeCategory::Unknown,
                value: None,
                name: Some(name.into()),
            },
            predefined_names: Vec::new(),
            range,
        }
    }
}
