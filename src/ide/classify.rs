//! Mapping resolved types to semantic input categories.

use crate::hir::{BasicKind, TypeId, TypeTable, Vocabulary};
use crate::project::ResourceKind;

/// The semantic category of an input slot's type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TypeCategory {
    Unknown,
    Integer,
    Decimal,
    String,
    Boolean,
    Color,
    Direction,
    Key,
    EffectKind,
    PlayAction,
    SpecialObj,
    ResourceName,
    RotationStyle,
}

/// Classifies types against the fixed registry first, then structurally.
#[derive(Clone, Copy)]
pub struct Classifier<'a> {
    types: &'a TypeTable,
    vocab: &'a Vocabulary,
}

impl<'a> Classifier<'a> {
    pub fn new(types: &'a TypeTable, vocab: &'a Vocabulary) -> Self {
        Self { types, vocab }
    }

    /// Classify a resolved type.
    ///
    /// Registry identities are matched before any structural fallback, so
    /// a domain alias never degrades to its underlying basic kind.
    pub fn classify(&self, ty: TypeId) -> TypeCategory {
        if self.resource_kind(ty).is_some() {
            return TypeCategory::ResourceName;
        }
        let v = self.vocab;
        if ty == v.direction_type {
            return TypeCategory::Direction;
        }
        if ty == v.key_type {
            return TypeCategory::Key;
        }
        if ty == v.effect_kind_type {
            return TypeCategory::EffectKind;
        }
        if ty == v.play_action_type {
            return TypeCategory::PlayAction;
        }
        if ty == v.special_obj_type {
            return TypeCategory::SpecialObj;
        }
        if ty == v.rotation_style_type {
            return TypeCategory::RotationStyle;
        }
        if ty == v.color_type {
            return TypeCategory::Color;
        }

        match self.types.underlying_basic(ty) {
            Some(kind) if kind.is_boolean() => TypeCategory::Boolean,
            Some(kind) if kind.is_integer() => TypeCategory::Integer,
            Some(kind) if kind.is_float() => TypeCategory::Decimal,
            Some(kind) if kind.is_string() => TypeCategory::String,
            // Pointers, composites, signatures, invalid.
            _ => TypeCategory::Unknown,
        }
    }

    /// The resource sub-category of a resource-name alias, if the type is
    /// one.
    pub fn resource_kind(&self, ty: TypeId) -> Option<ResourceKind> {
        let v = self.vocab;
        if ty == v.sprite_name {
            Some(ResourceKind::Sprite)
        } else if ty == v.sound_name {
            Some(ResourceKind::Sound)
        } else if ty == v.backdrop_name {
            Some(ResourceKind::Backdrop)
        } else if ty == v.widget_name {
            Some(ResourceKind::Widget)
        } else if ty == v.costume_name {
            Some(ResourceKind::Costume)
        } else if ty == v.animation_name {
            Some(ResourceKind::Animation)
        } else {
            None
        }
    }
}
