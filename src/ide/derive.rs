//! Deriving input slots from single expressions.
//!
//! Derivation is conservative: anything that cannot be evaluated exactly
//! from source text and resolution results yields no slot at all, never a
//! guessed one.

use crate::hir::{ConstValue, TypeId, TypeInfo};
use crate::project::Snapshot;
use crate::syntax::{LitKind, Node, NodeId, SyntaxTree, UnaryOp};

use super::classify::{Classifier, TypeCategory};
use super::resources::resolve_resource;
use super::slot::{ColorValue, InputSlot, SlotValue};

/// Everything derivation needs about the file under analysis.
pub(super) struct DeriveCtx<'a> {
    pub snapshot: &'a Snapshot,
    pub path: &'a str,
    pub tree: &'a SyntaxTree,
    pub info: &'a TypeInfo,
}

impl DeriveCtx<'_> {
    fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.snapshot.types, &self.snapshot.vocab)
    }
}

/// Derive a value slot from an expression in value position. `declared`
/// is the type the surrounding context expects, when known.
pub(super) fn derive_value_slot(
    ctx: &DeriveCtx<'_>,
    expr: NodeId,
    declared: Option<TypeId>,
) -> Option<InputSlot> {
    let classifier = ctx.classifier();
    let accept = declared
        .map(|ty| classifier.classify(ty))
        .unwrap_or(TypeCategory::Unknown);
    let range = ctx.tree.range(expr);

    match ctx.tree.node(expr) {
        Node::BasicLit(lit) => {
            // A string literal in resource-name position resolves against
            // the asset index.
            if let Some(kind) = declared.and_then(|ty| classifier.resource_kind(ty)) {
                if lit.kind != LitKind::String {
                    return None;
                }
                let name = unquote(&lit.text)?;
                let value = match resolve_resource(
                    ctx.snapshot,
                    ctx.path,
                    ctx.tree,
                    ctx.info,
                    expr,
                    kind,
                    &name,
                ) {
                    Some(uri) => SlotValue::Resource(uri),
                    None => SlotValue::String(name),
                };
                return Some(InputSlot::in_place(
                    accept,
                    TypeCategory::ResourceName,
                    value,
                    range,
                ));
            }
            match lit.kind {
                LitKind::Int => Some(InputSlot::in_place(
                    accept,
                    TypeCategory::Integer,
                    SlotValue::Integer(parse_int(&lit.text)?),
                    range,
                )),
                LitKind::Float => Some(InputSlot::in_place(
                    accept,
                    TypeCategory::Decimal,
                    SlotValue::Decimal(parse_float(&lit.text)?),
                    range,
                )),
                LitKind::String => Some(InputSlot::in_place(
                    accept,
                    TypeCategory::String,
                    SlotValue::String(unquote(&lit.text)?),
                    range,
                )),
                LitKind::Char => None,
            }
        }
        Node::Ident(ident) => {
            if ident.is_blank() {
                return None;
            }
            let object_id = ctx.info.use_of(expr)?;
            let object = ctx.snapshot.objects.get(object_id);
            let vocab = &ctx.snapshot.vocab;

            if let Some(value) = object.const_value() {
                if let ConstValue::Bool(b) = value {
                    return Some(InputSlot::in_place(
                        accept,
                        TypeCategory::Boolean,
                        SlotValue::Boolean(*b),
                        range,
                    ));
                }
                if let Some(heading) = vocab.direction_heading(object_id) {
                    return Some(InputSlot::in_place(
                        accept,
                        TypeCategory::Direction,
                        SlotValue::Decimal(heading),
                        range,
                    ));
                }
                let group = [
                    (vocab.is_special_obj(object_id), TypeCategory::SpecialObj),
                    (vocab.is_effect_kind(object_id), TypeCategory::EffectKind),
                    (vocab.is_play_action(object_id), TypeCategory::PlayAction),
                    (vocab.is_key(object_id), TypeCategory::Key),
                    (vocab.is_rotation_style(object_id), TypeCategory::RotationStyle),
                ]
                .into_iter()
                .find_map(|(hit, ty)| hit.then_some(ty));
                if let Some(ty) = group {
                    return Some(InputSlot::in_place(
                        accept,
                        ty,
                        SlotValue::Constant(object.name.clone()),
                        range,
                    ));
                }
                // Program-declared constants read as predefined names.
                let ty = classifier.classify(object.ty);
                if ty == TypeCategory::Unknown {
                    return None;
                }
                return Some(InputSlot::predefined(accept, ty, object.name.clone(), range));
            }
            if object.is_var() {
                let ty = classifier.classify(object.ty);
                if ty == TypeCategory::Unknown {
                    return None;
                }
                return Some(InputSlot::predefined(accept, ty, object.name.clone(), range));
            }
            None
        }
        Node::UnaryExpr(unary) => {
            let Node::BasicLit(lit) = ctx.tree.node(unary.operand) else {
                return None;
            };
            let (ty, value) = match (unary.op, lit.kind) {
                (UnaryOp::Pos, LitKind::Int) => {
                    (TypeCategory::Integer, SlotValue::Integer(parse_int(&lit.text)?))
                }
                (UnaryOp::Neg, LitKind::Int) => {
                    (TypeCategory::Integer, SlotValue::Integer(-parse_int(&lit.text)?))
                }
                (UnaryOp::BitNot, LitKind::Int) => {
                    (TypeCategory::Integer, SlotValue::Integer(!parse_int(&lit.text)?))
                }
                (UnaryOp::Pos, LitKind::Float) => {
                    (TypeCategory::Decimal, SlotValue::Decimal(parse_float(&lit.text)?))
                }
                (UnaryOp::Neg, LitKind::Float) => {
                    (TypeCategory::Decimal, SlotValue::Decimal(-parse_float(&lit.text)?))
                }
                _ => return None,
            };
            // The slot spans the whole signed expression.
            Some(InputSlot::in_place(accept, ty, value, range))
        }
        Node::CallExpr(call) => {
            let callee = ctx.info.use_of(call.callee)?;
            let constructor = ctx.snapshot.vocab.color_constructor(callee)?;
            if call.args.len() != constructor.arity() {
                return None;
            }
            let mut args = Vec::with_capacity(call.args.len());
            for &arg in &call.args {
                args.push(numeric_component(ctx.tree, arg)?);
            }
            Some(InputSlot::in_place(
                accept,
                TypeCategory::Color,
                SlotValue::Color(ColorValue { constructor, args }),
                range,
            ))
        }
        _ => None,
    }
}

/// Derive an address slot from an expression in assignment position.
/// Only plain non-blank identifiers are addressable.
pub(super) fn derive_address_slot(ctx: &DeriveCtx<'_>, expr: NodeId) -> Option<InputSlot> {
    match ctx.tree.node(expr) {
        Node::Ident(ident) if !ident.is_blank() => {
            Some(InputSlot::address(ident.name.clone(), ctx.tree.range(expr)))
        }
        _ => None,
    }
}

/// A color-constructor component: a numeric literal, optionally signed.
fn numeric_component(tree: &SyntaxTree, expr: NodeId) -> Option<f64> {
    match tree.node(expr) {
        Node::BasicLit(lit) => match lit.kind {
            LitKind::Int => Some(parse_int(&lit.text)? as f64),
            LitKind::Float => parse_float(&lit.text),
            _ => None,
        },
        Node::UnaryExpr(unary) => {
            let inner = numeric_component(tree, unary.operand)?;
            match unary.op {
                UnaryOp::Pos => Some(inner),
                UnaryOp::Neg => Some(-inner),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Parse an integer literal's source text: decimal, `0x`/`0o`/`0b`
/// prefixes, `_` separators. Malformed text is `None`, never a guess.
pub(super) fn parse_int(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else {
        (lower.as_str(), 10)
    };
    if digits.is_empty() {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// Parse a float literal's source text. `_` separators are allowed;
/// anything `f64` parsing rejects is `None`.
pub(super) fn parse_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Strip the quotes from a string literal and process escapes: the
/// single-character set plus `\xNN`, `\uNNNN`, and `\UNNNNNNNN` hex
/// escapes, decoded to the named code point. Returns `None` for
/// unterminated literals or escapes outside that grammar.
pub(super) fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            _ => return None,
        }
    }
    Some(out)
}

/// Decode `len` hex digits into a code point.
fn hex_escape(chars: &mut std::str::Chars<'_>, len: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..len {
        value = value.checked_mul(16)? + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
