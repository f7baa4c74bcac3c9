//! Resolved type representation.
//!
//! Types are interned in a [`TypeTable`] and addressed by [`TypeId`];
//! identity comparisons throughout the analyses are `TypeId` equality,
//! never name matching.

use smol_str::SmolStr;

use super::objects::{ObjectId, ScopePath};

/// Index of a type inside its [`TypeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The basic (predeclared) type kinds, including the untyped literal forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    UntypedBool,
    UntypedInt,
    UntypedFloat,
    UntypedString,
    Invalid,
}

impl BasicKind {
    /// All kinds, in the order they are interned by [`TypeTable::new`].
    const ALL: &'static [BasicKind] = &[
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::String,
        BasicKind::UntypedBool,
        BasicKind::UntypedInt,
        BasicKind::UntypedFloat,
        BasicKind::UntypedString,
        BasicKind::Invalid,
    ];

    pub fn is_boolean(self) -> bool {
        matches!(self, BasicKind::Bool | BasicKind::UntypedBool)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            BasicKind::Int
                | BasicKind::Int8
                | BasicKind::Int16
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::UntypedInt
        )
    }

    pub fn is_float(self) -> bool {
        matches!(
            self,
            BasicKind::Float32 | BasicKind::Float64 | BasicKind::UntypedFloat
        )
    }

    pub fn is_string(self) -> bool {
        matches!(self, BasicKind::String | BasicKind::UntypedString)
    }
}

/// A declared named type (`type T struct { .. }`).
#[derive(Clone, Debug)]
pub struct NamedType {
    pub name: SmolStr,
    pub scope: ScopePath,
    pub underlying: TypeId,
    /// Methods declared on this type, in declaration order. Overload
    /// dispatch members appear here; their concrete overloads do not.
    pub methods: Vec<ObjectId>,
    /// Whether values of this type are scripted entities (sprites, the
    /// game itself).
    pub entity: bool,
    /// A terminal receiver type: its own exported members are part of an
    /// embedding entity's surface, but traversal never descends into its
    /// embedded fields.
    pub receiver_boundary: bool,
}

/// A declared type alias (`type SpriteName = string`).
#[derive(Clone, Debug)]
pub struct AliasType {
    pub name: SmolStr,
    pub scope: ScopePath,
    pub target: TypeId,
}

/// One struct field.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: SmolStr,
    pub ty: TypeId,
    pub embedded: bool,
    pub exported: bool,
}

/// A struct type.
#[derive(Clone, Debug, Default)]
pub struct StructType {
    pub fields: Vec<FieldSpec>,
}

/// One function parameter.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub name: SmolStr,
    pub ty: TypeId,
}

/// A function signature.
///
/// Methods carry their receiver as the leading parameter with
/// `has_recv = true`; calls using method convention skip it when pairing
/// arguments.
#[derive(Clone, Debug, Default)]
pub struct Signature {
    pub has_recv: bool,
    pub params: Vec<ParamSpec>,
    pub variadic: bool,
}

impl Signature {
    /// The parameter matched against argument position `index` for a call
    /// that supplies `skip_recv`. Variadic signatures reuse the final
    /// parameter for trailing arguments.
    pub fn param_for_arg(&self, index: usize, skip_recv: bool) -> Option<&ParamSpec> {
        let offset = if skip_recv && self.has_recv { 1 } else { 0 };
        let slot = offset + index;
        if slot < self.params.len() {
            self.params.get(slot)
        } else if self.variadic {
            self.params.last()
        } else {
            None
        }
    }
}

/// A resolved type.
#[derive(Clone, Debug)]
pub enum Type {
    Basic(BasicKind),
    Named(NamedType),
    Alias(AliasType),
    Pointer(TypeId),
    Struct(StructType),
    Signature(Signature),
    Invalid,
}

/// Arena of resolved types. Basic kinds are interned up front so the same
/// `TypeId` is shared by every use of a basic type.
#[derive(Debug)]
pub struct TypeTable {
    types: Vec<Type>,
    basics: Vec<TypeId>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self { types: Vec::new(), basics: Vec::new() };
        for &kind in BasicKind::ALL {
            let id = table.alloc(Type::Basic(kind));
            table.basics.push(id);
        }
        table
    }

    pub fn alloc(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.index()]
    }

    /// The interned id of a basic kind.
    pub fn basic(&self, kind: BasicKind) -> TypeId {
        let pos = BasicKind::ALL.iter().position(|&k| k == kind).unwrap_or(0);
        self.basics[pos]
    }

    /// Follow alias and named-type indirections down to the underlying
    /// basic kind, if there is one.
    pub fn underlying_basic(&self, id: TypeId) -> Option<BasicKind> {
        let mut current = id;
        // Alias/underlying chains are acyclic by construction; bound the
        // walk anyway.
        for _ in 0..32 {
            match self.get(current) {
                Type::Basic(kind) => return Some(*kind),
                Type::Alias(alias) => current = alias.target,
                Type::Named(named) => current = named.underlying,
                _ => return None,
            }
        }
        None
    }

    /// The struct underlying a (possibly named) type, if any.
    pub fn underlying_struct(&self, id: TypeId) -> Option<&StructType> {
        let mut current = id;
        for _ in 0..32 {
            match self.get(current) {
                Type::Struct(s) => return Some(s),
                Type::Alias(alias) => current = alias.target,
                Type::Named(named) => current = named.underlying,
                _ => return None,
            }
        }
        None
    }

    /// The named type a (possibly aliased) id refers to, if any.
    pub fn as_named(&self, id: TypeId) -> Option<&NamedType> {
        let mut current = id;
        for _ in 0..32 {
            match self.get(current) {
                Type::Named(named) => return Some(named),
                Type::Alias(alias) => current = alias.target,
                _ => return None,
            }
        }
        None
    }

    /// The signature of a function type, if any.
    pub fn signature(&self, id: TypeId) -> Option<&Signature> {
        match self.get(id) {
            Type::Signature(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Pointer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_kinds_are_interned_once() {
        let table = TypeTable::new();
        assert_eq!(table.basic(BasicKind::Int), table.basic(BasicKind::Int));
        assert_ne!(table.basic(BasicKind::Int), table.basic(BasicKind::Float64));
    }

    #[test]
    fn test_underlying_basic_follows_alias_chain() {
        let mut table = TypeTable::new();
        let string = table.basic(BasicKind::String);
        let alias = table.alloc(Type::Alias(AliasType {
            name: "SpriteName".into(),
            scope: ScopePath::Runtime,
            target: string,
        }));
        assert_eq!(table.underlying_basic(alias), Some(BasicKind::String));
    }

    #[test]
    fn test_param_for_arg_skips_receiver_and_reuses_variadic_tail() {
        let table = TypeTable::new();
        let int = table.basic(BasicKind::Int);
        let sig = Signature {
            has_recv: true,
            params: vec![
                ParamSpec { name: "recv".into(), ty: int },
                ParamSpec { name: "a".into(), ty: int },
                ParamSpec { name: "rest".into(), ty: int },
            ],
            variadic: true,
        };
        assert_eq!(sig.param_for_arg(0, true).unwrap().name, "a");
        assert_eq!(sig.param_for_arg(1, true).unwrap().name, "rest");
        // Beyond the declared list, the variadic tail is reused.
        assert_eq!(sig.param_for_arg(5, true).unwrap().name, "rest");
        // Function-call convention keeps the leading parameter.
        assert_eq!(sig.param_for_arg(0, false).unwrap().name, "recv");
    }
}
