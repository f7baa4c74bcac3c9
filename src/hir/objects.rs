//! Declared objects: variables, constants, functions, fields, type names.

use smol_str::SmolStr;

use super::types::TypeId;

/// Index of an object inside its [`ObjectTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The scope a definition belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ScopePath {
    /// Predeclared universe names (`echo`, `println`, `true`, `false`).
    Builtin,
    /// The scripted program's own package.
    Program,
    /// The runtime package housing `Game`, `Sprite`, and the fixed
    /// vocabulary.
    Runtime,
}

impl ScopePath {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopePath::Builtin => "builtin",
            ScopePath::Program => "main",
            ScopePath::Runtime => "stagescript/runtime",
        }
    }
}

/// A resolved constant value.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// What kind of object a name denotes.
#[derive(Clone, Debug)]
pub enum ObjectKind {
    /// A variable or parameter.
    Var,
    /// A constant with its resolved value.
    Const(ConstValue),
    /// A function or method. A non-empty overload group marks an
    /// overload-dispatch member; the group lists the concrete overloads.
    Func { overloads: Vec<ObjectId> },
    /// A struct field.
    Field,
    /// A declared type name.
    TypeName,
}

/// One declared object.
#[derive(Clone, Debug)]
pub struct Object {
    pub name: SmolStr,
    pub kind: ObjectKind,
    /// The object's type; for functions this is a `Signature` type, for
    /// type names the named type itself.
    pub ty: TypeId,
    pub scope: ScopePath,
    /// For members: the named type that owns them (qualifies the name as
    /// `Owner.member`).
    pub owner: Option<SmolStr>,
    /// Overload discriminator for concrete overloads of a dispatch member.
    pub overload_id: Option<SmolStr>,
    pub exported: bool,
}

impl Object {
    /// The qualified name used for definition identity: `Owner.member`
    /// for members, the plain name otherwise.
    pub fn qualified_name(&self) -> SmolStr {
        match &self.owner {
            Some(owner) => SmolStr::from(format!("{}.{}", owner, self.name)),
            None => self.name.clone(),
        }
    }

    /// Whether this is an overload-dispatch function with a concrete,
    /// expandable overload group.
    pub fn is_overload_dispatch(&self) -> bool {
        matches!(&self.kind, ObjectKind::Func { overloads } if !overloads.is_empty())
    }

    pub fn const_value(&self) -> Option<&ConstValue> {
        match &self.kind {
            ObjectKind::Const(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_var(&self) -> bool {
        matches!(self.kind, ObjectKind::Var)
    }
}

/// Arena of declared objects.
#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: Vec<Object>,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    pub fn get(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.index()]
    }

    /// All objects with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId(index as u32), object))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
