//! The immutable compiled snapshot and its builder.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::hir::{
    FieldSpec, NamedType, Object, ObjectId, ObjectKind, ObjectTable, ParamSpec, ScopePath,
    Signature, StructType, Type, TypeId, TypeInfo, TypeTable, Vocabulary,
};
use crate::syntax::SyntaxTree;

/// The distinguished program file name.
pub const PROGRAM_FILE: &str = "main.spx";

/// Which implicit receiver a source file binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileRole {
    /// The program file: implicit receiver is the Game-like global entity.
    Program,
    /// A per-entity file, named after a declared sprite resource.
    Entity(SmolStr),
}

impl FileRole {
    /// Classify a file path. Entity binding requires the base name to
    /// match a known sprite resource; otherwise the file degrades to
    /// Program-role with no entity binding.
    pub fn classify(path: &str, assets: &crate::project::AssetIndex) -> FileRole {
        let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
        if base == PROGRAM_FILE {
            return FileRole::Program;
        }
        match base.strip_suffix(".spx") {
            Some(stem) if assets.has_sprite(stem) => FileRole::Entity(SmolStr::from(stem)),
            _ => FileRole::Program,
        }
    }
}

/// One file of the snapshot. `tree` is `None` when parsing failed
/// entirely; `info` still carries whatever the compiler recovered.
#[derive(Debug)]
pub struct ParsedFile {
    pub tree: Option<SyntaxTree>,
    pub info: TypeInfo,
}

/// An immutable compiled snapshot: every analysis is a pure function of
/// one of these plus a position. Concurrent requests share a snapshot
/// freely; a newer snapshot never invalidates requests bound to an older
/// one.
#[derive(Debug)]
pub struct Snapshot {
    files: FxHashMap<String, (FileId, ParsedFile)>,
    pub types: TypeTable,
    pub objects: ObjectTable,
    pub vocab: Vocabulary,
    pub assets: crate::project::AssetIndex,
    program_globals: Vec<ObjectId>,
}

impl Snapshot {
    pub fn file(&self, path: &str) -> Option<&ParsedFile> {
        self.files.get(path).map(|(_, file)| file)
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.get(path).map(|(id, _)| *id)
    }

    /// Program-package declarations, in declaration order.
    pub fn program_globals(&self) -> &[ObjectId] {
        &self.program_globals
    }

    pub fn role(&self, path: &str) -> FileRole {
        FileRole::classify(path, &self.assets)
    }

    /// The implicit receiver type a role binds, if any.
    ///
    /// Entity files prefer the program's own declared entity type of the
    /// same name and fall back to the runtime sprite base.
    pub fn receiver_type(&self, role: &FileRole) -> TypeId {
        match role {
            FileRole::Program => self.vocab.game_type,
            FileRole::Entity(name) => self
                .program_globals
                .iter()
                .map(|&id| self.objects.get(id))
                .find(|obj| {
                    matches!(obj.kind, ObjectKind::TypeName)
                        && obj.name == *name
                        && self
                            .types
                            .as_named(obj.ty)
                            .is_some_and(|named| named.entity)
                })
                .map(|obj| obj.ty)
                .unwrap_or(self.vocab.sprite_type),
        }
    }
}

/// Assembles a [`Snapshot`]. Driven by the compiler adapter; tests use it
/// directly to stage resolved programs.
pub struct SnapshotBuilder {
    types: TypeTable,
    objects: ObjectTable,
    vocab: Vocabulary,
    assets: crate::project::AssetIndex,
    files: FxHashMap<String, (FileId, ParsedFile)>,
    next_file: u32,
    program_globals: Vec<ObjectId>,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        let mut types = TypeTable::new();
        let mut objects = ObjectTable::new();
        let vocab = Vocabulary::install(&mut types, &mut objects);
        Self {
            types,
            objects,
            vocab,
            assets: crate::project::AssetIndex::new(),
            files: FxHashMap::default(),
            next_file: 0,
            program_globals: Vec::new(),
        }
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn types(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    pub fn objects(&mut self) -> &mut ObjectTable {
        &mut self.objects
    }

    pub fn assets(&mut self) -> &mut crate::project::AssetIndex {
        &mut self.assets
    }

    /// Register a file. `tree = None` records a file whose parse failed.
    pub fn add_file(&mut self, path: &str, tree: Option<SyntaxTree>, info: TypeInfo) -> FileId {
        let id = FileId::new(self.next_file);
        self.next_file += 1;
        self.files
            .insert(path.to_string(), (id, ParsedFile { tree, info }));
        id
    }

    /// Declare a program entity type `name` embedding the runtime sprite
    /// base, and register its type name as a program-global.
    pub fn declare_entity_type(&mut self, name: &str) -> TypeId {
        let underlying = self.types.alloc(Type::Struct(StructType {
            fields: vec![FieldSpec {
                name: "Sprite".into(),
                ty: self.vocab.sprite_type,
                embedded: true,
                exported: true,
            }],
        }));
        let ty = self.types.alloc(Type::Named(NamedType {
            name: name.into(),
            scope: ScopePath::Program,
            underlying,
            methods: Vec::new(),
            entity: true,
            receiver_boundary: false,
        }));
        let object = self.objects.alloc(Object {
            name: name.into(),
            kind: ObjectKind::TypeName,
            ty,
            scope: ScopePath::Program,
            owner: None,
            overload_id: None,
            exported: true,
        });
        self.program_globals.push(object);
        ty
    }

    /// Declare a program-global variable.
    pub fn declare_global_var(&mut self, name: &str, ty: TypeId) -> ObjectId {
        let object = self.objects.alloc(Object {
            name: name.into(),
            kind: ObjectKind::Var,
            ty,
            scope: ScopePath::Program,
            owner: None,
            overload_id: None,
            exported: false,
        });
        self.program_globals.push(object);
        object
    }

    /// Declare a program-global function.
    pub fn declare_global_func(
        &mut self,
        name: &str,
        params: &[(&str, TypeId)],
        variadic: bool,
    ) -> ObjectId {
        let sig = self.types.alloc(Type::Signature(Signature {
            has_recv: false,
            params: params
                .iter()
                .map(|(name, ty)| ParamSpec { name: SmolStr::from(*name), ty: *ty })
                .collect(),
            variadic,
        }));
        let object = self.objects.alloc(Object {
            name: name.into(),
            kind: ObjectKind::Func { overloads: Vec::new() },
            ty: sig,
            scope: ScopePath::Program,
            owner: None,
            overload_id: None,
            exported: false,
        });
        self.program_globals.push(object);
        object
    }

    /// Declare a block-local variable or parameter (not a program global).
    pub fn declare_local_var(&mut self, name: &str, ty: TypeId) -> ObjectId {
        self.objects.alloc(Object {
            name: name.into(),
            kind: ObjectKind::Var,
            ty,
            scope: ScopePath::Program,
            owner: None,
            overload_id: None,
            exported: false,
        })
    }

    /// A pointer type, for pass-by-reference parameters.
    pub fn pointer_to(&mut self, ty: TypeId) -> TypeId {
        self.types.alloc(Type::Pointer(ty))
    }

    pub fn finish(self) -> Snapshot {
        Snapshot {
            files: self.files,
            types: self.types,
            objects: self.objects,
            vocab: self.vocab,
            assets: self.assets,
            program_globals: self.program_globals,
        }
    }
}
