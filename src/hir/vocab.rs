//! The fixed runtime vocabulary.
//!
//! Everything the analyses must recognize by identity lives here: the
//! `Game`/`Sprite` base types and their member sets, the resource-name
//! aliases, the direction/key aliases, the constant groups, and the four
//! color constructors. The table is constructed once per snapshot by
//! [`Vocabulary::install`] and passed by reference into every analysis;
//! nothing in this crate matches these by name.
//!
//! Membership is sourced from the runtime's public API surface, not
//! inferred structurally. Extending the table is additive.

use smol_str::SmolStr;

use super::objects::{ConstValue, Object, ObjectId, ObjectKind, ObjectTable, ScopePath};
use super::types::{
    AliasType, BasicKind, FieldSpec, NamedType, ParamSpec, Signature, StructType, Type, TypeId,
    TypeTable,
};

/// The four recognized color constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorConstructor {
    Rgb,
    Rgba,
    Hsb,
    Hsba,
}

impl ColorConstructor {
    /// The fixed component count for this constructor.
    pub fn arity(self) -> usize {
        match self {
            ColorConstructor::Rgb | ColorConstructor::Hsb => 3,
            ColorConstructor::Rgba | ColorConstructor::Hsba => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorConstructor::Rgb => "RGB",
            ColorConstructor::Rgba => "RGBA",
            ColorConstructor::Hsb => "HSB",
            ColorConstructor::Hsba => "HSBA",
        }
    }
}

/// The canonical direction headings.
pub const HEADING_UP: f64 = 0.0;
pub const HEADING_RIGHT: f64 = 90.0;
pub const HEADING_LEFT: f64 = -90.0;
pub const HEADING_DOWN: f64 = 180.0;

/// The fixed-identity runtime registry.
#[derive(Debug)]
pub struct Vocabulary {
    // Entity base types.
    pub game_type: TypeId,
    pub sprite_type: TypeId,
    pub color_type: TypeId,

    // Resource-name aliases.
    pub sprite_name: TypeId,
    pub sound_name: TypeId,
    pub backdrop_name: TypeId,
    pub widget_name: TypeId,
    pub costume_name: TypeId,
    pub animation_name: TypeId,

    // Domain aliases and named types.
    pub direction_type: TypeId,
    pub key_type: TypeId,
    pub effect_kind_type: TypeId,
    pub play_action_type: TypeId,
    pub special_obj_type: TypeId,
    pub rotation_style_type: TypeId,

    // Fixed-identity color constructors.
    pub rgb: ObjectId,
    pub rgba: ObjectId,
    pub hsb: ObjectId,
    pub hsba: ObjectId,

    /// The builtin scope, in presentation order.
    builtins: Vec<ObjectId>,

    directions: Vec<(ObjectId, f64)>,
    special_objs: Vec<ObjectId>,
    effect_kinds: Vec<ObjectId>,
    play_actions: Vec<ObjectId>,
    keys: Vec<ObjectId>,
    rotation_styles: Vec<ObjectId>,
}

impl Vocabulary {
    /// Build the registry into the given tables.
    pub fn install(types: &mut TypeTable, objects: &mut ObjectTable) -> Self {
        let string = types.basic(BasicKind::String);
        let float64 = types.basic(BasicKind::Float64);
        let int = types.basic(BasicKind::Int);
        let boolean = types.basic(BasicKind::Bool);
        let untyped_bool = types.basic(BasicKind::UntypedBool);

        let alias = |types: &mut TypeTable, name: &str, target: TypeId| {
            types.alloc(Type::Alias(AliasType {
                name: name.into(),
                scope: ScopePath::Runtime,
                target,
            }))
        };

        let sprite_name = alias(types, "SpriteName", string);
        let sound_name = alias(types, "SoundName", string);
        let backdrop_name = alias(types, "BackdropName", string);
        let widget_name = alias(types, "WidgetName", string);
        let costume_name = alias(types, "CostumeName", string);
        let animation_name = alias(types, "AnimationName", string);
        let direction_type = alias(types, "Direction", float64);
        let key_type = alias(types, "Key", int);

        let named = |types: &mut TypeTable, name: &str, underlying: TypeId| {
            types.alloc(Type::Named(NamedType {
                name: name.into(),
                scope: ScopePath::Runtime,
                underlying,
                methods: Vec::new(),
                entity: false,
                receiver_boundary: false,
            }))
        };

        let effect_kind_type = named(types, "EffectKind", int);
        let play_action_type = named(types, "PlayAction", int);
        let special_obj_type = named(types, "SpecialObj", int);
        let rotation_style_type = named(types, "RotationStyle", int);

        let color_struct = types.alloc(Type::Struct(StructType {
            fields: ["R", "G", "B", "A"]
                .iter()
                .map(|&name| FieldSpec {
                    name: name.into(),
                    ty: float64,
                    embedded: false,
                    exported: true,
                })
                .collect(),
        }));
        let color_type = named(types, "Color", color_struct);

        // The entity base types. Their underlying structs carry only an
        // unexported core field; the interesting surface is methods.
        let entity_base = |types: &mut TypeTable, name: &str| {
            let underlying = types.alloc(Type::Struct(StructType {
                fields: vec![FieldSpec {
                    name: "core".into(),
                    ty: int,
                    embedded: false,
                    exported: false,
                }],
            }));
            types.alloc(Type::Named(NamedType {
                name: name.into(),
                scope: ScopePath::Runtime,
                underlying,
                methods: Vec::new(),
                entity: true,
                receiver_boundary: true,
            }))
        };
        let game_type = entity_base(types, "Game");
        let sprite_type = entity_base(types, "Sprite");

        // A parameterless handler signature, shared by the event members.
        let handler = types.alloc(Type::Signature(Signature::default()));

        // ---- builtin scope -------------------------------------------------
        let mut builtins = Vec::new();
        for name in ["echo", "println"] {
            let sig = types.alloc(Type::Signature(Signature {
                has_recv: false,
                params: vec![ParamSpec { name: "args".into(), ty: string }],
                variadic: true,
            }));
            builtins.push(objects.alloc(Object {
                name: name.into(),
                kind: ObjectKind::Func { overloads: Vec::new() },
                ty: sig,
                scope: ScopePath::Builtin,
                owner: None,
                overload_id: None,
                exported: true,
            }));
        }
        for (name, value) in [("true", true), ("false", false)] {
            builtins.push(objects.alloc(Object {
                name: name.into(),
                kind: ObjectKind::Const(ConstValue::Bool(value)),
                ty: untyped_bool,
                scope: ScopePath::Builtin,
                owner: None,
                overload_id: None,
                exported: true,
            }));
        }

        // ---- color constructors (fixed identities) -------------------------
        let ctor = |types: &mut TypeTable, objects: &mut ObjectTable, name: &str, arity: usize| {
            let params = (0..arity)
                .map(|i| ParamSpec {
                    name: SmolStr::from(["c0", "c1", "c2", "c3"][i]),
                    ty: float64,
                })
                .collect();
            let sig = types.alloc(Type::Signature(Signature {
                has_recv: false,
                params,
                variadic: false,
            }));
            objects.alloc(Object {
                name: name.into(),
                kind: ObjectKind::Func { overloads: Vec::new() },
                ty: sig,
                scope: ScopePath::Runtime,
                owner: None,
                overload_id: None,
                exported: true,
            })
        };
        let rgb = ctor(types, objects, "RGB", 3);
        let rgba = ctor(types, objects, "RGBA", 4);
        let hsb = ctor(types, objects, "HSB", 3);
        let hsba = ctor(types, objects, "HSBA", 4);

        // ---- constant groups -----------------------------------------------
        let mut directions = Vec::new();
        for (name, heading) in [
            ("Up", HEADING_UP),
            ("Right", HEADING_RIGHT),
            ("Left", HEADING_LEFT),
            ("Down", HEADING_DOWN),
        ] {
            let id = objects.alloc(Object {
                name: name.into(),
                kind: ObjectKind::Const(ConstValue::Float(heading)),
                ty: direction_type,
                scope: ScopePath::Runtime,
                owner: None,
                overload_id: None,
                exported: true,
            });
            directions.push((id, heading));
        }

        let group = |objects: &mut ObjectTable, names: &[&str], ty: TypeId| -> Vec<ObjectId> {
            names
                .iter()
                .enumerate()
                .map(|(ordinal, &name)| {
                    objects.alloc(Object {
                        name: name.into(),
                        kind: ObjectKind::Const(ConstValue::Int(ordinal as i64)),
                        ty,
                        scope: ScopePath::Runtime,
                        owner: None,
                        overload_id: None,
                        exported: true,
                    })
                })
                .collect()
        };

        let special_objs = group(
            objects,
            &["Mouse", "Edge", "EdgeLeft", "EdgeTop", "EdgeRight", "EdgeBottom"],
            special_obj_type,
        );
        let effect_kinds = group(
            objects,
            &["ColorEffect", "BrightnessEffect", "GhostEffect"],
            effect_kind_type,
        );
        let play_actions = group(
            objects,
            &["PlayRewind", "PlayContinue", "PlayPause", "PlayResume", "PlayStop"],
            play_action_type,
        );
        let rotation_styles = group(objects, &["None", "Normal", "LeftRight"], rotation_style_type);

        let mut key_names: Vec<String> = Vec::new();
        for c in 'A'..='Z' {
            key_names.push(format!("Key{c}"));
        }
        for d in 0..=9 {
            key_names.push(format!("Key{d}"));
        }
        for special in [
            "KeySpace",
            "KeyUp",
            "KeyDown",
            "KeyLeft",
            "KeyRight",
            "KeyEnter",
            "KeyEscape",
            "KeyShift",
            "KeyControl",
        ] {
            key_names.push(special.to_string());
        }
        let key_refs: Vec<&str> = key_names.iter().map(|s| s.as_str()).collect();
        let keys = group(objects, &key_refs, key_type);

        // ---- Game members --------------------------------------------------
        let mut game = MemberBuilder::new(types, objects, "Game", game_type);
        game.method("onStart", &[("handler", handler)]);
        game.method("onClick", &[("handler", handler)]);
        game.method("onKey", &[("key", key_type), ("handler", handler)]);
        game.dispatch(
            "broadcast",
            &[&[("msg", string)], &[("msg", string), ("wait", boolean)]],
        );
        game.dispatch(
            "play",
            &[
                &[("sound", sound_name)],
                &[("sound", sound_name), ("wait", boolean)],
                &[("sound", sound_name), ("action", play_action_type)],
            ],
        );
        game.method("stopAllSounds", &[]);
        game.method("wait", &[("seconds", float64)]);
        game.method("getWidget", &[("name", widget_name)]);
        game.method("startBackdrop", &[("name", backdrop_name)]);
        game.finish();

        // ---- Sprite members ------------------------------------------------
        let mut sprite = MemberBuilder::new(types, objects, "Sprite", sprite_type);
        sprite.method("goto", &[("name", sprite_name)]);
        sprite.method("step", &[("count", float64)]);
        sprite.dispatch(
            "turn",
            &[&[("degrees", float64)], &[("direction", direction_type)]],
        );
        sprite.dispatch(
            "turnTo",
            &[&[("name", sprite_name)], &[("direction", direction_type)]],
        );
        sprite.method("setHeading", &[("direction", direction_type)]);
        sprite.method("changeHeading", &[("delta", float64)]);
        sprite.method("setXYpos", &[("x", float64), ("y", float64)]);
        sprite.dispatch(
            "glide",
            &[
                &[("x", float64), ("y", float64), ("seconds", float64)],
                &[("name", sprite_name), ("seconds", float64)],
            ],
        );
        sprite.dispatch(
            "say",
            &[&[("msg", string)], &[("msg", string), ("seconds", float64)]],
        );
        sprite.method("setCostume", &[("name", costume_name)]);
        sprite.method("animate", &[("name", animation_name)]);
        sprite.method("show", &[]);
        sprite.method("hide", &[]);
        sprite.method("setEffect", &[("kind", effect_kind_type), ("value", float64)]);
        sprite.method("setRotationStyle", &[("style", rotation_style_type)]);
        sprite.method("touching", &[("name", sprite_name)]);
        sprite.dispatch(
            "distanceTo",
            &[&[("name", sprite_name)], &[("obj", special_obj_type)]],
        );
        sprite.method("clone", &[]);
        sprite.method("onCloned", &[("handler", handler)]);
        sprite.method("onTouchStart", &[("handler", handler)]);
        sprite.finish();

        Self {
            game_type,
            sprite_type,
            color_type,
            sprite_name,
            sound_name,
            backdrop_name,
            widget_name,
            costume_name,
            animation_name,
            direction_type,
            key_type,
            effect_kind_type,
            play_action_type,
            special_obj_type,
            rotation_style_type,
            rgb,
            rgba,
            hsb,
            hsba,
            builtins,
            directions,
            special_objs,
            effect_kinds,
            play_actions,
            keys,
            rotation_styles,
        }
    }

    /// The builtin scope, in presentation order.
    pub fn builtins(&self) -> &[ObjectId] {
        &self.builtins
    }

    /// Every runtime-scope package-level name (constructors and constant
    /// groups), in presentation order. Members of `Game`/`Sprite` are not
    /// package-level and are reached through the receiver instead.
    pub fn runtime_names(&self) -> Vec<ObjectId> {
        let mut names = vec![self.rgb, self.rgba, self.hsb, self.hsba];
        names.extend(self.directions.iter().map(|(id, _)| *id));
        names.extend(self.special_objs.iter().copied());
        names.extend(self.effect_kinds.iter().copied());
        names.extend(self.play_actions.iter().copied());
        names.extend(self.keys.iter().copied());
        names.extend(self.rotation_styles.iter().copied());
        names
    }

    /// The color constructor an object identity denotes, if any.
    pub fn color_constructor(&self, object: ObjectId) -> Option<ColorConstructor> {
        if object == self.rgb {
            Some(ColorConstructor::Rgb)
        } else if object == self.rgba {
            Some(ColorConstructor::Rgba)
        } else if object == self.hsb {
            Some(ColorConstructor::Hsb)
        } else if object == self.hsba {
            Some(ColorConstructor::Hsba)
        } else {
            None
        }
    }

    /// The fixed heading of a direction constant, if the object is one.
    pub fn direction_heading(&self, object: ObjectId) -> Option<f64> {
        self.directions
            .iter()
            .find(|(id, _)| *id == object)
            .map(|(_, heading)| *heading)
    }

    pub fn is_special_obj(&self, object: ObjectId) -> bool {
        self.special_objs.contains(&object)
    }

    pub fn is_effect_kind(&self, object: ObjectId) -> bool {
        self.effect_kinds.contains(&object)
    }

    pub fn is_play_action(&self, object: ObjectId) -> bool {
        self.play_actions.contains(&object)
    }

    pub fn is_key(&self, object: ObjectId) -> bool {
        self.keys.contains(&object)
    }

    pub fn is_rotation_style(&self, object: ObjectId) -> bool {
        self.rotation_styles.contains(&object)
    }
}

/// Allocates method objects for one owner type and patches them into the
/// named type's method list on finish.
struct MemberBuilder<'a> {
    types: &'a mut TypeTable,
    objects: &'a mut ObjectTable,
    owner: SmolStr,
    owner_type: TypeId,
    methods: Vec<ObjectId>,
}

impl<'a> MemberBuilder<'a> {
    fn new(
        types: &'a mut TypeTable,
        objects: &'a mut ObjectTable,
        owner: &str,
        owner_type: TypeId,
    ) -> Self {
        Self {
            types,
            objects,
            owner: owner.into(),
            owner_type,
            methods: Vec::new(),
        }
    }

    fn signature(&mut self, params: &[(&str, TypeId)]) -> TypeId {
        let mut all = vec![ParamSpec { name: "recv".into(), ty: self.owner_type }];
        all.extend(params.iter().map(|(name, ty)| ParamSpec {
            name: SmolStr::from(*name),
            ty: *ty,
        }));
        self.types.alloc(Type::Signature(Signature {
            has_recv: true,
            params: all,
            variadic: false,
        }))
    }

    fn alloc_func(
        &mut self,
        name: &str,
        sig: TypeId,
        overloads: Vec<ObjectId>,
        overload_id: Option<SmolStr>,
    ) -> ObjectId {
        self.objects.alloc(Object {
            name: name.into(),
            kind: ObjectKind::Func { overloads },
            ty: sig,
            scope: ScopePath::Runtime,
            owner: Some(self.owner.clone()),
            overload_id,
            exported: true,
        })
    }

    fn method(&mut self, name: &str, params: &[(&str, TypeId)]) -> ObjectId {
        let sig = self.signature(params);
        let id = self.alloc_func(name, sig, Vec::new(), None);
        self.methods.push(id);
        id
    }

    /// An overload-dispatch member plus its concrete overloads. The
    /// dispatch member joins the type's member list; the overloads are
    /// reachable only through it.
    fn dispatch(&mut self, name: &str, overloads: &[&[(&str, TypeId)]]) -> ObjectId {
        let concrete: Vec<ObjectId> = overloads
            .iter()
            .enumerate()
            .map(|(i, params)| {
                let sig = self.signature(params);
                self.alloc_func(name, sig, Vec::new(), Some(SmolStr::from(i.to_string())))
            })
            .collect();
        // The dispatch member's own signature mirrors the first overload.
        let sig = self.objects.get(concrete[0]).ty;
        let id = self.alloc_func(name, sig, concrete, None);
        self.methods.push(id);
        id
    }

    fn finish(self) {
        if let Type::Named(named) = self.types.get_mut(self.owner_type) {
            named.methods = self.methods;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> (TypeTable, ObjectTable, Vocabulary) {
        let mut types = TypeTable::new();
        let mut objects = ObjectTable::new();
        let vocab = Vocabulary::install(&mut types, &mut objects);
        (types, objects, vocab)
    }

    #[test]
    fn test_color_constructor_identity() {
        let (_, _, vocab) = vocab();
        assert_eq!(vocab.color_constructor(vocab.rgb), Some(ColorConstructor::Rgb));
        assert_eq!(vocab.color_constructor(vocab.hsba), Some(ColorConstructor::Hsba));
        assert_eq!(vocab.color_constructor(vocab.builtins()[0]), None);
    }

    #[test]
    fn test_direction_headings() {
        let (_, objects, vocab) = vocab();
        let left = vocab
            .directions
            .iter()
            .find(|(id, _)| objects.get(*id).name == "Left")
            .map(|(id, _)| *id)
            .unwrap();
        assert_eq!(vocab.direction_heading(left), Some(HEADING_LEFT));
    }

    #[test]
    fn test_sprite_members_installed() {
        let (types, objects, vocab) = vocab();
        let sprite = types.as_named(vocab.sprite_type).unwrap();
        let names: Vec<_> = sprite
            .methods
            .iter()
            .map(|&m| objects.get(m).name.clone())
            .collect();
        assert!(names.iter().any(|n| n == "goto"));
        assert!(names.iter().any(|n| n == "turn"));

        let turn = sprite
            .methods
            .iter()
            .copied()
            .find(|&m| objects.get(m).name == "turn")
            .unwrap();
        assert!(objects.get(turn).is_overload_dispatch());
    }

    #[test]
    fn test_key_group_membership() {
        let (_, objects, vocab) = vocab();
        assert!(vocab.keys.iter().any(|&k| objects.get(k).name == "KeySpace"));
        assert!(vocab.keys.iter().any(|&k| objects.get(k).name == "KeyA"));
    }
}
