//! Resolving resource-name strings against the asset index.
//!
//! Entity-relative categories (costumes, animations) need an owning
//! sprite; the owner comes from the file's role or, in the program file,
//! from the entity-typed receiver of the enclosing call.

use smol_str::SmolStr;

use crate::hir::TypeInfo;
use crate::project::{FileRole, ResourceKind, ResourceUri, Snapshot};
use crate::syntax::{Node, NodeId, SyntaxTree};

/// The sprite whose assets are in context at `at`.
///
/// In an entity file this is the bound sprite. In the program file it is
/// inferred from the nearest enclosing method-style call whose receiver
/// is entity-typed (`mySprite.setCostume "happy"`).
pub fn sprite_context(
    snapshot: &Snapshot,
    path: &str,
    tree: &SyntaxTree,
    info: &TypeInfo,
    at: NodeId,
) -> Option<SmolStr> {
    match snapshot.role(path) {
        FileRole::Entity(name) => Some(name),
        FileRole::Program => {
            for ancestor in tree.ancestors(at) {
                let Node::CallExpr(call) = tree.node(ancestor) else {
                    continue;
                };
                let Node::SelectorExpr(selector) = tree.node(call.callee) else {
                    continue;
                };
                let recv_ty = match info.type_of(selector.recv) {
                    Some(tv) => tv.ty,
                    None => match info.use_of(selector.recv) {
                        Some(object) => snapshot.objects.get(object).ty,
                        None => continue,
                    },
                };
                if let Some(named) = snapshot.types.as_named(recv_ty) {
                    if named.entity {
                        return Some(named.name.clone());
                    }
                }
            }
            None
        }
    }
}

/// Resolve a resource name at a position. Returns `None` when the name
/// does not match a declared asset or the owning sprite cannot be
/// determined.
pub fn resolve_resource(
    snapshot: &Snapshot,
    path: &str,
    tree: &SyntaxTree,
    info: &TypeInfo,
    at: NodeId,
    kind: ResourceKind,
    name: &str,
) -> Option<ResourceUri> {
    let owner = match kind {
        ResourceKind::Costume | ResourceKind::Animation => {
            Some(sprite_context(snapshot, path, tree, info, at)?)
        }
        _ => None,
    };
    snapshot.assets.lookup(kind, name, owner.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::SnapshotBuilder;
    use crate::syntax::{span, LitKind, TreeBuilder};

    #[test]
    fn test_entity_file_owns_its_costumes() {
        let mut builder = SnapshotBuilder::new();
        builder.assets().add_sprite("MySprite");
        builder.assets().add_costume("MySprite", "happy");

        let mut b = TreeBuilder::new();
        let lit = b.basic_lit(LitKind::String, "\"happy\"", span(11, 18));
        let stmt = b.expr_stmt(lit, span(0, 18));
        let tree = b.finish(vec![stmt], span(0, 18));
        builder.add_file("MySprite.spx", Some(tree), TypeInfo::new());
        let snapshot = builder.finish();

        let file = snapshot.file("MySprite.spx").unwrap();
        let tree = file.tree.as_ref().unwrap();
        let uri = resolve_resource(
            &snapshot,
            "MySprite.spx",
            tree,
            &file.info,
            lit,
            ResourceKind::Costume,
            "happy",
        )
        .unwrap();
        assert_eq!(uri.as_str(), "spx://resources/sprites/MySprite/costumes/happy");
    }

    #[test]
    fn test_program_file_infers_owner_from_receiver() {
        let mut builder = SnapshotBuilder::new();
        builder.assets().add_sprite("MySprite");
        builder.assets().add_costume("MySprite", "happy");
        let entity = builder.declare_entity_type("MySprite");
        let var = builder.declare_global_var("mySprite", entity);

        // mySprite.setCostume "happy"
        let mut b = TreeBuilder::new();
        let recv = b.ident("mySprite", span(0, 8));
        let sel = b.ident("setCostume", span(9, 19));
        let callee = b.selector(recv, sel, span(0, 19));
        let arg = b.basic_lit(LitKind::String, "\"happy\"", span(20, 27));
        let call = b.call(callee, vec![arg], span(0, 27));
        let stmt = b.expr_stmt(call, span(0, 27));
        let tree = b.finish(vec![stmt], span(0, 27));

        let mut info = TypeInfo::new();
        info.record_use(recv, var);
        info.record_type(recv, entity, None);
        builder.add_file("main.spx", Some(tree), info);
        let snapshot = builder.finish();

        let file = snapshot.file("main.spx").unwrap();
        let tree = file.tree.as_ref().unwrap();
        assert_eq!(
            sprite_context(&snapshot, "main.spx", tree, &file.info, arg).as_deref(),
            Some("MySprite")
        );
        // Without an entity receiver there is no owner, so no resolution.
        let mut b2 = TreeBuilder::new();
        let lone = b2.basic_lit(LitKind::String, "\"happy\"", span(0, 7));
        let stmt2 = b2.expr_stmt(lone, span(0, 7));
        let tree2 = b2.finish(vec![stmt2], span(0, 7));
        assert!(resolve_resource(
            &snapshot,
            "main.spx",
            &tree2,
            &TypeInfo::new(),
            lone,
            ResourceKind::Costume,
            "happy",
        )
        .is_none());
    }

    #[test]
    fn test_project_level_kinds_need_no_owner() {
        let mut builder = SnapshotBuilder::new();
        builder.assets().add_sound("bang");
        let mut b = TreeBuilder::new();
        let tree = b.finish(Vec::new(), span(0, 0));
        builder.add_file("main.spx", Some(tree), TypeInfo::new());
        let snapshot = builder.finish();

        let file = snapshot.file("main.spx").unwrap();
        let tree = file.tree.as_ref().unwrap();
        let uri = resolve_resource(
            &snapshot,
            "main.spx",
            tree,
            &file.info,
            tree.root(),
            ResourceKind::Sound,
            "bang",
        )
        .unwrap();
        assert_eq!(uri.as_str(), "spx://resources/sounds/bang");
    }
}
