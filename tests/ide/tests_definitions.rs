//! Position-sensitive definition resolution over the staged project.

use stagescript::base::TextSize;
use stagescript::hir::ScopePath;
use stagescript::ide::Definition;

use crate::helpers::project_fixture::staged_project;

fn names_of(defs: &[Definition]) -> Vec<&str> {
    defs.iter().map(|d| d.name.as_str()).collect()
}

#[test]
fn test_builtins_and_runtime_names_visible_everywhere() {
    let host = staged_project();
    let analysis = host.analysis();

    for path in ["main.spx", "MySprite.spx"] {
        let defs = analysis.definitions(path, TextSize::from(0));
        let names = names_of(&defs);
        assert!(names.contains(&"echo"), "{path} missing echo");
        assert!(names.contains(&"println"), "{path} missing println");
        assert!(names.contains(&"Left"), "{path} missing Left");
        assert!(names.contains(&"KeySpace"), "{path} missing KeySpace");
        assert!(names.contains(&"RGB"), "{path} missing RGB");
    }
}

#[test]
fn test_receiver_members_follow_file_role() {
    let host = staged_project();
    let analysis = host.analysis();

    let program = analysis.definitions("main.spx", TextSize::from(12));
    let program_names = names_of(&program);
    assert!(program_names.contains(&"Game.onStart"));
    assert!(program_names.contains(&"Game.broadcast"));
    assert!(!program_names.contains(&"Sprite.goto"));

    let entity = analysis.definitions("MySprite.spx", TextSize::from(0));
    let entity_names = names_of(&entity);
    assert!(entity_names.contains(&"Sprite.goto"));
    assert!(entity_names.contains(&"Sprite.onCloned"));
    assert!(!entity_names.contains(&"Game.broadcast"));
}

#[test]
fn test_dispatch_members_expand_per_overload() {
    let host = staged_project();
    let analysis = host.analysis();

    let defs = analysis.definitions("main.spx", TextSize::from(12));
    let plays: Vec<_> = defs.iter().filter(|d| d.name == "Game.play").collect();
    assert_eq!(plays.len(), 3);
    assert!(plays.iter().all(|d| d.scope == ScopePath::Runtime));
    let ids: Vec<_> = plays
        .iter()
        .map(|d| d.overload_id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["0", "1", "2"]);

    // Plain members stay single, without an overload id.
    let waits: Vec<_> = defs.iter().filter(|d| d.name == "Game.wait").collect();
    assert_eq!(waits.len(), 1);
    assert!(waits[0].overload_id.is_none());
}

#[test]
fn test_file_local_declaration_gated_by_position() {
    let host = staged_project();
    let analysis = host.analysis();

    // `score := 10` spans 0..11; inside it the name is not yet visible.
    let before = analysis.definitions("main.spx", TextSize::from(5));
    assert!(!names_of(&before).contains(&"score"));

    let after = analysis.definitions("main.spx", TextSize::from(12));
    let defs = names_of(&after);
    assert!(defs.contains(&"score"));
}

#[test]
fn test_program_globals_visible_in_entity_file() {
    let host = staged_project();
    let analysis = host.analysis();

    let defs = analysis.definitions("MySprite.spx", TextSize::from(63));
    let names = names_of(&defs);
    assert!(names.contains(&"count"));
    assert!(names.contains(&"tint"));
    // The declared entity type itself is a program-level name.
    assert!(names.contains(&"MySprite"));
}

#[test]
fn test_unknown_file_still_gets_position_independent_scopes() {
    let host = staged_project();
    let analysis = host.analysis();

    let defs = analysis.definitions("Ghost.spx", TextSize::from(0));
    let names = names_of(&defs);
    assert!(names.contains(&"echo"));
    assert!(names.contains(&"count"));
    // No receiver scope without a known file.
    assert!(!names.contains(&"Game.onStart"));
}
