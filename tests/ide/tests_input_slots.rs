//! Input-slot inference over the staged project.

use rstest::rstest;
use stagescript::ide::{
    InputKind, InputSlot, QueryError, SlotKind, SlotValue, TypeCategory,
};
use stagescript::syntax::span;
use stagescript::TextRange;

use crate::helpers::project_fixture::staged_project;

fn slots_of(path: &str) -> Vec<InputSlot> {
    let host = staged_project();
    host.analysis()
        .input_slots(&[path])
        .expect("query should be well-formed")
        .expect("file should have parsed")
}

fn slot_at(slots: &[InputSlot], range: TextRange) -> &InputSlot {
    slots
        .iter()
        .find(|s| s.range == range)
        .unwrap_or_else(|| panic!("no slot at {range:?}"))
}

#[test]
fn test_query_requires_exactly_one_known_document() {
    let host = staged_project();
    let analysis = host.analysis();

    assert!(matches!(
        analysis.input_slots(&[]),
        Err(QueryError::ExpectedOneDocument(0))
    ));
    assert!(matches!(
        analysis.input_slots(&["main.spx", "MySprite.spx"]),
        Err(QueryError::ExpectedOneDocument(2))
    ));
    assert!(matches!(
        analysis.input_slots(&["Ghost.spx"]),
        Err(QueryError::FileNotFound(_))
    ));
    assert!(analysis.input_slots(&["main.spx"]).is_ok());
}

#[test]
fn test_sprite_name_argument_resolves_to_resource_uri() {
    let slots = slots_of("MySprite.spx");
    let slot = slot_at(&slots, span(5, 18));

    assert_eq!(slot.kind, SlotKind::Value);
    assert_eq!(slot.accept, TypeCategory::ResourceName);
    assert_eq!(slot.input.ty, TypeCategory::ResourceName);
    match &slot.input.value {
        Some(SlotValue::Resource(uri)) => {
            assert_eq!(uri.as_str(), "spx://resources/sprites/OtherSprite");
        }
        other => panic!("expected resource value, got {other:?}"),
    }
}

#[test]
fn test_costume_owner_inferred_from_entity_receiver() {
    // `mySprite.setCostume "happy"` in the program file: the owning
    // sprite comes from the receiver's entity type.
    let slots = slots_of("main.spx");
    let slot = slot_at(&slots, span(53, 60));

    match &slot.input.value {
        Some(SlotValue::Resource(uri)) => {
            assert_eq!(
                uri.as_str(),
                "spx://resources/sprites/MySprite/costumes/happy"
            );
        }
        other => panic!("expected resource value, got {other:?}"),
    }
}

#[test]
fn test_direction_constant_folds_to_heading() {
    let slots = slots_of("MySprite.spx");
    let slot = slot_at(&slots, span(30, 34));

    assert_eq!(slot.accept, TypeCategory::Direction);
    assert_eq!(slot.input.kind, InputKind::InPlace);
    assert_eq!(slot.input.value, Some(SlotValue::Decimal(-90.0)));
}

#[test]
fn test_effect_constant_carried_by_name() {
    let slots = slots_of("MySprite.spx");
    let slot = slot_at(&slots, span(45, 56));

    assert_eq!(slot.accept, TypeCategory::EffectKind);
    assert_eq!(slot.input.ty, TypeCategory::EffectKind);
    assert_eq!(
        slot.input.value,
        Some(SlotValue::Constant("ColorEffect".into()))
    );
}

#[test]
fn test_inc_dec_target_is_address_slot() {
    let slots = slots_of("MySprite.spx");
    let slot = slot_at(&slots, span(63, 68));

    assert_eq!(slot.kind, SlotKind::Address);
    assert_eq!(slot.input.kind, InputKind::Predefined);
    assert_eq!(slot.input.ty, TypeCategory::Unknown);
    assert_eq!(slot.input.name.as_deref(), Some("count"));
    // Assignable names only: globals yes, constants and members no.
    assert!(slot.predefined_names.contains(&"count".into()));
    assert!(slot.predefined_names.contains(&"tint".into()));
    assert!(!slot.predefined_names.contains(&"Left".into()));
}

#[test]
fn test_color_call_folds_to_single_color_slot() {
    let slots = slots_of("MySprite.spx");
    let slot = slot_at(&slots, span(78, 92));

    assert_eq!(slot.accept, TypeCategory::Color);
    match &slot.input.value {
        Some(SlotValue::Color(color)) => {
            assert_eq!(color.constructor.name(), "RGB");
            assert_eq!(color.args, vec![255.0, 0.0, 0.0]);
        }
        other => panic!("expected color value, got {other:?}"),
    }
    // The component literals are consumed by the fold.
    assert!(slots.iter().all(|s| s.range != span(82, 85)));
}

#[test]
fn test_predefined_names_filtered_by_category() {
    let slots = slots_of("MySprite.spx");

    // The direction slot offers direction-typed names.
    let direction = slot_at(&slots, span(30, 34));
    for expected in ["Up", "Right", "Left", "Down"] {
        assert!(
            direction.predefined_names.contains(&expected.into()),
            "missing {expected}"
        );
    }
    assert!(!direction.predefined_names.contains(&"count".into()));

    // The effect slot offers the effect constants.
    let effect = slot_at(&slots, span(45, 56));
    assert!(effect.predefined_names.contains(&"GhostEffect".into()));
    assert!(!effect.predefined_names.contains(&"Left".into()));
}

#[rstest]
#[case::sound_name(span(17, 23), TypeCategory::ResourceName)]
#[case::seconds(span(29, 32), TypeCategory::Decimal)]
fn test_program_file_slot_categories(
    #[case] range: TextRange,
    #[case] accept: TypeCategory,
) {
    let slots = slots_of("main.spx");
    assert_eq!(slot_at(&slots, range).accept, accept);
}

#[test]
fn test_sound_argument_resolves_against_project_assets() {
    let slots = slots_of("main.spx");
    let slot = slot_at(&slots, span(17, 23));
    match &slot.input.value {
        Some(SlotValue::Resource(uri)) => {
            assert_eq!(uri.as_str(), "spx://resources/sounds/bang");
        }
        other => panic!("expected resource value, got {other:?}"),
    }
}

#[test]
fn test_slots_are_reported_in_source_order() {
    for path in ["main.spx", "MySprite.spx"] {
        let slots = slots_of(path);
        assert!(!slots.is_empty(), "{path} should have slots");
        let starts: Vec<u32> = slots.iter().map(|s| s.range.start().into()).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted, "{path} slots out of order");
    }
}
