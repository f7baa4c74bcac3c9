//! A staged two-file project, as the compiler adapter would hand it over.
//!
//! ```text
//! main.spx                         MySprite.spx
//! -----------                      ------------
//! score := 10                      goto "OtherSprite"
//! play "bang"                      setHeading Left
//! wait 0.5                         setEffect ColorEffect, 50.0
//! mySprite.setCostume "happy"      count++
//!                                  tint = RGB(255, 0, 0)
//! ```
//!
//! Assets: sprites `MySprite` (costume `happy`) and `OtherSprite`, sound
//! `bang`. Program globals: `mySprite MySprite`, `count int`, `tint Color`.

use stagescript::hir::{BasicKind, ObjectId, TypeInfo};
use stagescript::ide::AnalysisHost;
use stagescript::project::SnapshotBuilder;
use stagescript::syntax::{span, AssignOp, LitKind, TreeBuilder};

/// Look up a vocabulary member or global by qualified name, skipping
/// concrete overloads (uses resolve to the dispatch member).
pub fn member(builder: &mut SnapshotBuilder, qualified: &str) -> ObjectId {
    builder
        .objects()
        .iter()
        .find(|(_, object)| {
            object.qualified_name() == qualified && object.overload_id.is_none()
        })
        .map(|(id, _)| id)
        .unwrap_or_else(|| panic!("no object named {qualified}"))
}

/// Look up a runtime constant or constructor by name.
pub fn runtime_const(builder: &mut SnapshotBuilder, name: &str) -> ObjectId {
    let names = builder.vocab().runtime_names();
    names
        .into_iter()
        .find(|&id| builder.objects().get(id).name == name)
        .unwrap_or_else(|| panic!("no runtime constant {name}"))
}

/// Build the staged project and install it into a fresh host.
pub fn staged_project() -> AnalysisHost {
    let mut builder = SnapshotBuilder::new();

    builder.assets().add_sprite("MySprite");
    builder.assets().add_costume("MySprite", "happy");
    builder.assets().add_sprite("OtherSprite");
    builder.assets().add_sound("bang");

    let entity_ty = builder.declare_entity_type("MySprite");
    let int = builder.types().basic(BasicKind::Int);
    let color = builder.vocab().color_type;
    let my_sprite_var = builder.declare_global_var("mySprite", entity_ty);
    let count_var = builder.declare_global_var("count", int);
    let tint_var = builder.declare_global_var("tint", color);

    // ---- main.spx ------------------------------------------------------
    let mut b = TreeBuilder::new();
    let mut info = TypeInfo::new();

    let score = b.ident("score", span(0, 5));
    let ten = b.basic_lit(LitKind::Int, "10", span(9, 11));
    let score_stmt = b.assign(AssignOp::Define, vec![score], vec![ten], span(0, 11));
    let score_var = builder.declare_local_var("score", int);
    info.record_def(score, score_var);

    let play = b.ident("play", span(12, 16));
    let bang = b.basic_lit(LitKind::String, "\"bang\"", span(17, 23));
    let play_call = b.call(play, vec![bang], span(12, 23));
    let play_stmt = b.expr_stmt(play_call, span(12, 23));
    info.record_use(play, member(&mut builder, "Game.play"));

    let wait = b.ident("wait", span(24, 28));
    let half = b.basic_lit(LitKind::Float, "0.5", span(29, 32));
    let wait_call = b.call(wait, vec![half], span(24, 32));
    let wait_stmt = b.expr_stmt(wait_call, span(24, 32));
    info.record_use(wait, member(&mut builder, "Game.wait"));

    let recv = b.ident("mySprite", span(33, 41));
    let sel = b.ident("setCostume", span(42, 52));
    let callee = b.selector(recv, sel, span(33, 52));
    let happy = b.basic_lit(LitKind::String, "\"happy\"", span(53, 60));
    let costume_call = b.call(callee, vec![happy], span(33, 60));
    let costume_stmt = b.expr_stmt(costume_call, span(33, 60));
    info.record_use(recv, my_sprite_var);
    info.record_type(recv, entity_ty, None);
    info.record_use(sel, member(&mut builder, "Sprite.setCostume"));

    let main_tree = b.finish(
        vec![score_stmt, play_stmt, wait_stmt, costume_stmt],
        span(0, 61),
    );
    builder.add_file("main.spx", Some(main_tree), info);

    // ---- MySprite.spx --------------------------------------------------
    let mut b = TreeBuilder::new();
    let mut info = TypeInfo::new();

    let goto = b.ident("goto", span(0, 4));
    let other = b.basic_lit(LitKind::String, "\"OtherSprite\"", span(5, 18));
    let goto_call = b.call(goto, vec![other], span(0, 18));
    let goto_stmt = b.expr_stmt(goto_call, span(0, 18));
    info.record_use(goto, member(&mut builder, "Sprite.goto"));

    let set_heading = b.ident("setHeading", span(19, 29));
    let left = b.ident("Left", span(30, 34));
    let heading_call = b.call(set_heading, vec![left], span(19, 34));
    let heading_stmt = b.expr_stmt(heading_call, span(19, 34));
    info.record_use(set_heading, member(&mut builder, "Sprite.setHeading"));
    info.record_use(left, runtime_const(&mut builder, "Left"));

    let set_effect = b.ident("setEffect", span(35, 44));
    let effect = b.ident("ColorEffect", span(45, 56));
    let amount = b.basic_lit(LitKind::Float, "50.0", span(58, 62));
    let effect_call = b.call(set_effect, vec![effect, amount], span(35, 62));
    let effect_stmt = b.expr_stmt(effect_call, span(35, 62));
    info.record_use(set_effect, member(&mut builder, "Sprite.setEffect"));
    info.record_use(effect, runtime_const(&mut builder, "ColorEffect"));

    let count = b.ident("count", span(63, 68));
    let inc_stmt = b.inc_dec(count, true, span(63, 70));
    info.record_use(count, count_var);

    let tint = b.ident("tint", span(71, 75));
    let rgb = b.ident("RGB", span(78, 81));
    let red = b.basic_lit(LitKind::Int, "255", span(82, 85));
    let green = b.basic_lit(LitKind::Int, "0", span(87, 88));
    let blue = b.basic_lit(LitKind::Int, "0", span(90, 91));
    let rgb_call = b.call(rgb, vec![red, green, blue], span(78, 92));
    let tint_stmt = b.assign(AssignOp::Assign, vec![tint], vec![rgb_call], span(71, 92));
    info.record_use(tint, tint_var);
    info.record_use(rgb, builder.vocab().rgb);

    let sprite_tree = b.finish(
        vec![goto_stmt, heading_stmt, effect_stmt, inc_stmt, tint_stmt],
        span(0, 93),
    );
    builder.add_file("MySprite.spx", Some(sprite_tree), info);

    let host = AnalysisHost::new();
    host.set_snapshot(builder.finish());
    host
}
