//! # Scene Scenario Tests
//!
//! End-to-end runs of the level state machine against real sprite files and
//! a temporary save directory:
//!
//! 1. **Transition**: level 1 hands over once the lead warrior leaves the screen
//! 2. **Collision**: a rock kills one running warrior and is pruned
//! 3. **Autosave**: exactly one write, then the flag stays set
//!
//! Run with: cargo test -p stonefall_sim --test scenarios

mod common;

use common::World;
use stonefall_sim::constants::{LEVEL1_SAVE_FILE, LEVEL2_SAVE_FILE};
use stonefall_sim::{LifeState, Scene, Services};

const DT: f32 = 1.0 / 60.0;

fn run(scene: &mut Scene, services: &mut Services, seconds: f32, dt: f32) {
    let frames = (seconds / dt).round() as usize;
    for _ in 0..frames {
        scene.update(dt, services);
    }
}

// ============================================================================
// SCENARIO A: LEVEL TRANSITION
// ============================================================================

#[test]
fn verify_spawn_layout() {
    let world = World::new(1);
    let mut services = world.services();
    let scene = Scene::start(&mut services);

    assert_eq!(scene.level_number(), 1);
    assert_eq!(scene.warriors().len(), 10);
    for (i, &handle) in scene.warriors().iter().enumerate() {
        let warrior = services.warriors.get(handle).unwrap();
        assert!((warrior.x() + 100.0).abs() < f32::EPSILON);
        assert!((warrior.y() - (10.0 + 100.0 * i as f32)).abs() < 1e-4);
        assert!((80.0..100.0).contains(&warrior.speed()));
        assert_eq!(warrior.state(), LifeState::Running);
    }
    // Every warrior holds a loaded run sheet.
    let first = services.warriors.get(scene.warriors()[0]).unwrap();
    assert!(services.sprites.get(first.run_sprite().unwrap()).unwrap().is_loaded());
    assert_eq!(services.sprites.cache().len(), 2);
}

#[test]
fn verify_transition_after_lead_leaves_screen() {
    let world = World::new(2);
    let mut services = world.services();
    let mut scene = Scene::start(&mut services);

    // Nobody can cover 2020 px in 20 s below 100 px/s.
    run(&mut scene, &mut services, 20.0, DT);
    assert!(!scene.should_transition(&services));

    // Everybody has by 26 s (slowest needs 25.25 s).
    run(&mut scene, &mut services, 6.0, DT);
    assert!(scene.should_transition(&services));
    assert!(!scene.should_quit(&services));

    let handed_over = scene.warriors().to_vec();
    assert!(scene.transition(&mut services));
    assert_eq!(scene.level_number(), 2);
    assert_eq!(scene.warriors(), handed_over.as_slice());
    assert_eq!(scene.rocks().len(), 10);
    assert!(scene.game_time().abs() < f32::EPSILON);
    assert!(!scene.is_auto_saved());

    // Level 2 never transitions.
    assert!(!scene.should_transition(&services));
    assert!(!scene.transition(&mut services));
}

#[test]
fn verify_level2_quits_when_lead_already_off_screen() {
    let world = World::new(3);
    let mut services = world.services();
    let mut scene = Scene::start(&mut services);
    run(&mut scene, &mut services, 26.0, DT);
    scene.transition(&mut services);

    assert!(scene.should_quit(&services));
}

// ============================================================================
// SCENARIO B: COLLISION AND PRUNING
// ============================================================================

fn level2(world: &World) -> (Services, Scene) {
    let mut services = world.services();
    let mut scene = Scene::start(&mut services);
    scene.transition(&mut services);
    (services, scene)
}

#[test]
fn verify_rock_kills_first_running_warrior() {
    let world = World::new(4);
    let (mut services, mut scene) = level2(&world);
    let rock = scene.rocks()[0];
    let first = scene.warriors()[0];
    let second = scene.warriors()[1];

    services.warriors.get_mut(first).unwrap().set_position(100.0, 100.0);
    services.warriors.get_mut(second).unwrap().set_position(100.0, 100.0);
    services.rocks.get_mut(rock).unwrap().set_position(120.0, 120.0);

    scene.update(0.001, &mut services);

    assert_eq!(services.warriors.get(first).unwrap().state(), LifeState::Dying);
    assert_eq!(services.warriors.get(second).unwrap().state(), LifeState::Running);

    // The spent rock is pruned and back in its pool on the same frame.
    assert_eq!(scene.rocks().len(), 9);
    assert!(!scene.rocks().contains(&rock));
    assert!(services.rocks.get(rock).is_none());
    assert_eq!(services.rocks.in_use(), 9);
}

#[test]
fn verify_second_rock_spares_already_dying_warrior() {
    let world = World::new(13);
    let (mut services, mut scene) = level2(&world);
    let (first_rock, second_rock) = (scene.rocks()[0], scene.rocks()[1]);
    let victim = scene.warriors()[0];

    services.warriors.get_mut(victim).unwrap().set_position(100.0, 100.0);
    services.rocks.get_mut(first_rock).unwrap().set_position(120.0, 120.0);
    services.rocks.get_mut(second_rock).unwrap().set_position(130.0, 130.0);

    scene.update(0.001, &mut services);

    // The first rock in sequence claims the warrior; the second finds no
    // running target and keeps falling.
    assert_eq!(services.warriors.get(victim).unwrap().state(), LifeState::Dying);
    assert!(services.rocks.get(first_rock).is_none());
    assert!(services.rocks.get(second_rock).unwrap().is_active());
    assert_eq!(scene.rocks().len(), 9);
    assert_eq!(scene.rocks()[0], second_rock);
    let others_running = scene.warriors()[1..]
        .iter()
        .all(|&h| services.warriors.get(h).unwrap().state() == LifeState::Running);
    assert!(others_running);
}

#[test]
fn verify_dying_warrior_is_pruned_when_dead() {
    let world = World::new(5);
    let (mut services, mut scene) = level2(&world);
    let rock = scene.rocks()[0];
    let victim = scene.warriors()[0];

    services.warriors.get_mut(victim).unwrap().set_position(100.0, 100.0);
    services.rocks.get_mut(rock).unwrap().set_position(120.0, 120.0);
    scene.update(0.001, &mut services);
    assert_eq!(scene.warriors().len(), 10);

    // Eight death frames at no less than 4.8 fps finish inside 2 s.
    run(&mut scene, &mut services, 2.0, DT);

    assert_eq!(scene.warriors().len(), 9);
    assert!(!scene.warriors().contains(&victim));
    assert!(services.warriors.get(victim).is_none());
}

#[test]
fn verify_touching_rock_does_not_collide() {
    let world = World::new(6);
    let (mut services, mut scene) = level2(&world);
    let rock = scene.rocks()[0];
    let warrior = scene.warriors()[0];

    // Warrior spans y 100..215.2 after scaling; rock sits right below it.
    services.warriors.get_mut(warrior).unwrap().set_position(100.0, 100.0);
    let below = 100.0 + 64.0 * 1.8;
    services.rocks.get_mut(rock).unwrap().set_position(110.0, below);
    scene.update(0.0, &mut services);

    assert_eq!(services.warriors.get(warrior).unwrap().state(), LifeState::Running);
    assert!(services.rocks.get(rock).unwrap().is_active());
}

#[test]
fn verify_quit_when_no_warrior_left_alive() {
    let world = World::new(7);
    let (mut services, mut scene) = level2(&world);
    for &handle in scene.warriors() {
        let warrior = services.warriors.get_mut(handle).unwrap();
        warrior.set_position(0.0, warrior.y());
        warrior.start_death();
    }
    assert!(!scene.should_quit(&services));

    run(&mut scene, &mut services, 2.0, DT);
    assert!(scene.warriors().is_empty());
    assert!(scene.should_quit(&services));
    assert_eq!(services.warriors.in_use(), 0);
}

// ============================================================================
// SCENARIO C: AUTOSAVE
// ============================================================================

#[test]
fn verify_level1_autosaves_once_and_verifies() {
    let world = World::new(8);
    let mut services = world.services();
    let mut scene = Scene::start(&mut services);
    let path = world.save_file(LEVEL1_SAVE_FILE);
    let spawned = scene.warriors().to_vec();

    // 0.25 is exact in binary, so 20 steps land on 5.0.
    run(&mut scene, &mut services, 4.75, 0.25);
    assert!(!scene.is_auto_saved());
    assert!(!path.exists());

    scene.update(0.25, &mut services);
    assert!(scene.is_auto_saved());
    assert!(path.exists());
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 21 + 10 * 32);

    // The reloaded warriors became the live state; the originals went back.
    assert_eq!(scene.warriors().len(), 10);
    assert!(scene.warriors().iter().all(|h| !spawned.contains(h)));
    assert!(spawned.iter().all(|&h| services.warriors.get(h).is_none()));
    assert_eq!(services.warriors.in_use(), 10);
    assert!((scene.game_time() - 5.0).abs() < f32::EPSILON);

    std::fs::remove_file(&path).unwrap();
    run(&mut scene, &mut services, 5.0, 0.25);
    assert!(scene.is_auto_saved());
    assert!(!path.exists());
}

#[test]
fn verify_level2_autosaves_once_without_reload() {
    let world = World::new(9);
    let (mut services, mut scene) = level2(&world);
    let warriors = scene.warriors().to_vec();
    let path = world.save_file(LEVEL2_SAVE_FILE);

    run(&mut scene, &mut services, 5.0, 0.25);
    assert!(scene.is_auto_saved());
    assert!(path.exists());
    // No reload: every live handle is one that was handed over.
    assert!(scene.warriors().iter().all(|h| warriors.contains(h)));

    std::fs::remove_file(&path).unwrap();
    run(&mut scene, &mut services, 1.0, 0.25);
    assert!(!path.exists());
}

#[test]
fn verify_failed_autosave_keeps_state() {
    let mut world = World::new(10);
    let blocker = world.dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    world.config.save_dir = blocker.join("saves");

    let mut services = world.services();
    let mut scene = Scene::start(&mut services);
    let spawned = scene.warriors().to_vec();

    run(&mut scene, &mut services, 5.0, 0.25);
    assert!(scene.is_auto_saved());
    assert_eq!(scene.warriors(), spawned.as_slice());
}

// ============================================================================
// SAVE FILES
// ============================================================================

#[test]
fn verify_save_and_load_level2() {
    let world = World::new(11);
    let (mut services, mut scene) = level2(&world);
    run(&mut scene, &mut services, 1.5, DT);

    let path = world.dir.path().join("manual.bin");
    scene.save_to(&path, &services).unwrap();
    let loaded = Scene::load_from(&path, &mut services).unwrap();

    assert_eq!(loaded.level_number(), 2);
    assert_eq!(loaded.game_time().to_bits(), scene.game_time().to_bits());
    assert_eq!(loaded.rocks().len(), scene.rocks().len());
    assert_eq!(loaded.to_bytes(&services).unwrap(), scene.to_bytes(&services).unwrap());

    // Restored sprites are reloaded from disk, not copied.
    let warrior = services.warriors.get(loaded.warriors()[0]).unwrap();
    let sprite = services.sprites.get(warrior.run_sprite().unwrap()).unwrap();
    assert!(sprite.is_loaded());
}

#[test]
fn verify_load_missing_file_fails() {
    let world = World::new(12);
    let mut services = world.services();
    assert!(Scene::load_from(&world.dir.path().join("nope.bin"), &mut services).is_err());
    assert_eq!(services.warriors.in_use(), 0);
}
