use arena_shooter::compute::init_state;
use arena_shooter::config::GameConfig;
use arena_shooter::entities::*;
use arena_shooter::motion::*;

fn make_state() -> GameState {
    init_state(GameConfig::arena(), 0) // player at (400, 300)
}

fn enemy(x: f32, y: f32, speed: u32) -> Enemy {
    Enemy { x, y, size: 15.0, speed }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_moves_by_speed_per_held_key() {
    let mut s = make_state();
    let input = InputState { up: true, right: true, ..InputState::default() };
    move_player(&mut s, &input);
    assert_eq!((s.player.x, s.player.y), (405.0, 295.0));
}

#[test]
fn opposite_keys_cancel() {
    let mut s = make_state();
    let input = InputState { left: true, right: true, ..InputState::default() };
    move_player(&mut s, &input);
    assert_eq!(s.player.x, 400.0);
}

#[test]
fn player_clamped_to_arena() {
    let mut s = make_state();
    s.player.x = 2.0;
    s.player.y = 598.0;
    let input = InputState { left: true, down: true, ..InputState::default() };
    move_player(&mut s, &input);
    assert_eq!((s.player.x, s.player.y), (0.0, 600.0));
}

#[test]
fn rotation_steps_and_wraps() {
    let mut s = make_state();
    let left = InputState { rotate_left: true, ..InputState::default() };
    move_player(&mut s, &left);
    assert_eq!(s.player.angle, 355.0);

    let right = InputState { rotate_right: true, ..InputState::default() };
    move_player(&mut s, &right);
    move_player(&mut s, &right);
    assert_eq!(s.player.angle, 5.0);
}

// ── Bullets & power-ups ───────────────────────────────────────────────────────

#[test]
fn bullets_advance_by_velocity() {
    let mut s = make_state();
    let id = s.bullets.add(Bullet { x: 100.0, y: 100.0, dx: 0.0, dy: -10.0 });
    advance_bullets(&mut s);
    let b = s.bullets.get(id).unwrap();
    assert_eq!((b.x, b.y), (100.0, 90.0));
}

#[test]
fn power_ups_fall_at_fixed_speed() {
    let mut s = make_state();
    let id = s.power_ups.add(PowerUp {
        x: 50.0,
        y: 10.0,
        size: 10.0,
        speed: 2.0,
        kind: PowerUpKind::Bomb,
    });
    advance_power_ups(&mut s);
    assert_eq!(s.power_ups.get(id).unwrap().y, 12.0);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_steps_toward_player() {
    let mut s = make_state();
    // straight left of the player, 3-4-5 triangle on the diagonal one
    let a = s.enemies.add(enemy(100.0, 300.0, 2));
    let b = s.enemies.add(enemy(100.0, 700.0, 5));
    advance_enemies(&mut s);

    let ea = s.enemies.get(a).unwrap();
    assert_eq!((ea.x, ea.y), (102.0, 300.0));

    let eb = s.enemies.get(b).unwrap();
    assert!((eb.x - 103.0).abs() < 1e-4);
    assert!((eb.y - 696.0).abs() < 1e-4);
}

#[test]
fn enemy_on_top_of_player_does_not_move() {
    let mut s = make_state();
    let id = s.enemies.add(enemy(400.0, 300.0, 3));
    advance_enemies(&mut s);
    let e = s.enemies.get(id).unwrap();
    assert_eq!((e.x, e.y), (400.0, 300.0));
    assert!(e.x.is_finite() && e.y.is_finite());
}

#[test]
fn non_finite_enemy_is_skipped_not_spread() {
    let mut s = make_state();
    let bad = s.enemies.add(enemy(f32::NAN, 10.0, 2));
    let good = s.enemies.add(enemy(100.0, 300.0, 2));
    advance_enemies(&mut s);
    assert!(s.enemies.get(bad).unwrap().x.is_nan());
    assert_eq!(s.enemies.get(good).unwrap().x, 102.0);
}

// ── Culling ───────────────────────────────────────────────────────────────────

#[test]
fn cull_removes_escaped_entities() {
    let mut s = make_state();
    s.bullets.add(Bullet { x: 801.0, y: 10.0, dx: 10.0, dy: 0.0 });
    let kept = s.bullets.add(Bullet { x: 800.0, y: 10.0, dx: 10.0, dy: 0.0 });
    s.power_ups.add(PowerUp {
        x: 10.0,
        y: 601.0,
        size: 10.0,
        speed: 2.0,
        kind: PowerUpKind::RapidFire,
    });
    // within the 50-unit margin, then beyond it
    let near = s.enemies.add(enemy(-40.0, 10.0, 1));
    s.enemies.add(enemy(-60.0, 10.0, 1));

    assert_eq!(cull_out_of_bounds(&mut s), 3);
    assert_eq!(s.bullets.ids(), vec![kept]);
    assert!(s.power_ups.is_empty());
    assert_eq!(s.enemies.ids(), vec![near]);
}
