use arena_shooter::compute::init_state;
use arena_shooter::config::{EnemySpawn, GameConfig};
use arena_shooter::entities::*;
use arena_shooter::spawner::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

// ── Interval ──────────────────────────────────────────────────────────────────

#[test]
fn interval_fires_once_per_period() {
    let mut t = Interval::starting_at(0, 1000);
    assert_eq!(t.poll(999), 0);
    assert_eq!(t.poll(1000), 1);
    assert_eq!(t.poll(1500), 0);
    assert_eq!(t.next_due_ms, 2000);
}

#[test]
fn interval_catches_up_after_a_gap() {
    let mut t = Interval::starting_at(0, 1000);
    assert_eq!(t.poll(3500), 3);
    assert_eq!(t.next_due_ms, 4000);
}

#[test]
fn timers_follow_config() {
    let arena = SpawnTimers::for_config(&GameConfig::arena());
    assert!(arena.enemy.is_none());
    assert!(arena.power_up.is_some());

    let timed = SpawnTimers::for_config(&GameConfig::timed());
    assert_eq!(timed.enemy, Some(Interval { period_ms: 1000, next_due_ms: 1000 }));
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn five_enemies_spawn_away_from_centre_player() {
    // 800×600 arena, player at (400, 300)
    let mut s = init_state(GameConfig::arena(), 0);
    assert_eq!((s.player.x, s.player.y), (400.0, 300.0));

    let spawned = spawn_enemies(&mut s, &mut seeded_rng());
    assert_eq!(spawned, 5);
    assert_eq!(s.enemies.len(), 5);
    for (_, e) in s.enemies.iter() {
        assert!(distance(e.x, e.y, 400.0, 300.0) >= 200.0);
        assert!(e.x >= 0.0 && e.x <= 800.0);
        assert!(e.y >= 0.0 && e.y <= 600.0);
    }
}

#[test]
fn placement_respects_distance_for_many_seeds() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (x, y) = place_away_from(&mut rng, 800.0, 600.0, 120.0, 80.0, 200.0);
        assert!(distance(x, y, 120.0, 80.0) >= 200.0, "seed {seed}: ({x}, {y})");
    }
}

#[test]
fn placement_falls_back_to_far_corner() {
    // Only a sliver of the arena is far enough; the fallback must still hold.
    let mut rng = seeded_rng();
    let (x, y) = place_away_from(&mut rng, 401.0, 401.0, 0.0, 0.0, 565.0);
    assert!(distance(x, y, 0.0, 0.0) >= 565.0);

    // Nothing in the arena is far enough: the corner is still returned.
    let (x, y) = place_away_from(&mut rng, 100.0, 100.0, 10.0, 90.0, 500.0);
    assert_eq!((x, y), (100.0, 0.0));
}

#[test]
fn enemy_speed_within_configured_range() {
    let mut s = init_state(GameConfig::arena(), 0);
    spawn_enemies(&mut s, &mut seeded_rng());
    for (_, e) in s.enemies.iter() {
        assert!((1..=3).contains(&e.speed));
        assert_eq!(e.size, 15.0);
    }
}

// ── Policies ──────────────────────────────────────────────────────────────────

#[test]
fn top_up_only_fills_missing_slots() {
    let mut s = init_state(GameConfig::arena(), 0);
    let mut rng = seeded_rng();
    spawn_enemies(&mut s, &mut rng);
    let first = s.enemies.ids()[0];
    s.enemies.remove(first);
    assert_eq!(spawn_enemies(&mut s, &mut rng), 1);
    assert_eq!(s.enemies.len(), 5);
    assert_eq!(spawn_enemies(&mut s, &mut rng), 0);
}

#[test]
fn top_up_never_exceeds_cap() {
    let cfg = GameConfig {
        max_enemies: 10,
        enemy_cap: 4,
        ..GameConfig::arena()
    };
    let mut s = init_state(cfg, 0);
    spawn_enemies(&mut s, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 4);
}

#[test]
fn interval_policy_spawns_on_top_edge() {
    let mut s = init_state(GameConfig::timed(), 0);
    let mut rng = seeded_rng();

    s.elapsed_ms = 999;
    assert_eq!(spawn_enemies(&mut s, &mut rng), 0);

    s.elapsed_ms = 1000;
    assert_eq!(spawn_enemies(&mut s, &mut rng), 1);
    let (_, e) = s.enemies.iter().next().unwrap();
    assert_eq!(e.y, 0.0);
    assert!(e.x >= 15.0 && e.x <= 785.0);
}

#[test]
fn interval_policy_respects_cap() {
    let cfg = GameConfig {
        enemy_spawn: EnemySpawn::Interval { period_ms: 100 },
        enemy_cap: 2,
        ..GameConfig::timed()
    };
    let mut s = init_state(cfg, 0);
    s.elapsed_ms = 1000; // ten periods due
    assert_eq!(spawn_enemies(&mut s, &mut seeded_rng()), 2);
    assert_eq!(s.enemies.len(), 2);
}

#[test]
fn power_up_dropped_each_period() {
    let mut s = init_state(GameConfig::arena(), 0);
    let mut rng = seeded_rng();
    s.elapsed_ms = 7_999;
    assert_eq!(spawn_power_ups(&mut s, &mut rng), 0);
    s.elapsed_ms = 8_000;
    assert_eq!(spawn_power_ups(&mut s, &mut rng), 1);
    let (_, pu) = s.power_ups.iter().next().unwrap();
    assert_eq!(pu.y, 0.0);
    assert_eq!(pu.speed, 2.0);
}

#[test]
fn power_ups_disabled_without_interval() {
    let cfg = GameConfig {
        power_up_interval_ms: None,
        ..GameConfig::arena()
    };
    let mut s = init_state(cfg, 0);
    s.elapsed_ms = 1_000_000;
    assert_eq!(spawn_power_ups(&mut s, &mut seeded_rng()), 0);
}

#[test]
fn nothing_spawns_after_game_over() {
    let mut s = init_state(GameConfig::arena(), 0);
    s.status = GameStatus::GameOver;
    s.elapsed_ms = 100_000;
    assert_eq!(run(&mut s, &mut seeded_rng()), 0);
    assert!(s.enemies.is_empty());
    assert!(s.power_ups.is_empty());
}
