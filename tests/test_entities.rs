use arena_shooter::compute::init_state;
use arena_shooter::config::GameConfig;
use arena_shooter::entities::*;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(GameOverCause::Killed, GameOverCause::TimeUp);
    assert_ne!(PowerUpKind::RapidFire, PowerUpKind::Bomb);

    let kind = PowerUpKind::Bomb;
    assert_eq!(kind.clone(), PowerUpKind::Bomb);
    assert!(!InputState::default().fire);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::arena(), 0);
    let mut cloned = original.clone();

    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.add(Enemy { x: 5.0, y: 5.0, size: 15.0, speed: 1 });

    assert_eq!(original.player.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
