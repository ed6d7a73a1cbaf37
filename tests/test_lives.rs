use space_invaders::entities::ShipKind;
use space_invaders::lives::LivesPool;
use space_invaders::GameError;

#[test]
fn exactly_n_lives_can_be_used() {
    for n in 1..=5 {
        let mut pool = LivesPool::new(n);
        assert_eq!(pool.lives_count(), n);
        for used in 1..=n {
            assert!(pool.has_lives_remaining());
            assert!(pool.use_life().is_ok());
            assert_eq!(pool.lives_count(), n - used);
        }
        assert!(!pool.has_lives_remaining());
        assert_eq!(pool.use_life(), Err(GameError::NoLivesRemaining));
    }
}

#[test]
fn zero_request_clamps_to_one_life() {
    let mut pool = LivesPool::new(0);
    assert_eq!(pool.lives_count(), 1);
    assert!(pool.use_life().is_ok());
    assert!(pool.use_life().is_err());
}

#[test]
fn use_life_hands_out_fresh_player_ships() {
    let mut pool = LivesPool::new(2);
    let first = pool.current().map(|s| s.id());
    let next = pool.use_life().expect("life available");
    assert_eq!(next.kind(), ShipKind::Player);
    assert_ne!(Some(next.id()), first);
    assert_eq!(pool.current().map(|s| s.id()), Some(next.id()));
}

#[test]
fn exhausted_pool_stays_exhausted() {
    let mut pool = LivesPool::new(1);
    pool.use_life().expect("life available");
    for _ in 0..3 {
        assert!(pool.use_life().is_err());
        assert_eq!(pool.lives_count(), 0);
    }
}
