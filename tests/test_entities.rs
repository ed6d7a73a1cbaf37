use space_invaders::entities::*;

#[test]
fn enums_compare_and_copy() {
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    let kind = ShipKind::Enemy { level: 2 };
    let copy = kind;
    assert_eq!(kind, copy);
}

#[test]
fn status_is_over_for_both_endings() {
    assert!(!GameStatus::Playing.is_over());
    assert!(GameStatus::GameOver.is_over());
    assert!(GameStatus::Victory.is_over());
}

#[test]
fn enemy_kind_clamps_level_up_to_one() {
    assert_eq!(ShipKind::enemy(0), ShipKind::Enemy { level: 1 });
    assert_eq!(ShipKind::enemy(4), ShipKind::Enemy { level: 4 });
}

#[test]
fn tiers_follow_level_table() {
    assert_eq!(ShipKind::enemy(1).tier(), Tier::Level1);
    assert_eq!(ShipKind::enemy(2).tier(), Tier::Level2);
    assert_eq!(ShipKind::enemy(3).tier(), Tier::Level3);
    assert_eq!(ShipKind::enemy(4).tier(), Tier::Default);
    assert_eq!(ShipKind::enemy(9).tier(), Tier::Default);
    assert_eq!(ShipKind::Player.tier(), Tier::Player);
    assert_eq!(ShipKind::Bonus.tier(), Tier::Bonus);
}

#[test]
fn default_tier_keeps_level_three_stats_but_raw_level() {
    let level3 = Ship::new(ShipKind::enemy(3));
    let level7 = Ship::new(ShipKind::enemy(7));
    assert_eq!(level7.width(), level3.width());
    assert_eq!(level7.height(), level3.height());
    assert_eq!(level7.speed_x(), level3.speed_x());
    assert_eq!(level7.level(), 7);
}

#[test]
fn player_and_bonus_are_level_zero() {
    assert_eq!(Ship::new(ShipKind::Player).level(), 0);
    assert_eq!(Ship::new(ShipKind::Bonus).level(), 0);
}

#[test]
fn minted_ships_get_distinct_ids() {
    let a = Ship::new(ShipKind::enemy(1));
    let b = Ship::new(ShipKind::enemy(1));
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
}

#[test]
fn new_ship_starts_out_of_play() {
    let ship = Ship::new(ShipKind::Player);
    assert!(!ship.active);
    assert!(!ship.destroyed);
    assert_eq!((ship.x, ship.y), (0.0, 0.0));
}

#[test]
fn ship_moves_by_its_speed() {
    let mut ship = Ship::new(ShipKind::enemy(1));
    ship.x = 100.0;
    ship.move_right();
    assert_eq!(ship.x, 100.0 + ship.speed_x());
    ship.move_left();
    ship.move_left();
    assert_eq!(ship.x, 100.0 - ship.speed_x());
}

#[test]
fn center_x_is_half_the_width_in() {
    let mut ship = Ship::new(ShipKind::Player);
    ship.x = 10.0;
    assert_eq!(ship.center_x(), 10.0 + ship.width() / 2.0);
}

#[test]
fn bullets_travel_in_owner_direction() {
    let mut up = Bullet::new(BulletOwner::Player, 50.0, 100.0);
    let mut down = Bullet::new(BulletOwner::Enemy, 50.0, 100.0);
    up.advance();
    down.advance();
    assert_eq!(up.y, 100.0 - BULLET_SPEED_Y);
    assert_eq!(down.y, 100.0 + BULLET_SPEED_Y);
    assert_eq!(up.x, 50.0);
    assert_eq!(down.x, 50.0);
}

#[test]
fn bullet_bottom_edge() {
    let bullet = Bullet::new(BulletOwner::Enemy, 0.0, 30.0);
    assert_eq!(bullet.bottom(), 30.0 + bullet.height());
}
