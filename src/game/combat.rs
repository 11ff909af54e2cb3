use crate::game::ship::Ship;
use crate::geometry::Rect;

pub const PROJECTILE_WIDTH: f32 = 0.4;
pub const PROJECTILE_HEIGHT: f32 = 1.2;
const PROJECTILE_SPEED: f32 = 0.8;
pub const FIRE_COOLDOWN_TICKS: i32 = 40;

#[derive(Clone, Copy, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// -1 = up. Kept signed so the integration rule stays direction-neutral.
    pub dir: f32,
    pub active: bool,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// Spawns a projectile at the ship's muzzle if the reload has elapsed,
/// resetting the cooldown. Left-aligned box, centered under the muzzle.
pub fn fire(ship: &Ship, cooldown: &mut i32) -> Option<Projectile> {
    if *cooldown > 0 {
        return None;
    }
    *cooldown = FIRE_COOLDOWN_TICKS;
    Some(Projectile {
        x: ship.muzzle_x() - PROJECTILE_WIDTH * 0.5,
        y: ship.y - PROJECTILE_HEIGHT,
        dir: -1.0,
        active: true,
    })
}

/// Advances every projectile, then drops the spent ones and those whose
/// trailing edge has left the top of the playfield. Filtering (rather than
/// removing mid-iteration) keeps scan order stable.
pub fn integrate(projectiles: &mut Vec<Projectile>) {
    for p in projectiles.iter_mut() {
        p.y += PROJECTILE_SPEED * p.dir;
    }
    projectiles.retain(|p| p.active && p.y + PROJECTILE_HEIGHT > 0.0);
}

/// Scans live projectiles in collection order for an overlap with `target`.
/// The first match is consumed (deactivated) and the call reports a hit;
/// at most one projectile scores per call.
pub fn resolve_hit(target: &Rect, projectiles: &mut [Projectile]) -> bool {
    for p in projectiles.iter_mut() {
        if p.active && p.rect().overlaps(target) {
            p.active = false;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship() -> Ship {
        Ship::new(80.0, 36.0)
    }

    #[test]
    fn fire_spawns_centered_on_muzzle() {
        let s = ship();
        let mut cooldown = 0;
        let p = fire(&s, &mut cooldown).unwrap();
        assert_eq!(p.x + PROJECTILE_WIDTH * 0.5, s.muzzle_x());
        assert_eq!(p.y, s.y - PROJECTILE_HEIGHT);
        assert_eq!(p.dir, -1.0);
        assert!(p.active);
        assert_eq!(cooldown, FIRE_COOLDOWN_TICKS);
    }

    #[test]
    fn fire_blocked_while_reloading() {
        let s = ship();
        let mut cooldown = 0;
        assert!(fire(&s, &mut cooldown).is_some());
        // Cooldown was reset; the next attempt is a silent no-op.
        assert!(fire(&s, &mut cooldown).is_none());
        assert_eq!(cooldown, FIRE_COOLDOWN_TICKS);
    }

    #[test]
    fn fire_available_again_after_reload() {
        let s = ship();
        let mut cooldown = 0;
        assert!(fire(&s, &mut cooldown).is_some());
        for _ in 0..FIRE_COOLDOWN_TICKS {
            cooldown -= 1;
        }
        assert!(fire(&s, &mut cooldown).is_some());
    }

    #[test]
    fn integrate_moves_up_and_culls_offscreen() {
        let mut projectiles = vec![
            Projectile { x: 10.0, y: 20.0, dir: -1.0, active: true },
            Projectile { x: 12.0, y: -2.0, dir: -1.0, active: true },
        ];
        integrate(&mut projectiles);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].y, 20.0 - PROJECTILE_SPEED);
    }

    #[test]
    fn integrate_drops_inactive() {
        let mut projectiles = vec![Projectile { x: 10.0, y: 20.0, dir: -1.0, active: false }];
        integrate(&mut projectiles);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn resolve_hit_consumes_first_match_only() {
        let target = Rect::new(10.0, 10.0, 4.0, 2.0);
        let mut projectiles = vec![
            Projectile { x: 11.0, y: 10.5, dir: -1.0, active: true },
            Projectile { x: 12.0, y: 10.5, dir: -1.0, active: true },
        ];
        assert!(resolve_hit(&target, &mut projectiles));
        assert!(!projectiles[0].active);
        assert!(projectiles[1].active);
    }

    #[test]
    fn resolve_hit_skips_spent_projectiles() {
        let target = Rect::new(10.0, 10.0, 4.0, 2.0);
        let mut projectiles = vec![Projectile { x: 11.0, y: 10.5, dir: -1.0, active: false }];
        assert!(!resolve_hit(&target, &mut projectiles));
    }

    #[test]
    fn resolve_hit_on_empty_collection_is_no_hit() {
        let target = Rect::new(10.0, 10.0, 4.0, 2.0);
        let mut projectiles: Vec<Projectile> = Vec::new();
        assert!(!resolve_hit(&target, &mut projectiles));
    }

    #[test]
    fn miss_leaves_projectile_untouched() {
        let target = Rect::new(50.0, 10.0, 4.0, 2.0);
        let mut projectiles = vec![Projectile { x: 11.0, y: 10.5, dir: -1.0, active: true }];
        assert!(!resolve_hit(&target, &mut projectiles));
        assert!(projectiles[0].active);
    }
}
