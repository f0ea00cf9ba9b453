//! Damage falloff rules for blasts and weapon hits.

use horde_core::constants::{SHOTGUN_CLOSE_RANGE_BONUS, SHOTGUN_CLOSE_RANGE_FRACTION};
use horde_core::enums::WeaponKind;

/// Blast damage at `distance` from the origin: full at the center, linear
/// falloff to zero at the radius, never negative.
pub fn blast_damage(explosion_damage: f64, explosion_radius: f64, distance: f64) -> u32 {
    if explosion_radius <= 0.0 {
        return 0;
    }
    let falloff = 1.0 - distance / explosion_radius;
    (explosion_damage * falloff).round().max(0.0) as u32
}

/// Damage of a weapon hit at `distance`, falling off linearly to zero at `range`.
pub fn weapon_damage(kind: WeaponKind, base_damage: u32, distance: f64, range: f64) -> u32 {
    if range <= 0.0 {
        return 0;
    }
    let falloff = (1.0 - distance / range).clamp(0.0, 1.0);
    let mut damage = (base_damage as f64 * falloff).round();

    if kind == WeaponKind::Shotgun && distance < range * SHOTGUN_CLOSE_RANGE_FRACTION {
        damage = (damage * SHOTGUN_CLOSE_RANGE_BONUS).round();
    }

    damage.max(0.0) as u32
}
