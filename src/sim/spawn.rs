// ============================================
// Spawn Finder - Поиск безопасной точки появления
// ============================================
// Отбор с отклонением: случайные точки в безопасной подобласти,
// первая вне всех препятствий принимается. Бюджет попыток
// ограничивает стоимость старта и гарантирует завершение.

use rand::rngs::StdRng;
use rand::Rng;
use ultraviolet::Vec3;

use super::registry::ObstacleRegistry;

/// Константы поиска
pub const SPAWN_ATTEMPTS: u32 = 200; // Бюджет попыток
const SPAWN_REGION: f32 = 15.0;      // Полуразмер области поиска по X/Z
const SPAWN_HEIGHT: f32 = 15.0;      // Высота пробных точек

/// Первая случайная точка вне всех препятствий; при исчерпании
/// бюджета — детерминированная запасная точка над пещерой
pub fn find_spawn(registry: &ObstacleRegistry, rng: &mut StdRng, attempts: u32) -> Vec3 {
    for _ in 0..attempts {
        let candidate = Vec3::new(
            rng.gen_range(-SPAWN_REGION..SPAWN_REGION),
            SPAWN_HEIGHT,
            rng.gen_range(-SPAWN_REGION..SPAWN_REGION),
        );
        if !registry.contains_point(candidate) {
            return candidate;
        }
    }
    log::warn!("spawn search exhausted {} attempts, using fallback", attempts);
    Vec3::new(0.0, 25.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_outside_all_obstacles() {
        let mut registry = ObstacleRegistry::new();
        // Бокс накрывает часть области поиска, свободное место остаётся
        registry.push(Obstacle::new(
            Vec3::new(8.0, 15.0, 8.0),
            Vec3::new(10.0, 10.0, 10.0),
            false,
        ));
        let mut rng = StdRng::seed_from_u64(3);
        let point = find_spawn(&registry, &mut rng, SPAWN_ATTEMPTS);
        assert!(!registry.contains_point(point));
    }

    #[test]
    fn test_spawn_fallback_when_region_blocked() {
        let mut registry = ObstacleRegistry::new();
        // Препятствие накрывает всю область поиска на высоте проб
        registry.push(Obstacle::new(
            Vec3::new(0.0, 15.0, 0.0),
            Vec3::new(40.0, 10.0, 40.0),
            false,
        ));
        let mut rng = StdRng::seed_from_u64(3);
        let point = find_spawn(&registry, &mut rng, 50);
        assert_eq!((point.x, point.y, point.z), (0.0, 25.0, 0.0));
    }
}
