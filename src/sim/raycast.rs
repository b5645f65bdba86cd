// ============================================
// Raycast - Пересечение луча с миром (slab-метод)
// ============================================
// Луч проверяется против пола мира на y = 0 и всех препятствий
// реестра; возвращается ближайшее попадание. Ускоряющих структур
// нет; сетка или BVH могут заменить линейный проход за тем же
// контрактом.

use ultraviolet::Vec3;

use super::config::WORLD_SIZE;
use super::registry::ObstacleRegistry;

/// Компонент направления меньше этого — луч параллелен оси
const PARALLEL_EPS: f32 = 1e-8;

/// Попадание луча
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// Точка попадания в мировых координатах
    pub point: Vec3,
    /// Дистанция вдоль луча
    pub distance: f32,
}

/// Сужение параметрического интервала по одной оси.
/// Луч, параллельный оси и вне слэба, отбрасывается; внутри слэба
/// ось интервал не ограничивает.
fn narrow_interval(
    origin: f32,
    direction: f32,
    min: f32,
    max: f32,
    t_min: f32,
    t_max: f32,
) -> Option<(f32, f32)> {
    if direction.abs() < PARALLEL_EPS {
        if origin < min || origin > max {
            return None;
        }
        return Some((t_min, t_max));
    }
    let inv_d = 1.0 / direction;
    let mut t1 = (min - origin) * inv_d;
    let mut t2 = (max - origin) * inv_d;
    if t1 > t2 {
        std::mem::swap(&mut t1, &mut t2);
    }
    let new_min = t1.max(t_min);
    let new_max = t2.min(t_max);
    if new_max < new_min {
        return None;
    }
    Some((new_min, new_max))
}

/// Slab-метод: пересечение луча с AABB. Интервал стартует с
/// [0, max_distance] и сужается по осям. Дистанция попадания —
/// t_min при t_min >= 0, иначе t_max (начало луча внутри бокса);
/// от этой политики зависит, регистрирует ли попадания сенсор,
/// утопленный в геометрию.
pub fn ray_aabb(
    origin: Vec3,
    direction: Vec3,
    min: Vec3,
    max: Vec3,
    max_distance: f32,
) -> Option<f32> {
    let (t_min, t_max) = narrow_interval(origin.x, direction.x, min.x, max.x, 0.0, max_distance)?;
    let (t_min, t_max) = narrow_interval(origin.y, direction.y, min.y, max.y, t_min, t_max)?;
    let (t_min, t_max) = narrow_interval(origin.z, direction.z, min.z, max.z, t_min, t_max)?;

    if t_max < 0.0 {
        return None;
    }
    let hit = if t_min >= 0.0 { t_min } else { t_max };
    if hit <= max_distance {
        Some(hit)
    } else {
        None
    }
}

/// Ближайшее попадание луча: пол мира на y = 0 (в пределах
/// WORLD_SIZE по X/Z) и все препятствия реестра
pub fn cast(
    registry: &ObstacleRegistry,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    let mut closest = max_distance;
    let mut found = false;

    // Пол мира
    if direction.y != 0.0 {
        let t = -origin.y / direction.y;
        if t > 0.0 && t < closest {
            let p = origin + direction * t;
            if p.x.abs() <= WORLD_SIZE && p.z.abs() <= WORLD_SIZE {
                closest = t;
                found = true;
            }
        }
    }

    // Препятствия
    if let Some((_, dist)) = registry.intersect_ray(origin, direction, max_distance) {
        if dist < closest {
            closest = dist;
            found = true;
        }
    }

    if found {
        Some(RayHit {
            point: origin + direction * closest,
            distance: closest,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::Obstacle;

    fn single_box(center: Vec3, size: Vec3) -> ObstacleRegistry {
        let mut registry = ObstacleRegistry::new();
        registry.push(Obstacle::new(center, size, false));
        registry
    }

    #[test]
    fn test_slab_axis_hit_distance() {
        // Бокс в 10 единицах по X: попадание на дистанции 10 - 2
        let registry = single_box(Vec3::new(10.0, 2.0, 0.0), Vec3::new(4.0, 4.0, 4.0));
        let hit = cast(
            &registry,
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            30.0,
        )
        .unwrap();
        assert!((hit.distance - 8.0).abs() < 1e-4);
        assert!((hit.point.x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_parallel_outside_misses() {
        let registry = single_box(Vec3::new(0.0, 2.0, 0.0), Vec3::new(4.0, 4.0, 4.0));
        // Луч идёт параллельно боксу выше него и выше пола
        let hit = cast(
            &registry,
            Vec3::new(-20.0, 10.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            30.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_nearest_hit_selection() {
        let mut registry = ObstacleRegistry::new();
        registry.push(Obstacle::new(
            Vec3::new(20.0, 2.0, 0.0),
            Vec3::new(4.0, 4.0, 4.0),
            false,
        ));
        registry.push(Obstacle::new(
            Vec3::new(10.0, 2.0, 0.0),
            Vec3::new(4.0, 4.0, 4.0),
            false,
        ));
        let (ob, dist) = registry
            .intersect_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 30.0)
            .unwrap();
        // Выбирается минимальная из двух дистанций
        assert!((dist - 8.0).abs() < 1e-4);
        assert!((ob.center.x - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_insertion_order_breaks_ties() {
        let mut registry = ObstacleRegistry::new();
        registry.push(Obstacle::new(
            Vec3::new(10.0, 2.0, 1.0),
            Vec3::new(4.0, 4.0, 4.0),
            false,
        ));
        registry.push(Obstacle::new(
            Vec3::new(10.0, 2.0, -1.0),
            Vec3::new(4.0, 4.0, 4.0),
            false,
        ));
        // Обе передние грани на x = 8: побеждает добавленный раньше
        let (ob, _) = registry
            .intersect_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 30.0)
            .unwrap();
        assert!((ob.center.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_floor_hit_within_world() {
        let registry = ObstacleRegistry::new();
        let hit = cast(
            &registry,
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            30.0,
        )
        .unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-4);
        assert!(hit.point.y.abs() < 1e-4);
    }

    #[test]
    fn test_floor_outside_world_misses() {
        let registry = ObstacleRegistry::new();
        // Точка пересечения с плоскостью лежит за границей мира
        let hit = cast(
            &registry,
            Vec3::new(100.0, 5.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            30.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_origin_inside_box_reports_hit() {
        let registry = single_box(Vec3::new(0.0, 2.0, 0.0), Vec3::new(4.0, 4.0, 4.0));
        // Сенсор утоплен в геометрию: попадание на нулевой дистанции
        let hit = cast(
            &registry,
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            30.0,
        )
        .unwrap();
        assert!(hit.distance.abs() < 1e-6);
    }
}
