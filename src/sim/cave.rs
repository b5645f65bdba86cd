// ============================================
// Cave Compiler - Компиляция шума в твёрдые объёмы
// ============================================
// Обходит целочисленную решётку, сэмплирует двухоктавный шум и
// превращает ячейки выше порога в осевые боксы со случайным
// дрожанием размера. Затем объём замыкается оболочкой из четырёх
// стен и потолка.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ultraviolet::Vec3;

use super::noise;
use super::obstacle::Obstacle;
use super::registry::ObstacleRegistry;

/// Параметры генерации пещеры
#[derive(Clone, Copy)]
pub struct CaveParams {
    /// Полуразмер решётки по X/Z
    pub lattice_extent: i32,
    /// Высота решётки по Y
    pub lattice_height: i32,
    /// Шаг решётки
    pub cell_size: i32,
    /// Частота базовой октавы
    pub base_scale: f32,
    /// Частота детальной октавы
    pub detail_scale: f32,
    /// Порог твёрдости: выше порог — разреженнее пещера
    pub threshold: f32,
    /// Амплитуда дрожания размера ячейки (доля от cell_size)
    pub jitter: f32,
    /// Толщина листов оболочки
    pub wall_thickness: f32,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            lattice_extent: 20,
            lattice_height: 30,
            cell_size: 2,
            base_scale: 0.1,
            detail_scale: 0.25,
            threshold: 0.3,
            jitter: 0.3,
            wall_thickness: 2.0,
        }
    }
}

/// Компилирует шумовое поле в реестр препятствий.
/// Интерьер добавляется раньше оболочки: порядок вставки наблюдаем
/// при разрешении равноудалённых попаданий луча.
pub fn compile(params: &CaveParams, seed: u64) -> ObstacleRegistry {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut registry = ObstacleRegistry::new();

    // Интерьер: ячейки решётки с шумом выше порога становятся боксами
    let step = params.cell_size as usize;
    for x in (-params.lattice_extent..=params.lattice_extent).step_by(step) {
        for y in (0..=params.lattice_height).step_by(step) {
            for z in (-params.lattice_extent..=params.lattice_extent).step_by(step) {
                let n = noise::sample_combined(
                    x as f32,
                    y as f32,
                    z as f32,
                    params.base_scale,
                    params.detail_scale,
                );
                if n > params.threshold {
                    let size = Vec3::new(
                        jittered(params, &mut rng),
                        jittered(params, &mut rng),
                        jittered(params, &mut rng),
                    );
                    registry.push(Obstacle::new(
                        Vec3::new(x as f32, y as f32, z as f32),
                        size,
                        false,
                    ));
                }
            }
        }
    }

    let interior = registry.len();
    push_shell(params, &mut registry);

    log::info!(
        "cave compiled: {} interior + {} boundary obstacles",
        interior,
        registry.len() - interior
    );
    registry
}

/// Размер ячейки со случайным дрожанием по одной оси
fn jittered(params: &CaveParams, rng: &mut StdRng) -> f32 {
    let variation = if params.jitter > 0.0 {
        rng.gen_range(-params.jitter..params.jitter)
    } else {
        0.0
    };
    params.cell_size as f32 * (1.0 + variation)
}

/// Замкнутая оболочка: четыре стены и потолок, агенту из объёма
/// не выбраться. Оболочка есть всегда, даже если порог не оставил
/// ни одной твёрдой ячейки интерьера.
fn push_shell(params: &CaveParams, registry: &mut ObstacleRegistry) {
    let extent = params.lattice_extent as f32;
    let height = params.lattice_height as f32;
    let cell = params.cell_size as f32;
    let thickness = params.wall_thickness;

    // Стены стоят на два шага решётки снаружи интерьера и перекрывают
    // углы; по высоте выступают на шаг за решётку
    let wall_offset = extent + 2.0 * cell;
    let span = 2.0 * wall_offset + thickness;
    let wall_height = height + cell;
    let wall_center_y = height * 0.5;

    // Передняя и задняя стены
    registry.push(Obstacle::new(
        Vec3::new(0.0, wall_center_y, -wall_offset),
        Vec3::new(span, wall_height, thickness),
        true,
    ));
    registry.push(Obstacle::new(
        Vec3::new(0.0, wall_center_y, wall_offset),
        Vec3::new(span, wall_height, thickness),
        true,
    ));
    // Левая и правая
    registry.push(Obstacle::new(
        Vec3::new(-wall_offset, wall_center_y, 0.0),
        Vec3::new(thickness, wall_height, span),
        true,
    ));
    registry.push(Obstacle::new(
        Vec3::new(wall_offset, wall_center_y, 0.0),
        Vec3::new(thickness, wall_height, span),
        true,
    ));
    // Потолок
    registry.push(Obstacle::new(
        Vec3::new(0.0, height + 2.0 * cell, 0.0),
        Vec3::new(span, thickness, span),
        true,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_deterministic() {
        let params = CaveParams::default();
        let a = compile(&params, 42);
        let b = compile(&params, 42);
        assert_eq!(a.len(), b.len());
        for (oa, ob) in a.obstacles().iter().zip(b.obstacles()) {
            assert_eq!(oa.center.x, ob.center.x);
            assert_eq!(oa.center.y, ob.center.y);
            assert_eq!(oa.center.z, ob.center.z);
            assert_eq!(oa.half_extents.x, ob.half_extents.x);
            assert_eq!(oa.half_extents.y, ob.half_extents.y);
            assert_eq!(oa.half_extents.z, ob.half_extents.z);
            assert_eq!(oa.is_boundary, ob.is_boundary);
        }
    }

    #[test]
    fn test_high_threshold_leaves_shell_only() {
        // Недостижимый порог: интерьера нет, но оболочка из четырёх
        // стен и потолка всегда на месте
        let params = CaveParams {
            threshold: 10.0,
            ..Default::default()
        };
        let registry = compile(&params, 42);
        assert_eq!(registry.len(), 5);
        assert!(registry.obstacles().iter().all(|ob| ob.is_boundary));
    }

    #[test]
    fn test_interior_precedes_shell() {
        let registry = compile(&CaveParams::default(), 42);
        assert!(!registry.is_empty());
        let first_boundary = registry
            .obstacles()
            .iter()
            .position(|ob| ob.is_boundary)
            .unwrap();
        // После первого граничного — только граничные, и их ровно пять
        assert!(registry.obstacles()[first_boundary..]
            .iter()
            .all(|ob| ob.is_boundary));
        assert_eq!(registry.len() - first_boundary, 5);
    }

    #[test]
    fn test_jitter_bounded() {
        let params = CaveParams::default();
        let registry = compile(&params, 7);
        let cell = params.cell_size as f32;
        for ob in registry.obstacles().iter().filter(|ob| !ob.is_boundary) {
            for half in [ob.half_extents.x, ob.half_extents.y, ob.half_extents.z] {
                let size = half * 2.0;
                assert!(size >= cell * (1.0 - params.jitter));
                assert!(size <= cell * (1.0 + params.jitter));
            }
        }
    }
}
