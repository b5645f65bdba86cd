// ============================================
// Lidar - Сенсор и журнал попаданий
// ============================================
// Сенсор с кадансом FIRE_RATE выпускает луч со случайным
// отклонением внутри конуса и откладывает затухающий маркер в
// точке попадания. Цвет маркера кодирует дистанцию тепловым
// градиентом: красный (близко) → жёлтый → синий (далеко),
// размер убывает с дистанцией.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ultraviolet::Vec3;

use super::raycast;
use super::registry::ObstacleRegistry;

/// Константы сенсора
pub const FIRE_RATE: f32 = 100.0;       // Выстрелов в секунду
pub const MAX_RAY_DISTANCE: f32 = 30.0; // Дальность луча
pub const SPREAD_ANGLE: f32 = 15.0;     // Полуугол конуса разброса (градусы)
pub const MARKER_LIFETIME: f32 = 5.0;   // Время жизни маркера (секунды)

/// Размер маркера на нулевой и на максимальной дистанции
const MARKER_SIZE_NEAR: f32 = 0.6;
const MARKER_SIZE_FAR: f32 = 0.2;

/// Затухающий маркер попадания
#[derive(Clone, Copy, Debug)]
pub struct HitMarker {
    /// Точка попадания
    pub position: Vec3,
    /// Тепловой цвет (RGB)
    pub color: Vec3,
    /// Визуальный размер: ближние попадания крупнее
    pub size: f32,
    /// Оставшееся время жизни
    pub time_left: f32,
}

/// Журнал попаданий — чистая очередь затухания.
/// Вытеснение только по времени, ёмкость не ограничивается.
pub struct HitLog {
    markers: Vec<HitMarker>,
}

impl HitLog {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    pub fn push(&mut self, marker: HitMarker) {
        self.markers.push(marker);
    }

    /// Живые маркеры для рендера
    pub fn markers(&self) -> &[HitMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Старение: уменьшает время жизни и удаляет истёкшие маркеры
    pub fn update(&mut self, dt: f32) {
        self.markers.retain_mut(|m| {
            m.time_left -= dt;
            m.time_left > 0.0
        });
    }
}

/// Тепловое отображение доли дистанции в цвет.
/// t = 0 — чистый красный, t = 0.5 — жёлтый, t = 1 — синий.
pub fn thermal_color(t: f32) -> Vec3 {
    if t < 0.5 {
        // Красный → жёлтый
        let blend = t * 2.0;
        Vec3::new(1.0, blend, 0.0)
    } else {
        // Жёлтый → синий
        let blend = (t - 0.5) * 2.0;
        Vec3::new(1.0 - blend, 1.0 - blend, blend)
    }
}

/// Сенсор: таймер перезарядки и генератор разброса
pub struct LidarEmitter {
    cooldown: f32,
    rng: StdRng,
}

impl LidarEmitter {
    pub fn new(seed: u64) -> Self {
        Self {
            cooldown: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Тикает таймер перезарядки
    pub fn update(&mut self, dt: f32) {
        self.cooldown -= dt;
    }

    /// Пытается выстрелить из origin вдоль aim. До истечения
    /// перезарядки выстрела нет; после выстрела таймер сбрасывается
    /// на 1/FIRE_RATE независимо от того, нашёл ли луч цель.
    pub fn try_fire(
        &mut self,
        registry: &ObstacleRegistry,
        origin: Vec3,
        aim: Vec3,
    ) -> Option<HitMarker> {
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = 1.0 / FIRE_RATE;

        let direction = self.perturb(aim);
        let hit = raycast::cast(registry, origin, direction, MAX_RAY_DISTANCE)?;

        let t = hit.distance / MAX_RAY_DISTANCE;
        Some(HitMarker {
            position: hit.point,
            color: thermal_color(t),
            size: MARKER_SIZE_NEAR + (MARKER_SIZE_FAR - MARKER_SIZE_NEAR) * t,
            time_left: MARKER_LIFETIME,
        })
    }

    /// Случайное отклонение внутри конуса: рыскание вокруг мировой
    /// вертикали, затем тангаж вокруг мгновенной правой оси взгляда
    fn perturb(&mut self, aim: Vec3) -> Vec3 {
        let spread = SPREAD_ANGLE.to_radians();
        let yaw = self.rng.gen_range(-spread..spread);
        let pitch = self.rng.gen_range(-spread..spread);

        let mut right = aim.cross(Vec3::unit_y());
        if right.mag_sq() < 1e-12 {
            // Взгляд строго вдоль вертикали: правая ось вырождается
            right = Vec3::unit_x();
        } else {
            right = right.normalized();
        }

        let dir = rotate_around(aim, Vec3::unit_y(), yaw);
        rotate_around(dir, right, pitch).normalized()
    }
}

/// Поворот вектора вокруг единичной оси (формула Родрига)
fn rotate_around(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + axis.cross(v) * sin + axis * (axis.dot(v) * (1.0 - cos))
}
