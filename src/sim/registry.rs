// ============================================
// Obstacle Registry - Набор препятствий пещеры
// ============================================
// Заполняется один раз компилятором пещеры, после генерации только
// читается. Порядок вставки наблюдаем: при равных дистанциях луча
// побеждает препятствие, добавленное раньше (интерьер раньше
// оболочки).

use ultraviolet::Vec3;

use super::obstacle::Obstacle;
use super::raycast::ray_aabb;

pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
        }
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Список препятствий для рендера (центр, полуразмеры, флаг границы)
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Первое препятствие, чей расширенный бокс содержит точку по X/Z
    pub fn horizontal_overlap(&self, point: Vec3, radius: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|ob| ob.horizontal_overlap(point, radius))
    }

    /// Первое препятствие с вертикальным контактом
    /// (полоса приземления при check_below, иначе полоса потолка)
    pub fn vertical_overlap(
        &self,
        point: Vec3,
        radius: f32,
        check_below: bool,
    ) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|ob| ob.vertical_overlap(point, radius, check_below))
    }

    /// Пересекает ли тело агента (радиус/высота) хоть одно препятствие
    pub fn collides_3d(&self, point: Vec3, radius: f32, height: f32) -> bool {
        self.obstacles
            .iter()
            .any(|ob| ob.collides_3d(point, radius, height))
    }

    /// Лежит ли точка внутри какого-либо препятствия
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.obstacles.iter().any(|ob| ob.contains(point))
    }

    /// Ближайшее пересечение луча среди всех препятствий.
    /// Строгое `<` сохраняет победу раннего препятствия при равных
    /// дистанциях; попадание ровно на max_distance отбрасывается.
    pub fn intersect_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<(&Obstacle, f32)> {
        let mut closest = max_distance;
        let mut hit = None;
        for ob in &self.obstacles {
            if let Some(dist) = ray_aabb(origin, direction, ob.min, ob.max, max_distance) {
                if dist < closest {
                    closest = dist;
                    hit = Some((ob, dist));
                }
            }
        }
        hit
    }
}
