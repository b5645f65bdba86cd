// ============================================
// Obstacle - Осевой твёрдый объём пещеры
// ============================================
// Создаётся один раз при компиляции пещеры, далее неизменен.
// Все проверки столкновений — бокс против точки/цилиндра агента,
// без поворотов.

use ultraviolet::Vec3;

/// Зазор над точкой глаз при проверке перекрытия вертикальных интервалов
pub const HEAD_MARGIN: f32 = 0.5;

// Полосы вертикального контакта. Значения подобраны эмпирически:
// глубина не должна пропускать быстрое падение сквозь тонкий бокс
// за тик, вынос не должен цеплять соседний бокс без касания.
/// Насколько полоса контакта утоплена внутрь грани
const BAND_SINK: f32 = 0.5;
/// Насколько полоса контакта выступает наружу от грани
const BAND_REACH: f32 = 2.0;

/// Непрозрачный осевой параллелепипед — твёрдая ячейка пещеры
/// или лист ограждающей оболочки
#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    /// Центр объёма
    pub center: Vec3,
    /// Полуразмеры по осям
    pub half_extents: Vec3,
    /// Минимальный угол AABB
    pub min: Vec3,
    /// Максимальный угол AABB
    pub max: Vec3,
    /// Принадлежит ли ограждающей оболочке (стены/потолок)
    pub is_boundary: bool,
}

impl Obstacle {
    /// size — полные размеры по осям
    pub fn new(center: Vec3, size: Vec3, is_boundary: bool) -> Self {
        let half = size * 0.5;
        Self {
            center,
            half_extents: half,
            min: center - half,
            max: center + half,
            is_boundary,
        }
    }

    /// Попадает ли точка в бокс, расширенный на radius по X/Z
    #[inline]
    pub fn horizontal_overlap(&self, point: Vec3, radius: f32) -> bool {
        let dx = (point.x - self.center.x).abs();
        let dz = (point.z - self.center.z).abs();
        dx <= self.half_extents.x + radius && dz <= self.half_extents.z + radius
    }

    /// Вертикальный контакт: тонкая полоса у верхней грани
    /// (приземление, check_below) или у нижней (удар головой)
    pub fn vertical_overlap(&self, point: Vec3, radius: f32, check_below: bool) -> bool {
        if !self.horizontal_overlap(point, radius) {
            return false;
        }
        if check_below {
            point.y >= self.max.y - BAND_SINK && point.y <= self.max.y + BAND_REACH
        } else {
            point.y <= self.min.y + BAND_SINK && point.y >= self.min.y - BAND_REACH
        }
    }

    /// Полная проверка тела: горизонтальное расширение плюс перекрытие
    /// вертикального интервала агента [point.y - height, point.y + HEAD_MARGIN]
    /// с интервалом бокса [min.y, max.y]
    pub fn collides_3d(&self, point: Vec3, radius: f32, height: f32) -> bool {
        if !self.horizontal_overlap(point, radius) {
            return false;
        }
        let agent_bottom = point.y - height;
        let agent_top = point.y + HEAD_MARGIN;
        !(agent_top < self.min.y || agent_bottom > self.max.y)
    }

    /// Лежит ли точка внутри бокса (границы включительно)
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collides_3d_containment() {
        // Бокс 4x4x4 в начале координат, радиус агента 1:
        // пересечение ровно при |x| <= 3, |z| <= 3 и вертикальном перекрытии
        let ob = Obstacle::new(Vec3::zero(), Vec3::new(4.0, 4.0, 4.0), false);
        assert!(ob.collides_3d(Vec3::new(3.0, 1.0, 0.0), 1.0, 1.3));
        assert!(ob.collides_3d(Vec3::new(-3.0, 1.0, 3.0), 1.0, 1.3));
        assert!(!ob.collides_3d(Vec3::new(3.1, 1.0, 0.0), 1.0, 1.3));
        assert!(!ob.collides_3d(Vec3::new(0.0, 1.0, -3.1), 1.0, 1.3));
        // Вертикально разнесены: агент высоко над боксом
        assert!(!ob.collides_3d(Vec3::new(0.0, 10.0, 0.0), 1.0, 1.3));
        // и глубоко под ним
        assert!(!ob.collides_3d(Vec3::new(0.0, -3.0, 0.0), 1.0, 1.3));
    }

    #[test]
    fn test_vertical_overlap_bands() {
        // Бокс с верхней гранью на y = 6 и нижней на y = 4
        let ob = Obstacle::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(4.0, 2.0, 4.0), false);
        // Полоса приземления: 5.5..=8.0
        assert!(ob.vertical_overlap(Vec3::new(0.0, 6.5, 0.0), 1.0, true));
        assert!(ob.vertical_overlap(Vec3::new(0.0, 5.5, 0.0), 1.0, true));
        assert!(!ob.vertical_overlap(Vec3::new(0.0, 8.5, 0.0), 1.0, true));
        // Полоса потолка: 2.0..=4.5
        assert!(ob.vertical_overlap(Vec3::new(0.0, 4.4, 0.0), 1.0, false));
        assert!(ob.vertical_overlap(Vec3::new(0.0, 2.0, 0.0), 1.0, false));
        assert!(!ob.vertical_overlap(Vec3::new(0.0, 5.0, 0.0), 1.0, false));
        // Вне горизонтальной проекции контакта нет
        assert!(!ob.vertical_overlap(Vec3::new(10.0, 6.5, 0.0), 1.0, true));
    }

    #[test]
    fn test_contains_inclusive() {
        let ob = Obstacle::new(Vec3::zero(), Vec3::new(2.0, 2.0, 2.0), false);
        assert!(ob.contains(Vec3::zero()));
        assert!(ob.contains(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!ob.contains(Vec3::new(1.01, 0.0, 0.0)));
    }
}
