// ============================================
// Player - Кинематика агента от первого лица
// ============================================
// Позиция агента — точка глаз. Вертикаль интегрируется с
// гравитацией и разрешается через полосы контакта; горизонтальный
// шаг отвергается целиком при любом пересечении, скольжения вдоль
// стен нет.

use ultraviolet::Vec3;

use super::config::WORLD_SIZE;
use super::registry::ObstacleRegistry;

/// Константы агента
pub const PLAYER_HEIGHT: f32 = 1.3;  // Высота глаз над опорой
pub const PLAYER_RADIUS: f32 = 1.3;  // Радиус хитбокса
pub const MOVE_SPEED: f32 = 16.0;    // Скорость ходьбы
pub const GRAVITY: f32 = 30.0;       // Ускорение свободного падения
pub const JUMP_VELOCITY: f32 = 12.0; // Начальная скорость прыжка

/// Предел тангажа (примерно ±85°)
const PITCH_LIMIT: f32 = 1.48;
/// Отступ от нижней грани при ударе головой
const CEILING_GAP: f32 = 0.1;

/// Агент — физическое состояние от первого лица
pub struct Player {
    /// Позиция глаз
    pub position: Vec3,
    /// Вертикальная скорость
    pub velocity_y: f32,
    /// Рыскание (радианы)
    pub yaw: f32,
    /// Тангаж (радианы)
    pub pitch: f32,
    /// Стоит ли агент на опоре
    pub on_ground: bool,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: false,
        }
    }

    /// Направление взгляда
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalized()
    }

    /// Горизонтальное направление движения (без тангажа)
    pub fn forward_horizontal(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin()).normalized()
    }

    /// Горизонтальный вектор вправо
    pub fn right_horizontal(&self) -> Vec3 {
        self.forward_horizontal().cross(Vec3::unit_y()).normalized()
    }
}

/// Контроллер агента — намерения ввода и разрешение движения
pub struct PlayerController {
    // Флаги направлений движения
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,

    /// Команда прыжка; потребляется на ближайшем тике
    pub jump: bool,
    /// Зажат ли спуск сенсора
    pub fire: bool,

    // Накопленная дельта взгляда
    look_dx: f32,
    look_dy: f32,

    /// Чувствительность взгляда
    pub sensitivity: f32,
}

impl PlayerController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            jump: false,
            fire: false,
            look_dx: 0.0,
            look_dy: 0.0,
            sensitivity,
        }
    }

    /// Накопить дельту взгляда (вызывается внешним сборщиком ввода)
    pub fn add_look_delta(&mut self, dx: f32, dy: f32) {
        self.look_dx += dx;
        self.look_dy += dy;
    }

    /// Один тик кинематики: взгляд, горизонтальный шаг, прыжок,
    /// гравитация с вертикальным разрешением
    pub fn update(&mut self, player: &mut Player, dt: f32, registry: &ObstacleRegistry) {
        // === Взгляд ===
        player.yaw += self.look_dx * self.sensitivity;
        player.pitch =
            (player.pitch - self.look_dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.look_dx = 0.0;
        self.look_dy = 0.0;

        // === Горизонтальный шаг ===
        let forward = player.forward_horizontal();
        let right = player.right_horizontal();

        let mut move_dir = Vec3::zero();
        if self.forward {
            move_dir += forward;
        }
        if self.backward {
            move_dir -= forward;
        }
        if self.right {
            move_dir += right;
        }
        if self.left {
            move_dir -= right;
        }

        // Нулевое намерение — шаг не выполняется и не нормируется
        if move_dir.mag_sq() > 0.0 {
            let step = move_dir.normalized() * MOVE_SPEED * dt;
            let mut candidate = player.position + step;
            candidate.x = candidate.x.clamp(-WORLD_SIZE + PLAYER_RADIUS, WORLD_SIZE - PLAYER_RADIUS);
            candidate.z = candidate.z.clamp(-WORLD_SIZE + PLAYER_RADIUS, WORLD_SIZE - PLAYER_RADIUS);
            // Весь шаг отвергается при любом пересечении, скольжения нет
            if !registry.collides_3d(candidate, PLAYER_RADIUS, PLAYER_HEIGHT) {
                player.position.x = candidate.x;
                player.position.z = candidate.z;
            }
        }

        // === Прыжок ===
        // Строго по флагу опоры на начало тика: двойного прыжка нет
        if self.jump {
            if player.on_ground {
                player.velocity_y = JUMP_VELOCITY;
                player.on_ground = false;
            }
            self.jump = false;
        }

        // === Гравитация и вертикальное разрешение ===
        player.velocity_y -= GRAVITY * dt;
        let new_y = player.position.y + player.velocity_y * dt;
        let test_pos = Vec3::new(player.position.x, new_y, player.position.z);

        let falling = player.velocity_y < 0.0;
        if let Some(ob) = registry.vertical_overlap(test_pos, PLAYER_RADIUS, falling) {
            if falling {
                // Приземление: глаза на высоте опоры
                player.position.y = ob.max.y + PLAYER_HEIGHT;
                player.velocity_y = 0.0;
                player.on_ground = true;
            } else {
                // Удар головой: прижимаемся под нижнюю грань,
                // состояние опоры не меняется
                player.position.y = ob.min.y - CEILING_GAP;
                player.velocity_y = 0.0;
            }
        } else {
            player.position.y = new_y;
            // Пол мира
            if player.position.y <= PLAYER_HEIGHT {
                player.position.y = PLAYER_HEIGHT;
                player.velocity_y = 0.0;
                player.on_ground = true;
            } else {
                player.on_ground = false;
            }
        }
    }
}
