// ============================================
// Simulation - Состояние и цикл симуляции
// ============================================
// Связывает подсистемы в порядок тика: ввод → кинематика → сенсор →
// старение маркеров. Генерация выполняется один раз при создании,
// после неё реестр только читается.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::cave::{self, CaveParams};
use super::lidar::{HitLog, LidarEmitter};
use super::player::{Player, PlayerController};
use super::registry::ObstacleRegistry;
use super::spawn::{self, SPAWN_ATTEMPTS};

/// Чувствительность взгляда по умолчанию (радианы на единицу дельты)
const DEFAULT_SENSITIVITY: f32 = 0.0025;

/// Всё состояние симуляции в одном месте
pub struct Simulation {
    pub registry: ObstacleRegistry,
    pub player: Player,
    pub controller: PlayerController,
    pub lidar: LidarEmitter,
    pub hit_log: HitLog,
}

impl Simulation {
    /// Генерация мира и размещение агента.
    /// Потоки случайности у генерации, спауна и сенсора раздельные:
    /// они не влияют на воспроизводимость друг друга.
    pub fn new(seed: u64) -> Self {
        let started = Instant::now();

        let registry = cave::compile(&CaveParams::default(), seed);

        let mut spawn_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let spawn_point = spawn::find_spawn(&registry, &mut spawn_rng, SPAWN_ATTEMPTS);

        log::info!(
            "world ready: {} obstacles, spawn at ({:.1}, {:.1}, {:.1}), took {:?}",
            registry.len(),
            spawn_point.x,
            spawn_point.y,
            spawn_point.z,
            started.elapsed()
        );

        Self {
            registry,
            player: Player::new(spawn_point),
            controller: PlayerController::new(DEFAULT_SENSITIVITY),
            lidar: LidarEmitter::new(seed.wrapping_add(2)),
            hit_log: HitLog::new(),
        }
    }

    /// Один тик симуляции
    pub fn tick(&mut self, dt: f32) {
        // 1. Кинематика агента (разрешение против реестра)
        self.controller.update(&mut self.player, dt, &self.registry);

        // 2. Сенсор: перезарядка и выстрел при зажатом спуске
        self.lidar.update(dt);
        if self.controller.fire {
            if let Some(marker) =
                self.lidar
                    .try_fire(&self.registry, self.player.position, self.player.forward())
            {
                self.hit_log.push(marker);
            }
        }

        // 3. Старение маркеров
        self.hit_log.update(dt);
    }
}
