// ============================================
// Sim Module - Подсистемы симуляции
// ============================================
// Генерация при старте: NoiseField → CaveCompiler → ObstacleRegistry
// → SpawnFinder. Каждый тик: ввод → кинематика → сенсор → старение
// маркеров.

pub mod config;
pub mod noise;
pub mod obstacle;
pub mod registry;
pub mod raycast;
pub mod cave;
pub mod lidar;
pub mod player;
pub mod spawn;
pub mod simulation;

pub use cave::CaveParams;
pub use lidar::{HitLog, HitMarker, LidarEmitter};
pub use obstacle::Obstacle;
pub use player::{Player, PlayerController};
pub use raycast::RayHit;
pub use registry::ObstacleRegistry;
pub use simulation::Simulation;
