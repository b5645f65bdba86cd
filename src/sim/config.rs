// ============================================
// Config - Общие константы мира
// ============================================

/// Полуразмер мира по X/Z: пол простирается на -WORLD_SIZE..WORLD_SIZE,
/// горизонтальное движение агента зажато в эти пределы
pub const WORLD_SIZE: f32 = 90.0;
