// ============================================
// Demo - Headless-прогон симуляции
// ============================================
// Скриптованный сеанс вместо окна: генерируем пещеру, десять секунд
// блуждаем с зажатым сенсором и печатаем итог. Рендер маркеров и
// препятствий — забота внешнего потребителя библиотеки.

use backrooms::sim::Simulation;

/// Фиксированный шаг: 60 тиков в секунду
const DT: f32 = 1.0 / 60.0;
const SEED: u64 = 12345;
const TICKS: u32 = 600;

fn main() {
    env_logger::init();

    println!("=== Backrooms (headless) ===");
    println!("Seed: {SEED}");
    println!("Scripted session: {} s wander with the sensor held", TICKS as f32 * DT);
    println!("============================");

    let mut sim = Simulation::new(SEED);

    sim.controller.fire = true;
    sim.controller.forward = true;

    for tick in 0..TICKS {
        // Плавное рыскание влево-вправо по синусу
        sim.controller.add_look_delta((tick as f32 * 0.05).sin() * 8.0, 0.0);

        // Прыжок в середине сеанса
        if tick == TICKS / 2 {
            sim.controller.jump = true;
        }

        sim.tick(DT);
    }

    let p = sim.player.position;
    println!("Obstacles: {}", sim.registry.len());
    println!("Live markers: {}", sim.hit_log.len());
    println!(
        "Agent at ({:.1}, {:.1}, {:.1}), on ground: {}",
        p.x, p.y, p.z, sim.player.on_ground
    );
}
