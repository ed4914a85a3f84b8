use criterion::{Criterion, criterion_group, criterion_main};

use arena::events::NullEvents;
use arena::games::SessionRng;
use arena::games::snake::{Autopilot, EngineSettings, GameEngine, TickResult};

fn bench_autopilot_round() {
    let settings = EngineSettings::default();
    let mut rng = SessionRng::from_random();
    let mut engine = GameEngine::new(&settings, NullEvents);
    engine.reset(&mut rng);

    loop {
        if let Some(direction) = Autopilot::next_direction(&engine) {
            engine.set_direction(direction);
        }
        if let TickResult::GameOver(_) = engine.tick(&mut rng) {
            break;
        }
    }
}

fn bench_idle_ticks() {
    let settings = EngineSettings::default();
    let mut rng = SessionRng::from_random();
    let mut engine = GameEngine::new(&settings, NullEvents);
    engine.reset(&mut rng);

    for _ in 0..1000 {
        engine.tick(&mut rng);
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("autopilot_full_round", |b| b.iter(bench_autopilot_round));
    c.bench_function("idle_ticks_1000", |b| b.iter(bench_idle_ticks));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
