use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use cat_chase::core::{DiceColor, GameConfig, MovesPool, ShortcutTable};
use cat_chase::simulation::run_game;
use cat_chase::strategy::{allocate_animal_moves, Snapshot, Strategy};
use cat_chase::{ChaseGameBuilder, GameRng, GameState, RulesEngine};

fn bench_resolve_turn(c: &mut Criterion) {
    let (game, state) = ChaseGameBuilder::new().build(42);
    c.bench_function("resolve_turn_green_black", |b| {
        b.iter_batched(
            || state.clone(),
            |mut state| game.resolve_turn(&mut state, black_box([DiceColor::Green, DiceColor::Black])),
            BatchSize::SmallInput,
        )
    });
}

fn bench_allocate(c: &mut Criterion) {
    let pool = MovesPool { cat_moves: 0, animal_moves: 2 };
    for strategy in Strategy::ALL {
        let config = GameConfig::default().with_strategy(strategy);
        let state = GameState::new(&config, 0, 7);
        let snapshot = Snapshot::capture(&state, &config);
        let mut rng = GameRng::new(7);
        c.bench_function(&format!("allocate_{strategy}"), |b| {
            b.iter(|| allocate_animal_moves(strategy, black_box(&snapshot), pool, &mut rng))
        });
    }
}

fn bench_full_game(c: &mut Criterion) {
    let config = GameConfig::default();
    c.bench_function("full_game_no_shortcuts", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            run_game(black_box(&config), 0, seed)
        })
    });

    let config = GameConfig::default().with_shortcuts(ShortcutTable::presets().remove(0));
    c.bench_function("full_game_table_0", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            run_game(black_box(&config), 0, seed)
        })
    });
}

fn bench_state_clone(c: &mut Criterion) {
    let (game, mut state) = ChaseGameBuilder::new().build(3);
    for _ in 0..20 {
        if game.play_turn(&mut state).is_err() {
            break;
        }
    }
    c.bench_function("game_state_clone", |b| b.iter(|| black_box(&state).clone()));
}

criterion_group!(
    benches,
    bench_resolve_turn,
    bench_allocate,
    bench_full_game,
    bench_state_clone,
);
criterion_main!(benches);
