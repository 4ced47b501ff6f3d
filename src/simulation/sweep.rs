//! Parameter sweeps.
//!
//! A sweep plays a batch of games for every combination of shortcut table,
//! snack budget, snack rule and strategy, and folds each batch into a
//! `SweepStats` row. A failing game is counted (and logged by the runner)
//! but never aborts the sweep.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{
    CreatureName, GameConfig, GameRng, ShortcutTable, SnackRule, Status, SNACK_BUDGETS,
};
use crate::rules::GameResult;
use crate::strategy::Strategy;

use super::runner::{run_games, GameRecord, GameRun, SimulationConfig};

/// The grid of game configurations to play.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepConfig {
    pub shortcut_tables: Vec<ShortcutTable>,
    pub snack_budgets: Vec<u32>,
    pub snack_rules: Vec<SnackRule>,
    pub strategies: Vec<Strategy>,

    /// Games per combination.
    pub repetitions: usize,

    pub seed: u64,
    pub threads: usize,

    /// Settings shared by every combination.
    pub base: GameConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let mut shortcut_tables = vec![ShortcutTable::none()];
        shortcut_tables.extend(ShortcutTable::presets());

        Self {
            shortcut_tables,
            snack_budgets: SNACK_BUDGETS.to_vec(),
            snack_rules: SnackRule::ALL.to_vec(),
            strategies: Strategy::ALL.to_vec(),
            repetitions: 100,
            seed: 0,
            threads: 1,
            base: GameConfig::default(),
        }
    }
}

impl SweepConfig {
    pub fn with_shortcut_tables(mut self, tables: Vec<ShortcutTable>) -> Self {
        self.shortcut_tables = tables;
        self
    }

    pub fn with_snack_budgets(mut self, budgets: Vec<u32>) -> Self {
        self.snack_budgets = budgets;
        self
    }

    pub fn with_snack_rules(mut self, rules: Vec<SnackRule>) -> Self {
        self.snack_rules = rules;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_base(mut self, base: GameConfig) -> Self {
        self.base = base;
        self
    }

    /// Every combination in the grid with the game configuration it plays.
    ///
    /// Order: tables, then budgets, then rules, then strategies.
    pub fn combinations(&self) -> Vec<(Combination, GameConfig)> {
        let mut out = Vec::new();
        for table in &self.shortcut_tables {
            for &budget in &self.snack_budgets {
                for &rule in &self.snack_rules {
                    for &strategy in &self.strategies {
                        let combination = Combination {
                            shortcuts: table.label.clone(),
                            snack_budget: budget,
                            snack_rule: rule,
                            strategy,
                        };
                        let config = self
                            .base
                            .clone()
                            .with_shortcuts(table.clone())
                            .with_snacks(budget, rule)
                            .with_strategy(strategy);
                        out.push((combination, config));
                    }
                }
            }
        }
        out
    }

    fn simulation(&self, combination: &Combination, game: GameConfig) -> SimulationConfig {
        let seed = GameRng::new(self.seed).for_context(&combination.key()).seed();
        SimulationConfig::new(game)
            .with_num_games(self.repetitions)
            .with_seed(seed)
            .with_threads(self.threads)
    }
}

/// One point of the sweep grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    /// Label of the shortcut table.
    pub shortcuts: String,
    pub snack_budget: u32,
    pub snack_rule: SnackRule,
    pub strategy: Strategy,
}

impl Combination {
    /// Stable text key, also used to derive the combination's seed.
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.shortcuts, self.snack_budget, self.snack_rule, self.strategy
        )
    }
}

/// Aggregated outcome of one combination.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepStats {
    pub combination: Combination,
    pub games: u32,
    pub failures: u32,
    pub cat_wins: u32,
    pub animals_escape: u32,
    pub splits: u32,
    /// Mean turns over the games that completed.
    pub mean_turns: f64,
    pub chased: FxHashMap<CreatureName, u32>,
    pub finished: FxHashMap<CreatureName, u32>,
    pub snacks_spent: u64,
    #[serde(skip)]
    total_turns: u64,
}

impl SweepStats {
    pub fn new(combination: Combination) -> Self {
        Self {
            combination,
            games: 0,
            failures: 0,
            cat_wins: 0,
            animals_escape: 0,
            splits: 0,
            mean_turns: 0.0,
            chased: FxHashMap::default(),
            finished: FxHashMap::default(),
            snacks_spent: 0,
            total_turns: 0,
        }
    }

    /// Fold one game into the statistics.
    pub fn add(&mut self, run: &GameRun) {
        self.games += 1;
        match &run.outcome {
            Ok(record) => self.add_record(record),
            Err(_) => self.failures += 1,
        }
    }

    fn add_record(&mut self, record: &GameRecord) {
        match record.result {
            GameResult::CatWins => self.cat_wins += 1,
            GameResult::AnimalsEscape => self.animals_escape += 1,
            GameResult::Split { .. } => self.splits += 1,
        }

        for creature in record.final_creatures.iter().filter(|r| !r.name.is_cat()) {
            let bucket = match creature.status {
                Status::Chased => &mut self.chased,
                Status::Finished => &mut self.finished,
                Status::InProgress => continue,
            };
            *bucket.entry(creature.name).or_insert(0) += 1;
        }

        self.snacks_spent += u64::from(record.snacks_spent);
        self.total_turns += u64::from(record.turns);

        let completed = self.games - self.failures;
        self.mean_turns = self.total_turns as f64 / f64::from(completed);
    }

    #[must_use]
    pub fn completed(&self) -> u32 {
        self.games - self.failures
    }
}

/// Run the whole sweep, calling `on_stats` as each combination finishes.
pub fn run_sweep_with<F>(config: &SweepConfig, mut on_stats: F) -> Vec<SweepStats>
where
    F: FnMut(&SweepStats),
{
    let combinations = config.combinations();
    info!(
        combinations = combinations.len(),
        repetitions = config.repetitions,
        animal_start = config.base.animal_start,
        "starting sweep"
    );

    let mut all = Vec::with_capacity(combinations.len());
    for (combination, game) in combinations {
        let simulation = config.simulation(&combination, game);
        let mut stats = SweepStats::new(combination);

        for run in run_games(&simulation) {
            stats.add(&run);
        }

        info!(
            key = %stats.combination.key(),
            cat_wins = stats.cat_wins,
            animals_escape = stats.animals_escape,
            failures = stats.failures,
            "combination done"
        );
        on_stats(&stats);
        all.push(stats);
    }
    all
}

/// Run the whole sweep.
pub fn run_sweep(config: &SweepConfig) -> Vec<SweepStats> {
    run_sweep_with(config, |_| {})
}
