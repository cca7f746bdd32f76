// --- File: driver.rs ---
//! Fixed-cadence loop around `SimulationState`: paces ticks, watches the stop signal,
//! hands snapshots to the presenter and walks generations for a population provider.

use crate::config::RunConfig;
use crate::constants::FIXED_TIMESTEP;
use crate::controller::{DecisionController, FitnessAccumulator, PopulationProvider, Presenter};
use crate::simulation::{SimRng, SimulationState, TickOutcome};
use rand::SeedableRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Blocking frame limiter. Sleeps until the next tick deadline; a late tick restarts the
/// schedule instead of bursting to catch up.
#[derive(Debug)]
pub struct Pacer {
    period: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl Pacer {
    pub fn realtime() -> Self {
        Self {
            period: Some(Duration::from_secs_f64(FIXED_TIMESTEP)),
            next_deadline: None,
        }
    }

    pub fn unthrottled() -> Self {
        Self {
            period: None,
            next_deadline: None,
        }
    }

    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        let now = Instant::now();
        match self.next_deadline {
            Some(deadline) if deadline > now => {
                std::thread::sleep(deadline - now);
                self.next_deadline = Some(deadline + period);
            }
            _ => self.next_deadline = Some(now + period),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every android was eliminated.
    Extinct,
    /// Stop signal or tick cap ended the run with androids still alive.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct RunReport<D, F> {
    pub generation: u32,
    pub outcome: RunOutcome,
    pub ticks: u64,
    pub score: u32,
    pub collisions: usize,
    pub ceiling_hits: usize,
    pub ground_hits: usize,
    pub survivors: usize,
    pub results: Vec<(D, F)>,
}

/// What a finished generation looked like, without the population itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub generation: u32,
    pub outcome: RunOutcome,
    pub ticks: u64,
    pub score: u32,
    pub collisions: usize,
    pub ceiling_hits: usize,
    pub ground_hits: usize,
    /// Highest fitness in the generation, as reported by the provider.
    pub best_fitness: Option<f64>,
}

pub struct SimulationLoop {
    pacer: Pacer,
    max_ticks: Option<u64>,
    stop: Arc<AtomicBool>,
}

impl SimulationLoop {
    pub fn new(config: &RunConfig) -> Self {
        let pacer = if config.realtime {
            Pacer::realtime()
        } else {
            Pacer::unthrottled()
        };
        Self {
            pacer,
            max_ticks: config.max_ticks,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked at every tick boundary; setting it ends the current run.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    fn should_stop(&self, ticks: u64) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            log::warn!("Stop requested after {} ticks", ticks);
            return true;
        }
        if self.max_ticks.is_some_and(|max| ticks >= max) {
            log::warn!("Tick cap reached after {} ticks with androids alive", ticks);
            return true;
        }
        false
    }

    /// Runs one generation until extinction or stop.
    pub fn run_generation<D, F, P>(
        &mut self,
        population: Vec<(D, F)>,
        generation: u32,
        rng: SimRng,
        presenter: &mut P,
    ) -> RunReport<D, F>
    where
        D: DecisionController,
        F: FitnessAccumulator,
        P: Presenter + ?Sized,
    {
        let mut state = SimulationState::new(population, rng);
        let outcome = loop {
            if !state.is_extinct() && self.should_stop(state.tick_count()) {
                break RunOutcome::Stopped;
            }
            self.pacer.wait();
            match state.tick() {
                TickOutcome::Extinct { .. } => break RunOutcome::Extinct,
                TickOutcome::Running { .. } => {
                    if presenter.wants_snapshot(state.tick_count()) {
                        presenter.present(&state.snapshot(generation));
                    }
                }
            }
        };

        let (collisions, ceiling_hits, ground_hits) = state.elimination_counts();
        RunReport {
            generation,
            outcome,
            ticks: state.tick_count(),
            score: state.score(),
            collisions,
            ceiling_hits,
            ground_hits,
            survivors: state.alive(),
            results: state.into_results(),
        }
    }

    /// Runs `generations` generations, numbered from 1. Each generation's course is
    /// seeded from `seed + generation` when a seed is given.
    pub fn train<V, P>(
        &mut self,
        provider: &mut V,
        generations: u32,
        seed: Option<u64>,
        presenter: &mut P,
    ) -> Vec<GenerationSummary>
    where
        V: PopulationProvider,
        P: Presenter + ?Sized,
    {
        let mut summaries = Vec::with_capacity(generations as usize);
        for generation in 1..=generations {
            if self.stop.load(Ordering::Relaxed) {
                log::warn!("Stop requested; skipping remaining generations");
                break;
            }
            let rng = match seed {
                Some(seed) => SimRng::seed_from_u64(seed.wrapping_add(generation as u64)),
                None => SimRng::from_entropy(),
            };
            let population = provider.populate(generation);
            let started = Instant::now();
            let report = self.run_generation(population, generation, rng, presenter);
            let elapsed = started.elapsed().as_secs_f64();
            let best_fitness = provider.evaluate(generation, report.results);
            log::info!(
                "Gen {}: {:?} after {} ticks ({:.2}s), score {}, best fitness {}, eliminated {} by pipe / {} by ceiling / {} by ground, {} survivors",
                generation,
                report.outcome,
                report.ticks,
                elapsed,
                report.score,
                best_fitness.map_or_else(|| "n/a".to_string(), |f| format!("{:.1}", f)),
                report.collisions,
                report.ceiling_hits,
                report.ground_hits,
                report.survivors
            );
            summaries.push(GenerationSummary {
                generation,
                outcome: report.outcome,
                ticks: report.ticks,
                score: report.score,
                collisions: report.collisions,
                ceiling_hits: report.ceiling_hits,
                ground_hits: report.ground_hits,
                best_fitness,
            });
        }
        summaries
    }
}
