// --- File: controller.rs ---
//! Seams to the outside world: the per-android decision maker, its fitness tally,
//! the source of each generation's population and the presenter that watches ticks.

use crate::simulation::{SimRng, Snapshot};
use crate::utils::{activate, random_weights};
use glam::Vec3;
use rand::Rng;

/// Sensor tuple handed to a controller each tick:
/// `(y, |y - gap top|, |y - gap bottom|)` for the pipe the lead android is watching.
pub type Sensors = Vec3;

pub trait DecisionController {
    /// Activation; anything above `JUMP_THRESHOLD` means jump.
    fn decide(&mut self, sensors: Sensors) -> f32;
}

impl<T: FnMut(Sensors) -> f32> DecisionController for T {
    fn decide(&mut self, sensors: Sensors) -> f32 {
        self(sensors)
    }
}

/// Write-only fitness sink paired 1:1 with a controller.
pub trait FitnessAccumulator {
    fn add(&mut self, delta: f64);
}

impl FitnessAccumulator for f64 {
    fn add(&mut self, delta: f64) {
        *self += delta;
    }
}

pub trait PopulationProvider {
    type Controller: DecisionController;
    type Fitness: FitnessAccumulator;

    /// Controller/accumulator pairs for one generation.
    fn populate(&mut self, generation: u32) -> Vec<(Self::Controller, Self::Fitness)>;

    /// Every pair handed out by `populate`, back after the run. Returns the generation's
    /// best fitness, if the provider can read its accumulators.
    fn evaluate(
        &mut self,
        generation: u32,
        results: Vec<(Self::Controller, Self::Fitness)>,
    ) -> Option<f64>;
}

/// Receives a read-only view after every completed tick.
pub trait Presenter {
    /// Lets a presenter skip snapshot construction on ticks it ignores.
    fn wants_snapshot(&self, _tick: u64) -> bool {
        true
    }

    fn present(&mut self, snapshot: &Snapshot);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn wants_snapshot(&self, _tick: u64) -> bool {
        false
    }

    fn present(&mut self, _snapshot: &Snapshot) {}
}

/// Headless presenter: one `debug!` line every `interval` ticks.
#[derive(Debug, Clone, Copy)]
pub struct LogPresenter {
    interval: u64,
}

impl LogPresenter {
    pub fn new(interval: u64) -> Self {
        Self { interval }
    }
}

impl Presenter for LogPresenter {
    fn wants_snapshot(&self, tick: u64) -> bool {
        self.interval > 0 && tick % self.interval == 0
    }

    fn present(&mut self, snapshot: &Snapshot) {
        let lead_y = snapshot.androids.first().map(|a| a.position.y);
        log::debug!(
            "Gen {} tick {}: score {}, alive {}, pipes {}, lead y {:?}, ground ({:.0}, {:.0})",
            snapshot.generation,
            snapshot.tick,
            snapshot.score,
            snapshot.androids.len(),
            snapshot.pipes.len(),
            lead_y,
            snapshot.ground.x1,
            snapshot.ground.x2
        );
    }
}

/// Single `tanh` neuron over the three sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perceptron {
    pub weights: Vec3,
    pub bias: f32,
}

const WEIGHT_RANGE: f32 = 1.0;

impl Perceptron {
    pub fn random(rng: &mut SimRng) -> Self {
        Self {
            weights: random_weights(rng, WEIGHT_RANGE),
            bias: rng.gen_range(-WEIGHT_RANGE..WEIGHT_RANGE),
        }
    }
}

impl DecisionController for Perceptron {
    fn decide(&mut self, sensors: Sensors) -> f32 {
        activate(self.weights.dot(sensors) + self.bias)
    }
}

/// Fresh random perceptrons each generation, plus the best one seen so far carried
/// over unchanged.
pub struct PerceptronPool {
    rng: SimRng,
    size: usize,
    champion: Option<(Perceptron, f64)>,
}

impl PerceptronPool {
    pub fn new(size: usize, rng: SimRng) -> Self {
        Self {
            rng,
            size,
            champion: None,
        }
    }

    pub fn champion(&self) -> Option<&(Perceptron, f64)> {
        self.champion.as_ref()
    }
}

impl PopulationProvider for PerceptronPool {
    type Controller = Perceptron;
    type Fitness = f64;

    fn populate(&mut self, _generation: u32) -> Vec<(Perceptron, f64)> {
        let mut population = Vec::with_capacity(self.size);
        if let Some((champion, _)) = self.champion {
            population.push((champion, 0.0));
        }
        while population.len() < self.size {
            population.push((Perceptron::random(&mut self.rng), 0.0));
        }
        population
    }

    fn evaluate(&mut self, generation: u32, results: Vec<(Perceptron, f64)>) -> Option<f64> {
        let (perceptron, fitness) = results
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))?;
        let improved = self
            .champion
            .is_none_or(|(_, champion_fitness)| fitness > champion_fitness);
        if improved {
            log::info!(
                "Gen {}: new champion with fitness {:.1} (weights {:?}, bias {:.3})",
                generation,
                fitness,
                perceptron.weights,
                perceptron.bias
            );
            self.champion = Some((perceptron, fitness));
        }
        Some(fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_closure_is_a_controller() {
        let mut always_jump = |_: Sensors| 1.0_f32;
        assert_eq!(always_jump.decide(Vec3::ZERO), 1.0);
    }

    #[test]
    fn test_f64_accumulates() {
        let mut fitness = 0.0_f64;
        fitness.add(5.0);
        fitness.add(-1.0);
        assert_eq!(fitness, 4.0);
    }

    #[test]
    fn test_perceptron_output_bounded() {
        let mut rng = SimRng::seed_from_u64(11);
        let mut perceptron = Perceptron::random(&mut rng);
        let out = perceptron.decide(Vec3::new(350.0, 40.0, 160.0));
        assert!((-1.0..=1.0).contains(&out));
    }

    #[test]
    fn test_pool_carries_champion_forward() {
        let mut pool = PerceptronPool::new(4, SimRng::seed_from_u64(5));
        let first = pool.populate(1);
        assert_eq!(first.len(), 4);

        let mut scored = first.clone();
        scored[2].1 = 12.5;
        let expected = scored[2].0;
        assert_eq!(pool.evaluate(1, scored), Some(12.5));

        let second = pool.populate(2);
        assert_eq!(second.len(), 4);
        assert_eq!(second[0].0, expected);
        assert_eq!(second[0].1, 0.0);
        assert_eq!(pool.champion().map(|c| c.1), Some(12.5));
    }

    #[test]
    fn test_pool_keeps_better_champion() {
        let mut pool = PerceptronPool::new(2, SimRng::seed_from_u64(6));
        let mut gen1 = pool.populate(1);
        gen1[0].1 = 30.0;
        let keeper = gen1[0].0;
        pool.evaluate(1, gen1);

        let mut gen2 = pool.populate(2);
        gen2[1].1 = 10.0;
        // The generation's own best is reported even when the champion is kept.
        assert_eq!(pool.evaluate(2, gen2), Some(10.0));
        assert_eq!(pool.champion().map(|c| c.0), Some(keeper));
    }

    #[test]
    fn test_empty_generation_has_no_best() {
        let mut pool = PerceptronPool::new(0, SimRng::seed_from_u64(8));
        assert_eq!(pool.evaluate(1, Vec::new()), None);
        assert!(pool.champion().is_none());
    }
}
