//! Parallel environment
//!
//! Owns one [`RogueEnv`] per worker and steps them all with one command
//! each. Workers run on the rayon thread pool; results always come back in
//! worker order. A worker whose game ends is reset within the same call,
//! so the snapshot it reports is the first one of its next episode. A
//! worker that fails is reported on its own and the rest of the batch
//! keeps its results.

use ndarray::{Array4, Axis, stack};
use rayon::prelude::*;
use rg_core::{GameConfig, GameState, PlayerState};
use tracing::{debug, warn};

use crate::action::Action;
use crate::encoding::ImageSetting;
use crate::engine::Engine;
use crate::env::{DEFAULT_MAX_STEPS, RogueEnv, RogueEnvConfig, StepInfo};
use crate::error::{EnvError, EnvResult};

/// Settings for a [`ParallelRogueEnv`]
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelConfig {
    /// One game config per worker, in worker order
    pub configs: Vec<GameConfig>,
    pub max_steps: usize,
    /// Overrides every worker's seed
    pub seed: Option<u64>,
    pub image_setting: ImageSetting,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            configs: Vec::new(),
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
            image_setting: ImageSetting::default(),
        }
    }
}

/// Index-aligned results of one parallel step
///
/// A failed worker keeps its slot: it holds the worker's cached snapshot,
/// no reward, `done = false` and an empty info, and the error is listed in
/// `failures`.
#[derive(Debug)]
pub struct ParallelStep {
    pub states: Vec<PlayerState>,
    pub rewards: Vec<f32>,
    pub dones: Vec<bool>,
    pub infos: Vec<StepInfo>,
    /// (worker index, error) for every worker whose step failed
    pub failures: Vec<(usize, EnvError)>,
}

impl ParallelStep {
    /// Every worker stepped
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A batch of independent environments stepped together
#[derive(Debug)]
pub struct ParallelRogueEnv<E = GameState> {
    envs: Vec<RogueEnv<E>>,
}

impl ParallelRogueEnv<GameState> {
    pub fn new(config: ParallelConfig) -> EnvResult<Self> {
        let envs = config
            .configs
            .into_iter()
            .enumerate()
            .map(|(index, game)| {
                RogueEnv::new(RogueEnvConfig {
                    seed: config.seed,
                    game: Some(game),
                    max_steps: config.max_steps,
                    image_setting: config.image_setting,
                })
                .map_err(|e| EnvError::Worker {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<EnvResult<Vec<_>>>()?;
        Self::from_envs(envs)
    }
}

impl<E: Engine + Send> ParallelRogueEnv<E> {
    /// Wrap existing environments; they must all observe the same shape
    pub fn from_envs(envs: Vec<RogueEnv<E>>) -> EnvResult<Self> {
        if let Some(first) = envs.first() {
            let expected = first.observation_space().shape;
            for (index, env) in envs.iter().enumerate().skip(1) {
                let found = env.observation_space().shape;
                if found != expected {
                    return Err(EnvError::ObservationShape {
                        index,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(Self { envs })
    }

    pub fn num_workers(&self) -> usize {
        self.envs.len()
    }

    pub fn envs(&self) -> &[RogueEnv<E>] {
        &self.envs
    }

    /// Cached snapshots, without advancing anything
    pub fn states(&self) -> Vec<&PlayerState> {
        self.envs.iter().map(|env| env.state()).collect()
    }

    /// Step every worker with its own command key
    ///
    /// `actions` holds exactly one key per worker; nothing is stepped when
    /// the count is wrong. An unknown key fails only its own worker.
    pub fn step(&mut self, actions: &str) -> EnvResult<ParallelStep> {
        let actions = actions.chars().map(|c| Action::ByCommands(c.to_string())).collect();
        self.step_actions(actions)
    }

    /// Step every worker with an action index
    pub fn step_indices(&mut self, actions: &[usize]) -> EnvResult<ParallelStep> {
        self.step_actions(actions.iter().map(|&i| Action::ByIndex(i)).collect())
    }

    fn step_actions(&mut self, actions: Vec<Action>) -> EnvResult<ParallelStep> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::WorkerCountMismatch {
                expected: self.envs.len(),
                found: actions.len(),
            });
        }
        let results: Vec<EnvResult<(PlayerState, f32, bool, StepInfo)>> = self
            .envs
            .par_iter_mut()
            .zip(actions.into_par_iter())
            .enumerate()
            .map(|(index, (env, action))| {
                let step = env.step(action)?;
                let state = if step.done {
                    debug!(worker = index, "auto-reset");
                    env.reset()?
                } else {
                    step.state
                };
                Ok((state, step.reward, step.done, step.info))
            })
            .collect();

        let workers = results.len();
        let mut out = ParallelStep {
            states: Vec::with_capacity(workers),
            rewards: Vec::with_capacity(workers),
            dones: Vec::with_capacity(workers),
            infos: Vec::with_capacity(workers),
            failures: Vec::new(),
        };
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok((state, reward, done, info)) => {
                    out.states.push(state);
                    out.rewards.push(reward);
                    out.dones.push(done);
                    out.infos.push(info);
                }
                Err(e) => {
                    warn!(worker = index, error = %e, "worker step failed");
                    out.states.push(self.envs[index].state().clone());
                    out.rewards.push(0.0);
                    out.dones.push(false);
                    out.infos.push(StepInfo::default());
                    out.failures.push((index, e));
                }
            }
        }
        Ok(out)
    }

    /// Reset every worker and return the fresh snapshots
    pub fn reset(&mut self) -> EnvResult<Vec<PlayerState>> {
        let results: Vec<EnvResult<PlayerState>> =
            self.envs.par_iter_mut().map(|env| env.reset()).collect();
        results
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                r.map_err(|e| EnvError::Worker {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }

    /// Seed every worker's next reset
    pub fn seed(&mut self, seed: u64) {
        for env in &mut self.envs {
            env.seed(seed);
        }
    }

    /// Encode one snapshot per worker into `(workers, channels, height, width)`
    pub fn encode_batch(&self, states: &[PlayerState]) -> EnvResult<Array4<f32>>
    where
        E: Sync,
    {
        if states.len() != self.envs.len() {
            return Err(EnvError::WorkerCountMismatch {
                expected: self.envs.len(),
                found: states.len(),
            });
        }
        let images = self
            .envs
            .par_iter()
            .zip(states.par_iter())
            .map(|(env, state)| env.encode(state, None))
            .collect::<EnvResult<Vec<_>>>()?;
        let views: Vec<_> = images.iter().map(|image| image.view()).collect();
        match stack(Axis(0), &views) {
            Ok(batch) => Ok(batch),
            // from_envs guarantees equal shapes; only an empty batch gets here
            Err(_) => {
                let [c, h, w] = self.observation_shape();
                Ok(Array4::zeros((0, c, h, w)))
            }
        }
    }

    /// Encode the cached snapshots
    pub fn encode_states(&self) -> EnvResult<Array4<f32>>
    where
        E: Sync,
    {
        let states: Vec<PlayerState> = self.envs.iter().map(|env| env.state().clone()).collect();
        self.encode_batch(&states)
    }

    /// Per-worker observation shape
    pub fn observation_shape(&self) -> [usize; 3] {
        self.envs
            .first()
            .map_or([0, 0, 0], |env| env.observation_space().shape)
    }
}
