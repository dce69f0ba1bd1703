//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - particle parameters (`ParticleParameters`)
//! - the initial state at t = 0 (`ParticleState`)
//! - the uniform fields (`FieldConfig`)
//! - solver-specific settings (`IntegrationConfig` or the analytical time axis)
//!
//! Everything is validated here, so `run` only fails on inputs that were
//! modified after building.

use log::info;

use crate::configuration::config::{ScenarioConfig, SolverConfig};
use crate::error::{ensure_finite, InvalidConfiguration, Result};
use crate::simulation::analytical::{analytical, time_grid, validate_times, FieldScalars};
use crate::simulation::engine::Engine;
use crate::simulation::fields::FieldConfig;
use crate::simulation::integrator::integrate;
use crate::simulation::params::{IntegrationConfig, ParticleParameters};
use crate::simulation::states::{NVec3, ParticleState};
use crate::simulation::trajectory::Trajectory;

/// Runtime bundle constructed from a [`ScenarioConfig`]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub particle: ParticleParameters,
    pub initial_state: ParticleState,
    pub speed: f64, // m/s
    pub angle: f64, // rad
    pub fields: FieldConfig,
    pub integration: Option<IntegrationConfig>,
    pub times: Vec<f64>, // analytical time axis, empty for rk4
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Particle (runtime) from ParticleConfig
        let particle = ParticleParameters::new(cfg.particle.charge, cfg.particle.mass);
        particle.validate()?;

        // Launch: speed and in-plane angle -> velocity vector
        let angle = cfg.launch.angle_deg.to_radians();
        ensure_finite("initial speed", cfg.launch.speed)?;
        ensure_finite("launch angle", angle)?;
        let mut initial_state = ParticleState::launch(cfg.launch.speed, angle);
        let [px, py, pz] = cfg.launch.position;
        initial_state.position = NVec3::new(px, py, pz);
        initial_state.validate()?;

        // Fields (runtime) from FieldsConfig
        let [ex, ey, ez] = cfg.fields.e;
        let [bx, by, bz] = cfg.fields.b;
        let fields = FieldConfig::new(NVec3::new(ex, ey, ez), NVec3::new(bx, by, bz));
        fields.validate()?;

        let engine = Engine {
            solver: cfg.engine.solver,
        };

        let mut integration = None;
        let mut times = Vec::new();

        match engine.solver {
            SolverConfig::Rk4 => {
                let settings = cfg
                    .integration
                    .ok_or(InvalidConfiguration::MissingSection("integration"))?;
                let config = IntegrationConfig {
                    dt: settings.dt,
                    max_steps: settings.max_steps,
                    boundary: settings.boundary,
                    kinematics: settings.kinematics,
                };
                config.validate()?;
                integration = Some(config);
            }
            SolverConfig::Analytical => {
                let settings = cfg
                    .analytical
                    .ok_or(InvalidConfiguration::MissingSection("analytical"))?;
                times = time_grid(settings.t_end, settings.samples);
                validate_times(&times)?;

                // The closed form only knows E along x and B along z from the origin
                if ey != 0.0 || ez != 0.0 {
                    return Err(InvalidConfiguration::UnsupportedAnalyticalLayout("E.y or E.z"));
                }
                if bx != 0.0 || by != 0.0 {
                    return Err(InvalidConfiguration::UnsupportedAnalyticalLayout("B.x or B.y"));
                }
                if initial_state.position != NVec3::zeros() {
                    return Err(InvalidConfiguration::UnsupportedAnalyticalLayout(
                        "a launch position away from the origin",
                    ));
                }
            }
        }

        info!(
            "scenario: {:?}, q = {:e} C, m = {:e} kg, v0 = {:e} m/s at {:.1} deg",
            engine.solver, particle.charge, particle.mass, cfg.launch.speed, cfg.launch.angle_deg
        );

        Ok(Self {
            engine,
            particle,
            initial_state,
            speed: cfg.launch.speed,
            angle,
            fields,
            integration,
            times,
        })
    }

    /// Field strengths in the layout the analytical solver expects
    pub fn field_scalars(&self) -> FieldScalars {
        FieldScalars::new(self.fields.e.x, self.fields.b.z)
    }

    /// Run the configured solver
    pub fn run(&self) -> Result<Trajectory> {
        match self.engine.solver {
            SolverConfig::Rk4 => {
                let config = self
                    .integration
                    .ok_or(InvalidConfiguration::MissingSection("integration"))?;
                integrate(&self.particle, &self.initial_state, &self.fields, &config)
            }
            SolverConfig::Analytical => analytical(
                &self.particle,
                self.speed,
                self.angle,
                &self.field_scalars(),
                &self.times,
            ),
        }
    }
}
