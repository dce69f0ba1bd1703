pub mod error;
pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;

pub use error::{InvalidConfiguration, Result};

pub use simulation::states::{NVec3, ParticleState, Sample};
pub use simulation::params::{IntegrationConfig, ParticleParameters};
pub use simulation::fields::{FieldConfig, FieldModel, FieldSet};
pub use simulation::forces::{
    acceleration, lorentz_factor, lorentz_force, AccelEval, Acceleration, Classical, Kinematics,
    Relativistic, DEFAULT_GAMMA_CEILING, SPEED_OF_LIGHT,
};
pub use simulation::integrator::{
    integrate, integrate_until, rk4_step, stream, stream_until, NeverStop, StopCondition,
    TrajectoryStream,
};
pub use simulation::analytical::{
    analytical, cyclotron_frequency, gyro_radius, time_grid, AnalyticalSolution, FieldScalars, Regime,
};
pub use simulation::trajectory::{SpeedLimitBreach, TerminationReason, Trajectory};
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    AnalyticalSettings, EngineConfig, FieldsConfig, IntegrationSettings, LaunchConfig,
    ParticleConfig, ScenarioConfig, SolverConfig,
};

pub use output::csv::{write_csv, CSV_HEADER};

pub use benchmark::benchmark::{bench_kinematics, bench_rk4, bench_rk4_curve};
