use lorsim::{Scenario, ScenarioConfig};
use lorsim::{bench_kinematics, bench_rk4, bench_rk4_curve};
use lorsim::write_csv;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "cosmic_ray.yaml")]
    file_name: String,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_kinematics();
        bench_rk4();
        bench_rk4_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    let trajectory = scenario.run().context("scenario run failed")?;

    if let Some(last) = trajectory.last() {
        info!(
            "{} samples, {:?}, final position = ({:.3} mm, {:.3} mm)",
            trajectory.len(),
            trajectory.termination,
            last.position.x * 1.0e3,
            last.position.y * 1.0e3
        );
    }
    if let Some(breach) = trajectory.speed_limit {
        warn!(
            "speed of light reached at t = {:e} s ({} capped evaluations)",
            breach.first_time, breach.evaluations
        );
    }

    let stdout = io::stdout();
    write_csv(&trajectory, BufWriter::new(stdout.lock())).context("failed to write trajectory")?;

    Ok(())
}
