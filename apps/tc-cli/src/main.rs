use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tc_components::resolve_ambient;
use tc_project::ProjectError;
use tc_sim::{Design, SimRecord};
use tracing::debug;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(about = "TurboCycle CLI - Real-time gas-turbine cycle simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// List scenarios in a project
    Scenarios {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Run a scenario and print the recorded history
    Run {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Scenario ID to run
        scenario_id: String,
        /// Write the full history as CSV instead of printing a table
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print standard-atmosphere conditions
    Atmosphere {
        /// Altitudes in feet
        #[arg(required = true, allow_negative_numbers = true)]
        altitudes_ft: Vec<f64>,
    },
    /// Print the built-in engine design presets as YAML
    Presets,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Scenarios { project_path } => cmd_scenarios(&project_path),
        Commands::Run {
            project_path,
            scenario_id,
            csv,
        } => cmd_run(&project_path, &scenario_id, csv.as_deref()),
        Commands::Atmosphere { altitudes_ft } => {
            cmd_atmosphere(&altitudes_ft);
            Ok(())
        }
        Commands::Presets => cmd_presets(),
    }
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = tc_project::load(project_path)?;
    println!("✓ Project is valid");
    println!(
        "  Engine: {} ({} scenarios)",
        project.design.engine_type.label(),
        project.scenarios.len()
    );
    Ok(())
}

fn cmd_scenarios(project_path: &Path) -> CliResult<()> {
    let project = tc_project::load(project_path)?;

    if project.scenarios.is_empty() {
        println!("No scenarios found in project");
    } else {
        println!("Scenarios in project '{}':", project.name);
        for s in &project.scenarios {
            println!(
                "  {} - {} (dt={} s, t_end={} s, {} events)",
                s.id,
                s.name,
                s.dt_s,
                s.t_end_s,
                s.events.len()
            );
        }
    }
    Ok(())
}

fn cmd_run(project_path: &Path, scenario_id: &str, csv: Option<&Path>) -> CliResult<()> {
    let project = tc_project::load(project_path)?;
    println!("Running scenario: {}", scenario_id);

    let record = tc_project::run_scenario(&project, scenario_id)?;
    debug!(points = record.t.len(), "scenario recorded");

    if let Some(path) = csv {
        std::fs::write(path, history_csv(&record))?;
        println!("✓ Exported {} time points to {}", record.t.len(), path.display());
    } else {
        print_history(&record);
    }
    Ok(())
}

fn history_csv(record: &SimRecord) -> String {
    let mut csv = String::from(
        "time_s,rpm_pct,thrust_n,egt_k,tsfc_kg_per_n_h,fuel_flow_kg_s,mass_flow_kg_s,\
         p3_pa,t4_k,exit_velocity_m_s,turbine_starved,over_temperature\n",
    );
    for (t, snap) in record.t.iter().zip(&record.x) {
        let s = &snap.state;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}\n",
            t,
            s.rpm_pct,
            s.thrust_n,
            s.egt_k,
            s.tsfc_kg_per_n_h,
            s.fuel_flow_kg_s,
            s.mass_flow_kg_s,
            s.p3_pa,
            s.t4_k,
            s.exit_velocity_m_s,
            s.turbine_starved,
            s.over_temperature
        ));
    }
    csv
}

fn print_history(record: &SimRecord) {
    println!(
        "{:>8} {:>7} {:>11} {:>8} {:>10} {:>9} {:>6}",
        "t [s]", "rpm %", "thrust [N]", "EGT [K]", "P3 [kPa]", "TSFC", "flags"
    );
    for (t, snap) in record.t.iter().zip(&record.x) {
        let s = &snap.state;
        let mut flags = String::new();
        if s.turbine_starved {
            flags.push('S');
        }
        if s.over_temperature {
            flags.push('T');
        }
        println!(
            "{:>8.3} {:>7.2} {:>11.1} {:>8.1} {:>10.1} {:>9.4} {:>6}",
            t,
            s.rpm_pct,
            s.thrust_n,
            s.egt_k,
            s.p3_pa / 1000.0,
            s.tsfc_kg_per_n_h,
            flags
        );
    }
}

fn cmd_atmosphere(altitudes_ft: &[f64]) {
    println!(
        "{:>10} {:>10} {:>12} {:>12}",
        "alt [ft]", "T [K]", "P [Pa]", "rho [kg/m3]"
    );
    for &alt in altitudes_ft {
        let amb = resolve_ambient(alt, false, 0.0, 0.0);
        println!(
            "{:>10.0} {:>10.2} {:>12.1} {:>12.4}",
            alt, amb.temperature_k, amb.pressure_pa, amb.density_kg_m3
        );
    }
}

fn cmd_presets() -> CliResult<()> {
    for (name, design) in Design::presets() {
        println!("# {}", name);
        print!("{}", serde_yaml::to_string(&design)?);
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_sim::{EngineModel, InputPatch, Schedule, SimOptions, run_scenario};

    #[test]
    fn csv_has_one_row_per_time_point() {
        let mut model = EngineModel::new(Design::turbojet()).unwrap();
        let schedule = Schedule::default().at(0.0, InputPatch::throttle(100.0));
        let opts = SimOptions {
            t_end: 1.0,
            ..SimOptions::default()
        };
        let record = run_scenario(&mut model, &schedule, &opts).unwrap();

        let csv = history_csv(&record);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), record.t.len() + 1);
        for line in &lines {
            assert_eq!(line.split(',').count(), 12, "{line}");
        }
        assert!(lines[0].starts_with("time_s,rpm_pct,thrust_n"));
        assert!(csv.ends_with('\n'));
    }
}
