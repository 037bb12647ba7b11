//! tc-project: engine project file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unknown scenario: {id}")]
    UnknownScenario { id: String },

    #[error("Simulation error: {0}")]
    Sim(#[from] tc_sim::SimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn finish_load(project: Project) -> ProjectResult<Project> {
    let project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<Project> {
    finish_load(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ProjectResult<Project> {
    finish_load(serde_json::from_str(content)?)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load YAML or JSON, picked by file extension (`.json` is JSON, anything
/// else is YAML).
pub fn load(path: &std::path::Path) -> ProjectResult<Project> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Run one of the project's scenarios on a fresh engine.
pub fn run_scenario(project: &Project, scenario_id: &str) -> ProjectResult<tc_sim::SimRecord> {
    let scenario = project
        .scenario(scenario_id)
        .ok_or_else(|| ProjectError::UnknownScenario {
            id: scenario_id.to_string(),
        })?;
    let mut model = project.build_model()?;
    let record = tc_sim::run_scenario(&mut model, &scenario.schedule(), &scenario.options())?;
    Ok(record)
}
