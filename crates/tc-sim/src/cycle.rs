//! Station-by-station cycle solver.

use crate::design::{Design, EngineType};
use crate::error::SimResult;
use crate::inputs::Inputs;
use crate::state::{EngineState, StationState, Stations};
use tc_components::fan::FAN_EFFICIENCY;
use tc_components::gas::{REFERENCE_DENSITY, SPEED_OF_SOUND_FLIGHT, ideal_gas_density};
use tc_components::{
    AmbientState, AxialCompressor, Combustor, CompressionStage, Fan, GasState, Nozzle,
    PropellantFeed, RamDiffuser, Turbine, ram_recovery,
};
use tc_core::units::constants::SECONDS_PER_HOUR;

/// Net thrust (N) below which TSFC is not computed as a ratio.
pub const MIN_THRUST_FOR_TSFC: f64 = 1.0;

/// TSFC reported while fuel flows with no usable thrust (kg/(N·h)).
pub const TSFC_SATURATED: f64 = 1.0e6;

/// Everything one tick of the cycle produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleSolution {
    pub state: EngineState,
    pub stations: Stations,
}

/// Components of one engine design, wired in gas-path order.
///
/// The compression stage is picked once from the engine type; solving never
/// branches on it.
pub struct CycleSolver {
    compression: Box<dyn CompressionStage>,
    fan: Option<Fan>,
    combustor: Combustor,
    turbine: Turbine,
    core_nozzle: Nozzle,
    bypass_nozzle: Nozzle,
    design_mass_flow_kg_s: f64,
    bypass_ratio: f64,
    turbine_inlet_temp_limit_k: f64,
}

impl std::fmt::Debug for CycleSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleSolver")
            .field("compression", &self.compression.name())
            .field("fan", &self.fan)
            .field("bypass_ratio", &self.bypass_ratio)
            .finish_non_exhaustive()
    }
}

impl CycleSolver {
    /// Build the component chain for a design.
    ///
    /// # Errors
    /// Returns error if the design fails validation.
    pub fn from_design(design: &Design) -> SimResult<Self> {
        design.validate()?;
        let eff = &design.efficiencies;

        let compression: Box<dyn CompressionStage> = match design.engine_type {
            EngineType::Turbojet => Box::new(AxialCompressor::new(
                design.pressure_ratio,
                eff.compressor,
            )?),
            EngineType::Ramjet => Box::new(RamDiffuser::default()),
            EngineType::Rocket => Box::new(PropellantFeed::default()),
        };

        let fan = if design.is_turbofan() {
            Some(Fan::new(design.fan_pressure_ratio)?)
        } else {
            None
        };

        Ok(Self {
            compression,
            fan,
            combustor: Combustor::new(eff.combustor)?,
            turbine: Turbine::default(),
            core_nozzle: Nozzle::new(eff.nozzle)?,
            bypass_nozzle: Nozzle::new(FAN_EFFICIENCY)?,
            design_mass_flow_kg_s: design.mass_flow_kg_s,
            bypass_ratio: design.bypass_ratio,
            turbine_inlet_temp_limit_k: design.turbine_inlet_temp_limit_k,
        })
    }

    pub fn compression_stage(&self) -> &dyn CompressionStage {
        self.compression.as_ref()
    }

    /// Stopped or windmilling engine: no thrust, every station at ambient.
    pub fn cold(&self, ambient: &AmbientState, rpm_pct: f64) -> CycleSolution {
        CycleSolution {
            state: EngineState {
                rpm_pct,
                running: false,
                egt_k: ambient.temperature_k,
                p3_pa: ambient.pressure_pa,
                t4_k: ambient.temperature_k,
                inlet_density_kg_m3: ambient.density_kg_m3,
                ..EngineState::default()
            },
            stations: Stations::ambient(ambient),
        }
    }

    /// Solve the full gas path for a running spool.
    pub fn solve(&self, inputs: &Inputs, ambient: &AmbientState, rpm_pct: f64) -> CycleSolution {
        let spool = rpm_pct / 100.0;
        let s0 = GasState::new(ambient.pressure_pa, ambient.temperature_k);
        let breathes = self.compression.breathes_air();

        // Intake and mass flow
        let (s2, inlet_density) = if breathes {
            let s2 = ram_recovery(ambient, inputs.mach);
            (s2, ideal_gas_density(s2.pressure_pa, s2.temperature_k))
        } else {
            (s0, ambient.density_kg_m3)
        };
        let total_mdot = if breathes {
            self.design_mass_flow_kg_s * (inlet_density / REFERENCE_DENSITY) * spool
        } else {
            self.design_mass_flow_kg_s * spool
        };
        let core_mdot = total_mdot / (1.0 + self.bypass_ratio);
        let bypass_mdot = total_mdot - core_mdot;

        // Compression
        let s3 = self.compression.compress(&s2, spool);
        let s13 = self.fan.as_ref().map(|fan| fan.compress(&s2, spool));

        // Combustion
        let burn = self.combustor.burn(
            &s3,
            core_mdot,
            &inputs.fuel(),
            spool,
            inputs.diffuser_loss_scale,
        );
        let s4 = burn.exit;

        // Turbine supplies the compressor and the fan
        let mut absorbed_w = core_mdot * self.compression.specific_work(&s2, &s3);
        if let (Some(fan), Some(s13)) = (&self.fan, &s13) {
            absorbed_w += bypass_mdot * fan.specific_work(&s2, s13);
        }
        let turbine = self.turbine.extract(&s4, core_mdot, absorbed_w);
        let s5 = turbine.exit;

        // Nozzles
        let core_jet = self.core_nozzle.expand(&s5, &s0, inputs.nozzle_area_scale);
        let bypass_velocity = s13
            .map(|s13| self.bypass_nozzle.expand(&s13, &s0, 1.0).velocity_m_s)
            .unwrap_or(0.0);

        // Thrust
        let gross = core_mdot * core_jet.velocity_m_s + bypass_mdot * bypass_velocity;
        let ram_drag = if breathes {
            total_mdot * inputs.mach * SPEED_OF_SOUND_FLIGHT
        } else {
            0.0
        };
        let thrust = (gross - ram_drag).max(0.0);
        let fuel_flow = burn.fuel_flow_kg_s;

        let state = EngineState {
            rpm_pct,
            running: true,
            thrust_n: thrust,
            gross_thrust_n: gross,
            ram_drag_n: ram_drag,
            egt_k: s5.temperature_k,
            tsfc_kg_per_n_h: tsfc(fuel_flow, thrust),
            fuel_flow_kg_s: fuel_flow,
            mass_flow_kg_s: total_mdot,
            exit_velocity_m_s: core_jet.velocity_m_s,
            bypass_velocity_m_s: bypass_velocity,
            p3_pa: s3.pressure_pa,
            t4_k: s4.temperature_k,
            inlet_density_kg_m3: inlet_density,
            turbine_starved: s5.temperature_k < ambient.temperature_k,
            over_temperature: s4.temperature_k > self.turbine_inlet_temp_limit_k,
        };

        let stations = Stations::from_array([
            StationState::from(s0),
            StationState::from(s2),
            StationState::from(s3),
            StationState::from(s4),
            StationState::from(s5),
            StationState::from(core_jet.exit),
        ]);

        CycleSolution { state, stations }
    }
}

/// Thrust-specific fuel consumption in kg/(N·h).
///
/// Below [`MIN_THRUST_FOR_TSFC`] the ratio is meaningless: zero fuel reads 0,
/// flowing fuel reads [`TSFC_SATURATED`].
pub fn tsfc(fuel_flow_kg_s: f64, thrust_n: f64) -> f64 {
    if thrust_n > MIN_THRUST_FOR_TSFC {
        fuel_flow_kg_s * SECONDS_PER_HOUR / thrust_n
    } else if fuel_flow_kg_s > 0.0 {
        TSFC_SATURATED
    } else {
        0.0
    }
}
