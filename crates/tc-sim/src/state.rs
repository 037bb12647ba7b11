//! Published engine state and the station table.

use crate::inputs::Inputs;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use tc_components::{AmbientState, GasState};
use tc_core::units::{
    Density, Force, MassRate, Pressure, Temperature, Velocity, k, kgpm3, kgps, mps, newtons, pa,
};

/// Canonical gas-path stations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StationId {
    Ambient,
    CompressorInlet,
    CompressorExit,
    CombustorExit,
    TurbineExit,
    NozzleExit,
}

impl StationId {
    pub const ALL: [StationId; 6] = [
        StationId::Ambient,
        StationId::CompressorInlet,
        StationId::CompressorExit,
        StationId::CombustorExit,
        StationId::TurbineExit,
        StationId::NozzleExit,
    ];

    /// Conventional station number (0, 2, 3, 4, 5, 8).
    pub fn number(&self) -> u8 {
        match self {
            StationId::Ambient => 0,
            StationId::CompressorInlet => 2,
            StationId::CompressorExit => 3,
            StationId::CombustorExit => 4,
            StationId::TurbineExit => 5,
            StationId::NozzleExit => 8,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.number() == number)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Pressure and temperature at one station.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StationState {
    pub pressure_pa: f64,
    pub temperature_k: f64,
}

impl StationState {
    pub fn pressure(&self) -> Pressure {
        pa(self.pressure_pa)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.temperature_k)
    }
}

impl From<GasState> for StationState {
    fn from(g: GasState) -> Self {
        Self {
            pressure_pa: g.pressure_pa,
            temperature_k: g.temperature_k,
        }
    }
}

/// All six stations, always present, ordered by station number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stations([StationState; 6]);

impl Stations {
    /// Every station at the same conditions.
    pub fn uniform(pressure_pa: f64, temperature_k: f64) -> Self {
        Self(
            [StationState {
                pressure_pa,
                temperature_k,
            }; 6],
        )
    }

    /// Cold, stopped engine: every station at ambient.
    pub fn ambient(ambient: &AmbientState) -> Self {
        Self::uniform(ambient.pressure_pa, ambient.temperature_k)
    }

    pub fn from_array(states: [StationState; 6]) -> Self {
        Self(states)
    }

    pub fn get(&self, id: StationId) -> &StationState {
        &self.0[id.slot()]
    }

    /// Lookup by conventional station number.
    pub fn by_number(&self, number: u8) -> Option<&StationState> {
        StationId::from_number(number).map(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StationId, &StationState)> {
        StationId::ALL.into_iter().zip(self.0.iter())
    }
}

impl Index<StationId> for Stations {
    type Output = StationState;

    fn index(&self, id: StationId) -> &StationState {
        self.get(id)
    }
}

/// Derived engine state, fully replaced every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Spool speed (%)
    pub rpm_pct: f64,
    /// Whether the cycle was solved this tick (spool above run threshold)
    pub running: bool,
    /// Net thrust (N), never negative
    pub thrust_n: f64,
    /// Gross jet thrust before ram drag (N)
    pub gross_thrust_n: f64,
    /// Ram drag (N)
    pub ram_drag_n: f64,
    /// Exhaust gas temperature, turbine exit (K)
    pub egt_k: f64,
    /// Thrust-specific fuel consumption (kg/(N·h))
    pub tsfc_kg_per_n_h: f64,
    /// Fuel mass flow (kg/s)
    pub fuel_flow_kg_s: f64,
    /// Total air mass flow (kg/s)
    pub mass_flow_kg_s: f64,
    /// Core jet velocity (m/s)
    pub exit_velocity_m_s: f64,
    /// Bypass jet velocity (m/s), 0 without a fan
    pub bypass_velocity_m_s: f64,
    /// Compressor exit pressure (Pa)
    pub p3_pa: f64,
    /// Combustor exit temperature (K)
    pub t4_k: f64,
    /// Inlet air density (kg/m³)
    pub inlet_density_kg_m3: f64,
    /// Turbine exit colder than ambient: the driven stages asked for more
    /// work than the gas could give
    pub turbine_starved: bool,
    /// Combustor exit above the design turbine-inlet limit
    pub over_temperature: bool,
}

/// Owned copy of everything a reader may look at after a tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub inputs: Inputs,
    pub state: EngineState,
    pub stations: Stations,
}

impl EngineSnapshot {
    pub fn thrust(&self) -> Force {
        newtons(self.state.thrust_n)
    }

    pub fn egt(&self) -> Temperature {
        k(self.state.egt_k)
    }

    pub fn p3(&self) -> Pressure {
        pa(self.state.p3_pa)
    }

    pub fn t4(&self) -> Temperature {
        k(self.state.t4_k)
    }

    pub fn fuel_flow(&self) -> MassRate {
        kgps(self.state.fuel_flow_kg_s)
    }

    pub fn exit_velocity(&self) -> Velocity {
        mps(self.state.exit_velocity_m_s)
    }

    pub fn inlet_density(&self) -> Density {
        kgpm3(self.state.inlet_density_kg_m3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_numbers_round_trip() {
        for id in StationId::ALL {
            assert_eq!(StationId::from_number(id.number()), Some(id));
        }
        assert_eq!(StationId::from_number(1), None);
    }

    #[test]
    fn ambient_stations_are_uniform() {
        let amb = AmbientState::default();
        let st = Stations::ambient(&amb);
        assert_eq!(st.iter().count(), 6);
        for (_, s) in st.iter() {
            assert_eq!(s.temperature_k, amb.temperature_k);
            assert_eq!(s.pressure_pa, amb.pressure_pa);
        }
    }

    #[test]
    fn index_and_number_agree() {
        let mut states = [StationState::default(); 6];
        for (i, s) in states.iter_mut().enumerate() {
            s.temperature_k = 300.0 + i as f64;
        }
        let st = Stations::from_array(states);
        assert_eq!(st[StationId::CombustorExit].temperature_k, 303.0);
        assert_eq!(st.by_number(4), Some(&st[StationId::CombustorExit]));
        assert_eq!(st.by_number(8).map(|s| s.temperature_k), Some(305.0));
    }

    #[test]
    fn iteration_is_ordered_by_station_number() {
        let st = Stations::uniform(1.0, 1.0);
        let numbers: Vec<u8> = st.iter().map(|(id, _)| id.number()).collect();
        assert_eq!(numbers, vec![0, 2, 3, 4, 5, 8]);
    }
}
