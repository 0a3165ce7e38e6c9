// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use super::err::ScenarioConfigBuildError;

/// Parameters for one synthetic dispatch-cycle scenario.
///
/// The waiting/detour/dwell fields mirror the service-quality settings the
/// request-loading side uses to derive boarding and alighting deadlines; the
/// rest shapes fleet size, demand volume, and candidate-trip density.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub(super) vehicles: usize,
    pub(super) vehicle_capacity: usize,
    pub(super) primary_requests: usize,
    pub(super) multimodal_fraction: f64,
    pub(super) continuing_fraction: f64,
    pub(super) nodes: u64,
    pub(super) candidates_per_vehicle: usize,
    pub(super) pair_fraction: f64,
    pub(super) mean_travel_time_s: f64,
    pub(super) max_waiting_s: i64,
    pub(super) max_detour_factor: f64,
    pub(super) dwell_pickup_s: i64,
    pub(super) dwell_alight_s: i64,
    pub(super) seed: u64,
}

impl ScenarioConfig {
    #[inline]
    pub fn vehicles(&self) -> usize {
        self.vehicles
    }

    #[inline]
    pub fn vehicle_capacity(&self) -> usize {
        self.vehicle_capacity
    }

    #[inline]
    pub fn primary_requests(&self) -> usize {
        self.primary_requests
    }

    #[inline]
    pub fn multimodal_fraction(&self) -> f64 {
        self.multimodal_fraction
    }

    #[inline]
    pub fn continuing_fraction(&self) -> f64 {
        self.continuing_fraction
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn candidates_per_vehicle(&self) -> usize {
        self.candidates_per_vehicle
    }

    #[inline]
    pub fn pair_fraction(&self) -> f64 {
        self.pair_fraction
    }

    #[inline]
    pub fn mean_travel_time_s(&self) -> f64 {
        self.mean_travel_time_s
    }

    #[inline]
    pub fn max_waiting_s(&self) -> i64 {
        self.max_waiting_s
    }

    #[inline]
    pub fn max_detour_factor(&self) -> f64 {
        self.max_detour_factor
    }

    #[inline]
    pub fn dwell_pickup_s(&self) -> i64 {
        self.dwell_pickup_s
    }

    #[inline]
    pub fn dwell_alight_s(&self) -> i64 {
        self.dwell_alight_s
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            vehicles: 20,
            vehicle_capacity: 4,
            primary_requests: 60,
            multimodal_fraction: 0.2,
            continuing_fraction: 0.15,
            nodes: 500,
            candidates_per_vehicle: 8,
            pair_fraction: 0.4,
            mean_travel_time_s: 600.0,
            max_waiting_s: 420,
            max_detour_factor: 1.5,
            dwell_pickup_s: 30,
            dwell_alight_s: 20,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfigBuilder {
    config: ScenarioConfig,
}

impl ScenarioConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ScenarioConfig::default(),
        }
    }

    pub fn vehicles(mut self, vehicles: usize) -> Self {
        self.config.vehicles = vehicles;
        self
    }

    pub fn vehicle_capacity(mut self, capacity: usize) -> Self {
        self.config.vehicle_capacity = capacity;
        self
    }

    pub fn primary_requests(mut self, requests: usize) -> Self {
        self.config.primary_requests = requests;
        self
    }

    pub fn multimodal_fraction(mut self, fraction: f64) -> Self {
        self.config.multimodal_fraction = fraction;
        self
    }

    pub fn continuing_fraction(mut self, fraction: f64) -> Self {
        self.config.continuing_fraction = fraction;
        self
    }

    pub fn nodes(mut self, nodes: u64) -> Self {
        self.config.nodes = nodes;
        self
    }

    pub fn candidates_per_vehicle(mut self, candidates: usize) -> Self {
        self.config.candidates_per_vehicle = candidates;
        self
    }

    pub fn pair_fraction(mut self, fraction: f64) -> Self {
        self.config.pair_fraction = fraction;
        self
    }

    pub fn mean_travel_time_s(mut self, seconds: f64) -> Self {
        self.config.mean_travel_time_s = seconds;
        self
    }

    pub fn max_waiting_s(mut self, seconds: i64) -> Self {
        self.config.max_waiting_s = seconds;
        self
    }

    pub fn max_detour_factor(mut self, factor: f64) -> Self {
        self.config.max_detour_factor = factor;
        self
    }

    pub fn dwell_pickup_s(mut self, seconds: i64) -> Self {
        self.config.dwell_pickup_s = seconds;
        self
    }

    pub fn dwell_alight_s(mut self, seconds: i64) -> Self {
        self.config.dwell_alight_s = seconds;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> Result<ScenarioConfig, ScenarioConfigBuildError> {
        let c = &self.config;
        for (name, value) in [
            ("multimodal_fraction", c.multimodal_fraction),
            ("continuing_fraction", c.continuing_fraction),
            ("pair_fraction", c.pair_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioConfigBuildError::FractionOutOfRange(name, value));
            }
        }
        if c.vehicles == 0 {
            return Err(ScenarioConfigBuildError::ZeroVehicles);
        }
        if c.nodes == 0 {
            return Err(ScenarioConfigBuildError::ZeroNodes);
        }
        if c.vehicle_capacity == 0 {
            return Err(ScenarioConfigBuildError::ZeroVehicleCapacity);
        }
        if c.mean_travel_time_s <= 0.0 {
            return Err(ScenarioConfigBuildError::NonPositiveMeanTravelTime(
                c.mean_travel_time_s,
            ));
        }
        if c.max_detour_factor < 1.0 {
            return Err(ScenarioConfigBuildError::DetourFactorBelowOne(
                c.max_detour_factor,
            ));
        }
        if c.max_waiting_s < 0 {
            return Err(ScenarioConfigBuildError::NegativeMaxWaiting(c.max_waiting_s));
        }
        Ok(self.config)
    }
}

impl Default for ScenarioConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        assert!(ScenarioConfigBuilder::new().build().is_ok());
    }

    #[test]
    fn rejects_fraction_outside_unit_interval() {
        let err = ScenarioConfigBuilder::new()
            .multimodal_fraction(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ScenarioConfigBuildError::FractionOutOfRange("multimodal_fraction", _)
        ));
    }

    #[test]
    fn rejects_detour_factor_below_one() {
        assert!(matches!(
            ScenarioConfigBuilder::new().max_detour_factor(0.9).build(),
            Err(ScenarioConfigBuildError::DetourFactorBelowOne(_))
        ));
    }

    #[test]
    fn rejects_empty_fleet() {
        assert!(matches!(
            ScenarioConfigBuilder::new().vehicles(0).build(),
            Err(ScenarioConfigBuildError::ZeroVehicles)
        ));
    }
}
