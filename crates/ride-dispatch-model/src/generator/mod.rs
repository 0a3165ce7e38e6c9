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

//! Seeded synthetic scenario generation.
//!
//! Stands in for the external fleet/request registries and the route
//! optimizer when exercising the engine in demos, tests, and benchmarks.
//! Deadlines follow the service-quality formulas of the request loader:
//! ordinary requests may board until `entry + max_waiting` and must alight by
//! `entry + max_waiting + max_detour * ideal_travel_time`; a leg must board
//! no later than its bus-side deadline minus its own ideal travel time.
//!
//! Continuing (already boarded) riders are attached to a specific vehicle and
//! appear in every candidate trip of that vehicle, so generated instances are
//! always feasible.

mod config;
mod err;

pub use config::{ScenarioConfig, ScenarioConfigBuilder};
pub use err::ScenarioConfigBuildError;

use crate::{
    id::{BusTripId, NodeId, RequestId, VehicleId},
    problem::{DispatchProblem, DispatchProblemBuilder},
    req::{GeoPoint, LegRef, LegRole, Request, RequestKind},
    trip::Trip,
    vehicle::Vehicle,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Exp, Normal};
use ride_dispatch_core::{
    cost::Cost,
    time::{TimeDelta, TimePoint},
};

pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: SmallRng,
    next_request_id: u64,
    next_bus_trip_id: u64,
    travel_time_distribution: Exp<f64>,
    position_distribution: Normal<f64>,
}

impl From<ScenarioConfig> for ScenarioGenerator {
    fn from(config: ScenarioConfig) -> Self {
        Self::new(config)
    }
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioConfig) -> Self {
        let seed = config.seed();
        Self {
            travel_time_distribution: Exp::new(1.0 / config.mean_travel_time_s())
                .expect("valid travel time rate"),
            position_distribution: Normal::new(0.0, 0.03).expect("valid position spread"),
            rng: SmallRng::seed_from_u64(seed),
            config,
            next_request_id: 0,
            next_bus_trip_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    #[inline]
    fn fresh_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        RequestId::new(id)
    }

    #[inline]
    fn fresh_bus_trip_id(&mut self) -> BusTripId {
        let id = self.next_bus_trip_id;
        self.next_bus_trip_id += 1;
        BusTripId::new(id)
    }

    #[inline]
    fn random_node(&mut self) -> NodeId {
        NodeId::new(self.rng.random_range(0..self.config.nodes()))
    }

    fn random_position(&mut self) -> GeoPoint {
        // Jitter around a nominal service-area center.
        let lat = 42.36 + self.position_distribution.sample(&mut self.rng);
        let lon = -71.06 + self.position_distribution.sample(&mut self.rng);
        GeoPoint::new(lat, lon)
    }

    fn sample_travel_time(&mut self) -> TimeDelta<i64> {
        let s = self.travel_time_distribution.sample(&mut self.rng);
        TimeDelta::new((s as i64).max(120))
    }

    fn sample_distinct(&mut self, pool_len: usize, n: usize) -> Vec<usize> {
        let n = n.min(pool_len);
        let mut picked: Vec<usize> = Vec::with_capacity(n);
        while picked.len() < n {
            let i = self.rng.random_range(0..pool_len);
            if !picked.contains(&i) {
                picked.push(i);
            }
        }
        picked
    }

    fn make_primary(&mut self, cycle_time: TimePoint<i64>) -> Request<i64> {
        let id = self.fresh_request_id();
        let backlog = TimeDelta::new(self.rng.random_range(0..=self.config.max_waiting_s() / 3));
        let entry = TimePoint::new((cycle_time - backlog).value().max(0));
        let ideal = self.sample_travel_time();
        let max_waiting = TimeDelta::new(self.config.max_waiting_s());
        let board = entry + max_waiting;
        let detour = TimeDelta::new(
            (self.config.max_detour_factor() * ideal.value() as f64) as i64,
        );
        let alight = board + detour;

        Request::new(
            id,
            self.random_node(),
            self.random_node(),
            self.random_position(),
            self.random_position(),
            entry,
            board,
            alight,
            ideal,
            RequestKind::Primary,
        )
        .expect("generated primary request is well-formed")
    }

    fn make_leg(
        &mut self,
        parent: &Request<i64>,
        bus_trip: BusTripId,
        role: LegRole,
    ) -> Request<i64> {
        let id = self.fresh_request_id();
        let ideal = TimeDelta::new((parent.ideal_travel_time().value() / 3).max(60));
        let entry = parent.entry_time();
        let alight = match role {
            // The feeder leg must reach the boarding stop before the bus
            // departs, shortly after the rider's waiting allowance.
            LegRole::FirstMile => entry + TimeDelta::new(self.config.max_waiting_s()) + ideal,
            // The continuation leg inherits the rider's overall deadline.
            LegRole::LastMile => parent.latest_alighting(),
        };
        let board = alight - ideal;

        let (origin, destination) = match role {
            LegRole::FirstMile => (parent.origin(), self.random_node()),
            LegRole::LastMile => (self.random_node(), parent.destination()),
        };

        Request::new(
            id,
            origin,
            destination,
            self.random_position(),
            self.random_position(),
            entry,
            board,
            alight,
            ideal,
            RequestKind::Leg(LegRef::new(parent.id(), bus_trip, role)),
        )
        .expect("generated leg request is well-formed")
    }

    fn trip_cost(&mut self, requests: &[RequestId], lookup: &[Request<i64>]) -> Cost {
        let mut total = 0.0;
        for id in requests {
            let request = lookup
                .iter()
                .find(|r| r.id() == *id)
                .expect("trip covers a generated request");
            total += request.ideal_travel_time().value() as f64
                + self.config.dwell_pickup_s() as f64
                + self.config.dwell_alight_s() as f64;
        }
        // Route inefficiency on top of the ideal legs.
        let noise = Exp::new(1.0 / 120.0).expect("valid noise rate");
        Cost::new(total + noise.sample(&mut self.rng))
    }

    /// Generates one cycle snapshot. Requests, vehicles, and candidate trips
    /// are drawn deterministically from the generator's seed.
    pub fn generate(&mut self, cycle_time: TimePoint<i64>) -> DispatchProblem<i64> {
        let vehicle_count = self.config.vehicles();
        let capacity = self.config.vehicle_capacity();

        // Continuing riders are pinned to vehicles round-robin, capped by the
        // seats a vehicle actually has.
        let mut onboard: Vec<Vec<RequestId>> = vec![Vec::new(); vehicle_count];
        let mut requests: Vec<Request<i64>> = Vec::new();

        for k in 0..self.config.primary_requests() {
            let mut primary = self.make_primary(cycle_time);

            let vehicle_slot = k % vehicle_count;
            let continuing = self.rng.random_bool(self.config.continuing_fraction())
                && onboard[vehicle_slot].len() < capacity;

            if continuing {
                primary.mark_assigned();
                onboard[vehicle_slot].push(primary.id());
                requests.push(primary);
                continue;
            }

            let multimodal = self.rng.random_bool(self.config.multimodal_fraction());
            if multimodal {
                let bus_trip = self.fresh_bus_trip_id();
                let first = self.make_leg(&primary, bus_trip, LegRole::FirstMile);
                let last = self.make_leg(&primary, bus_trip, LegRole::LastMile);
                requests.push(primary);
                requests.push(first);
                requests.push(last);
            } else {
                requests.push(primary);
            }
        }

        // Every request a candidate trip may pick up fresh this cycle:
        // droppable primaries and their legs.
        let pool: Vec<RequestId> = requests
            .iter()
            .filter(|r| !r.is_assigned())
            .map(|r| r.id())
            .collect();

        let mut builder = DispatchProblemBuilder::new(cycle_time);
        for request in &requests {
            builder
                .add_request(request.clone())
                .expect("generated request ids are unique");
        }

        for v in 0..vehicle_count {
            let id = VehicleId::new(v as u64 + 1);
            let base = onboard[v].clone();
            let vehicle = Vehicle::new(id, capacity, base.len(), self.random_node())
                .expect("onboard riders fit the vehicle");

            let mut trips: Vec<Trip> = Vec::new();
            for _ in 0..self.config.candidates_per_vehicle() {
                let extras = if pool.is_empty() {
                    0
                } else if self.rng.random_bool(self.config.pair_fraction()) {
                    2
                } else {
                    1
                };
                let mut covered = base.clone();
                for i in self.sample_distinct(pool.len(), extras) {
                    covered.push(pool[i]);
                }
                if covered.is_empty() {
                    continue;
                }
                let cost = self.trip_cost(&covered, &requests);
                trips.push(Trip::new(id, covered, cost).expect("generated trip is well-formed"));
            }
            // A vehicle with riders on board always needs at least one
            // candidate continuing its current plan.
            if trips.is_empty() && !base.is_empty() {
                let cost = self.trip_cost(&base, &requests);
                trips.push(
                    Trip::new(id, base.clone(), cost).expect("generated trip is well-formed"),
                );
            }

            builder
                .add_vehicle(vehicle, trips)
                .expect("generated vehicle ids are unique");
        }

        builder.build().expect("generated scenario is structurally valid")
    }
}
