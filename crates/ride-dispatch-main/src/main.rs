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

use ride_dispatch_core::time::TimePoint;
use ride_dispatch_model::generator::{ScenarioConfigBuilder, ScenarioGenerator};
use ride_dispatch_solver::{AssignmentEngine, DispatchConfig};
use serde::Serialize;
use std::{fs::File, io::BufWriter, time::Instant};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct CycleInfo {
    idx: usize,
    seed: u64,
    cycle_time_s: i64,
    vehicles: usize,
    primary_requests: usize,
    candidate_trips: usize,
    total_requests: usize,
}

#[derive(Debug, Clone, Serialize)]
struct CycleResult {
    cycle: CycleInfo,
    objective: f64,
    solver_runtime_ms: u128,
    gap: f64,
    status: String,
    assigned_vehicles: usize,
    unserved_requests: usize,
    cycle_elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
struct RunReport {
    description: String,
    cycles: Vec<CycleResult>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn main() {
    enable_tracing();

    let dispatch_config = DispatchConfig::default();
    let results_dir = dispatch_config.results_dir.clone();
    let max_waiting_s = dispatch_config.max_waiting_s;
    let max_detour_factor = dispatch_config.max_detour_factor;
    let dwell_pickup_s = dispatch_config.dwell_pickup_s;
    let dwell_alight_s = dispatch_config.dwell_alight_s;

    let mut engine = AssignmentEngine::new(dispatch_config).expect("valid dispatch config");

    // A ramp of cycles from a quiet fleet to a busy one, one minute apart.
    let n_cycles = 10usize;
    let min_vehicles = 10usize;
    let max_vehicles = 60usize;
    let min_requests = 30usize;
    let max_requests = 240usize;
    let initial_time = 6 * 3600i64;
    let interval = 60i64;

    let mut results: Vec<CycleResult> = Vec::with_capacity(n_cycles);

    for i in 0..n_cycles {
        let vehicles = interpolate_u(min_vehicles, max_vehicles, i, n_cycles);
        let requests = interpolate_u(min_requests, max_requests, i, n_cycles);
        let seed: u64 = 42 + (i as u64);

        let scenario = ScenarioConfigBuilder::new()
            .vehicles(vehicles)
            .primary_requests(requests)
            .max_waiting_s(max_waiting_s)
            .max_detour_factor(max_detour_factor)
            .dwell_pickup_s(dwell_pickup_s)
            .dwell_alight_s(dwell_alight_s)
            .seed(seed)
            .build()
            .expect("valid scenario config");

        let cycle_time = TimePoint::new(initial_time + interval * i as i64);
        let problem = ScenarioGenerator::new(scenario).generate(cycle_time);

        let info = CycleInfo {
            idx: i,
            seed,
            cycle_time_s: cycle_time.value(),
            vehicles,
            primary_requests: requests,
            candidate_trips: problem.total_candidates(),
            total_requests: problem.requests().len(),
        };

        let t0 = Instant::now();
        let plan = engine.assign(&problem).expect("assignment cycle");
        let elapsed = t0.elapsed();

        let (objective, solver_runtime_ms, gap, status) = match plan.solve_stats() {
            Some(stats) => (
                stats.objective().value(),
                stats.runtime().as_millis(),
                stats.gap(),
                stats.status().to_string(),
            ),
            None => (0.0, 0, 0.0, "no_candidates".to_string()),
        };

        results.push(CycleResult {
            cycle: info,
            objective,
            solver_runtime_ms,
            gap,
            status,
            assigned_vehicles: plan.assignments().len(),
            unserved_requests: plan.unserved().len(),
            cycle_elapsed_ms: elapsed.as_millis(),
        });
    }

    let report = RunReport {
        description:
            "Ride dispatch demo: 10 synthetic cycles from small to big; integer-program \
             assignment per cycle with drop penalties and multi-modal leg pairing."
                .into(),
        cycles: results,
    };

    let report_path = results_dir.join("dispatch_results.json");
    let file = File::create(&report_path).expect("create dispatch_results.json");
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");

    println!();
    println!("=================================================================");
    println!("========================= Dispatch Done =========================");
    println!("=================================================================");
    println!();
    for result in &report.cycles {
        println!(
            "cycle {:>2}: {:>3} vehicles, {:>3} primaries, {:>4} candidates -> {:>3} assigned, {:>3} unserved ({})",
            result.cycle.idx,
            result.cycle.vehicles,
            result.cycle.primary_requests,
            result.cycle.candidate_trips,
            result.assigned_vehicles,
            result.unserved_requests,
            result.status,
        );
    }
    println!();
    println!("Wrote: {}", report_path.display());
}
