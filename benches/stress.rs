use std::time::{Duration, Instant};

use kiosk::booking::{self, BookingValidator};
use kiosk::layout::LibraryLayout;
use kiosk::map::{find_path, Grid, SearchStrategy, Target};
use kiosk::model::{BookingDate, Coord, Resource};

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    if latencies.is_empty() {
        println!("  {label}: no samples");
        return;
    }
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    let max = latencies[latencies.len() - 1];
    println!("  {label}:");
    println!(
        "    n={}, avg={:.1}us, p50={:.1}us, p95={:.1}us, p99={:.1}us, max={:.1}us",
        latencies.len(),
        avg.as_secs_f64() * 1e6,
        percentile(latencies, 50.0).as_secs_f64() * 1e6,
        percentile(latencies, 95.0).as_secs_f64() * 1e6,
        percentile(latencies, 99.0).as_secs_f64() * 1e6,
        max.as_secs_f64() * 1e6,
    );
}

/// An open hall with a comb of walls, so depth-first routes wander.
fn comb_grid(size: usize) -> Grid {
    let rows = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    let border = r == 0 || c == 0 || r == size - 1 || c == size - 1;
                    let tooth = c % 4 == 2 && r != 1 && r != size - 2 && (c / 4) % 2 == (r % 2);
                    if border || tooth { 'W' } else { '.' }
                })
                .collect()
        })
        .collect();
    Grid::from_rows(rows).unwrap_or_else(|e| panic!("comb grid: {e}"))
}

fn phase1_admission() {
    let mut rs = Resource::builder()
        .name("Hall")
        .opening("00:00")
        .closing("23:59")
        .timeslot(1)
        .coord(Coord::new(0, 0))
        .build()
        .unwrap();
    let validator = BookingValidator::default();

    // One booking per member per day, packed back to back, so every
    // admission scans a growing list.
    let n = 5_000;
    let mut admitted = Vec::with_capacity(n);
    let mut rejected = Vec::with_capacity(n);
    let start = Instant::now();
    for i in 0..n {
        let day = (i % 28) as u8 + 1;
        let slot = (i / 28) as u32 % 1_400;
        let time = format!(
            "{:02}:{:02}-{:02}:{:02}",
            slot / 60,
            slot % 60,
            (slot + 1) / 60,
            (slot + 1) % 60
        );
        let date = format!("{day:02}/01/26");

        let t = Instant::now();
        let ok = validator.try_admit(&mut rs, &format!("m{i}"), &date, &time).is_ok();
        let elapsed = t.elapsed();
        if ok {
            admitted.push(elapsed);
        } else {
            rejected.push(elapsed);
        }

        // Same member again: always rejected by the daily limit.
        let t = Instant::now();
        let _ = validator.try_admit(&mut rs, &format!("m{i}"), &date, &time);
        rejected.push(t.elapsed());
    }
    let elapsed = start.elapsed();
    println!(
        "  {} attempts in {:.2}s = {:.0} ops/sec, {} bookings held",
        n * 2,
        elapsed.as_secs_f64(),
        (n * 2) as f64 / elapsed.as_secs_f64(),
        rs.bookings().len()
    );
    print_latency("admitted", &mut admitted);
    print_latency("rejected", &mut rejected);

    let date = BookingDate::new(1, 1, 2026).unwrap();
    let t = Instant::now();
    let windows = booking::free_windows(&rs, &date);
    println!("  free_windows: {} windows in {:?}", windows.len(), t.elapsed());
}

fn phase2_pathfinding() {
    for size in [32, 128, 256] {
        let grid = comb_grid(size);
        let origin = Coord::new(1, 1);
        let target = Coord::new(size - 2, size - 2);
        for strategy in [SearchStrategy::DepthFirst, SearchStrategy::BreadthFirst] {
            let mut latencies = Vec::new();
            let mut steps = 0;
            for _ in 0..50 {
                let t = Instant::now();
                let path = find_path(&grid, origin, Target::Cell(target), strategy);
                latencies.push(t.elapsed());
                if let Ok(path) = path {
                    steps = path.steps();
                }
            }
            print_latency(&format!("{size}x{size} {} ({steps} steps)", strategy.label()), &mut latencies);
        }
    }
}

fn phase3_builtin_routes() {
    let library = LibraryLayout::builtin().into_library().unwrap();
    let mut latencies = Vec::new();
    for _ in 0..10_000 {
        let t = Instant::now();
        let _ = library.route_to_resource("Group Study Room", SearchStrategy::DepthFirst);
        latencies.push(t.elapsed());
    }
    print_latency("route to Group Study Room", &mut latencies);
}

fn main() {
    println!("=== kiosk stress benchmark ===");

    println!("\n[phase 1] booking admission");
    phase1_admission();

    println!("\n[phase 2] pathfinding on comb grids");
    phase2_pathfinding();

    println!("\n[phase 3] built-in library routes");
    phase3_builtin_routes();

    println!("\n=== done ===");
}
