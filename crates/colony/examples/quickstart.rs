//! Grow a colony from one founder on a hexagonal arena.
//!
//! ```text
//! RUST_LOG=debug cargo run -p colony --example quickstart
//! ```

use colony::prelude::*;

#[derive(Clone, Debug)]
struct Cell {
    kind: StateId,
    biomass: f64,
}

impl Agent for Cell {
    fn state(&self) -> StateId {
        self.kind
    }

    fn is_divisible(&self) -> bool {
        self.biomass >= 1.0
    }

    fn health(&self) -> f64 {
        self.biomass
    }

    fn adjust_health(&mut self, delta: f64) {
        self.biomass += delta;
    }

    fn divide(&mut self) -> Self {
        self.biomass /= 2.0;
        self.clone()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimulationConfig {
        geometry: GeometryConfig {
            lattice: Lattice::Triangular,
            shape: ShapeKind::Hexagon { radius: 12 },
            boundary: BoundaryKind::Arena,
        },
        scheduler: SchedulerConfig {
            seed: 7,
            max_steps: None,
            max_time: Some(40.0),
        },
    };
    let processes: Vec<Box<dyn Process<Cell>>> = vec![
        Box::new(Divide::new(ProcessId(0), 1.0)),
        Box::new(Death::new(ProcessId(1), 0.05)),
        Box::new(UniformBiomassGrowth::new(ProcessId(2), 0.5)),
        Box::new(CheckForExtinction::new(ProcessId(3))),
    ];
    let mut sim = Simulation::new(config, processes)?;
    let center = sim.geometry().center();
    sim.place(
        Cell {
            kind: StateId(1),
            biomass: 1.0,
        },
        &center,
    )?;

    let halt = sim.run();
    println!("{halt}");
    println!(
        "{} of {} sites occupied after {} events (t = {:.3})",
        sim.layer().occupied_count(),
        sim.geometry().site_count(),
        sim.frame(),
        sim.time()
    );
    if halt.is_fault() {
        return Err(halt.into());
    }
    Ok(())
}
