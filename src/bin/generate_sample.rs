use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic trial: gas mass approaches `cap` grams with rate `k`,
/// energy approaches `energy_cap` joules a little faster.
struct TrialProfile {
    name: &'static str,
    cap: f64,
    k: f64,
    energy_cap: f64,
}

fn gas_mass(p: &TrialProfile, t: f64) -> f64 {
    p.cap * (1.0 - (-p.k * t).exp())
}

fn energy(p: &TrialProfile, t: f64) -> f64 {
    p.energy_cap * (1.0 - (-1.4 * p.k * t).exp())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Total combustible mass per trial; percent completion is gas mass
    // relative to this.
    let total_reactants = 2.0;

    let part_a = (
        "Variable oxidizer",
        vec![
            TrialProfile { name: "Trial A1", cap: 1.2, k: 0.045, energy_cap: 900.0 },
            TrialProfile { name: "Trial A2", cap: 1.5, k: 0.060, energy_cap: 1150.0 },
            TrialProfile { name: "Trial A3", cap: 1.8, k: 0.080, energy_cap: 1400.0 },
        ],
    );
    let part_b = (
        "Constant oxidizer, variable catalyst",
        vec![
            TrialProfile { name: "Trial B1", cap: 1.6, k: 0.050, energy_cap: 1000.0 },
            TrialProfile { name: "Trial B2", cap: 1.6, k: 0.075, energy_cap: 1050.0 },
            TrialProfile { name: "Trial B3", cap: 1.6, k: 0.110, energy_cap: 1100.0 },
        ],
    );

    let output_path = "lab_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["part", "trial", "time", "mass", "energy", "percent_mass"])?;

    let mut rows = 0usize;
    for (part_label, trials) in [&part_a, &part_b] {
        for profile in trials {
            // Mass readings every 5 s on the balance…
            for step in 0..=12 {
                let t = (step * 5) as f64;
                let mass = (gas_mass(profile, t) + rng.gauss(0.0, 0.01)).max(0.0);
                let percent = mass / total_reactants * 100.0;
                let time_field = format!("{t}");
                let mass_field = format!("{mass:.3}");
                let percent_field = format!("{percent:.1}%");
                writer.write_record([
                    *part_label,
                    profile.name,
                    time_field.as_str(),
                    mass_field.as_str(),
                    "",
                    percent_field.as_str(),
                ])?;
                rows += 1;
            }
            // …and thermometer readings on their own rows.
            for step in 0..=12 {
                let t = (step * 5) as f64;
                let joules = (energy(profile, t) + rng.gauss(0.0, 8.0)).max(0.0);
                let time_field = format!("{t}");
                let energy_field = format!("{joules:.1}");
                writer.write_record([
                    *part_label,
                    profile.name,
                    time_field.as_str(),
                    "",
                    energy_field.as_str(),
                    "",
                ])?;
                rows += 1;
            }
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} data rows to {output_path}");
    Ok(())
}
