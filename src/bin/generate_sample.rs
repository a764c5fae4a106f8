//! Writes a synthetic spectroradiometer export (`ASD_Data.csv`) in the
//! dashboard's input format: `;` separated, `,` decimals.

use anyhow::{Context, Result};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn logistic(x: f64, mid: f64, steepness: f64) -> f64 {
    1.0 / (1.0 + (-(x - mid) / steepness).exp())
}

/// Vegetation-like reflectance: green peak, red-edge rise to the NIR
/// plateau, water absorption dips in the SWIR.
///
/// `vigour` (0..1) scales chlorophyll absorption and NIR plateau height;
/// stressed plants have lower vigour.
fn reflectance(wl: f64, nir_plateau: f64, vigour: f64) -> f64 {
    let visible = 0.04 + gaussian(wl, 550.0, 35.0, 0.08 * vigour + 0.04 * (1.0 - vigour));
    let red_absorption = gaussian(wl, 670.0, 25.0, 0.03 * vigour);
    let red_edge_mid = 705.0 + 20.0 * vigour;
    let nir = (nir_plateau * vigour + 0.15 * (1.0 - vigour)) * logistic(wl, red_edge_mid, 12.0);
    let water = gaussian(wl, 1450.0, 60.0, 0.25 * nir_plateau)
        + gaussian(wl, 1940.0, 80.0, 0.3 * nir_plateau);
    (visible - red_absorption + nir - water).max(0.005)
}

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

/// Format with a decimal comma, as the instrument software does.
fn comma_decimal(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}").replace('.', ",")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ASD_Data.csv".to_string());

    // ASD FieldSpec range: 350 → 2500 nm, step 1
    let wavelengths: Vec<f64> = (350..=2500).map(f64::from).collect();

    // (crop, NIR plateau height)
    let crops = [
        ("Maize", 0.48),
        ("Wheat", 0.42),
        ("Sorghum", 0.45),
        ("Sweet_Potato", 0.52),
    ];
    let conditions = [("Healthy", 1.0), ("Stressed", 0.55)];
    let replicates = 2;

    let mut headers = vec!["Wavelength_nm".to_string()];
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for (crop, plateau) in crops {
        for (condition, vigour) in conditions {
            for rep in 1..=replicates {
                headers.push(format!("{condition}_{crop}_S{rep}"));
                let jitter = rng.gauss(0.0, 0.02);
                columns.push(
                    wavelengths
                        .iter()
                        .map(|&wl| {
                            let v = reflectance(wl, plateau * (1.0 + jitter), vigour);
                            (v + rng.gauss(0.0, 0.002)).max(0.0)
                        })
                        .collect(),
                );
            }
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(&headers).context("writing header row")?;
    for (row, &wl) in wavelengths.iter().enumerate() {
        let mut record = Vec::with_capacity(headers.len());
        record.push(comma_decimal(wl, 0));
        for col in &columns {
            record.push(comma_decimal(col[row], 5));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("writing row for {wl} nm"))?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {} series ({} wavelengths each) to {output_path}",
        columns.len(),
        wavelengths.len()
    );
    Ok(())
}
