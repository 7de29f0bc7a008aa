use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// One sheet row, with the column names the viewer expects.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "NetMargin")]
    net_margin: f64,
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

/// Weekdays from `start`, `count` of them.
fn business_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut d = start;
    while days.len() < count {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(d);
        }
        d = d + Days::new(1);
    }
    days
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_netmargin.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).expect("valid start date");
    let dates = business_days(start, 500);

    // Mean-reverting margin around 12% with occasional shocks.
    let mut margin = 12.0;
    let mut writer = csv::Writer::from_path(&output_path)?;
    for &date in &dates {
        let shock = if rng.next_f64() < 0.02 { rng.gauss(0.0, 3.0) } else { 0.0 };
        margin += 0.05 * (12.0 - margin) + rng.gauss(0.0, 0.4) + shock;
        writer.serialize(Row {
            date,
            net_margin: (margin * 10_000.0).round() / 10_000.0,
        })?;
    }
    writer.flush()?;

    println!("Wrote {} observations to {output_path}", dates.len());
    Ok(())
}
