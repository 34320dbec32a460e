//! Writes a deterministic sample `data/` tree for manual testing: three
//! node folders directly under the data root, each with a couple of
//! 13-column detection logs, so every folder the side panel lists holds
//! CSV files.
//!
//! Run with `cargo run --bin generate_sample`.

use std::path::Path;

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
}

struct NodeSite {
    name: &'static str,
    latitude: f64,
    longitude: f64,
}

const SITES: [NodeSite; 3] = [
    NodeSite {
        name: "node1",
        latitude: 51.4501,
        longitude: 5.4530,
    },
    NodeSite {
        name: "node2",
        latitude: 51.4525,
        longitude: 5.4575,
    },
    NodeSite {
        name: "node3",
        latitude: 51.4488,
        longitude: 5.4612,
    },
];

const FILES_PER_NODE: usize = 3;
const ROWS_PER_FILE: usize = 120;

fn write_log(
    path: &Path,
    site: &NodeSite,
    file_no: usize,
    rng: &mut SimpleRng,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;

    for row in 0..ROWS_PER_FILE {
        // Drift around the site; the detection strength rises and falls
        // as the target passes by.
        let phase = row as f64 / ROWS_PER_FILE as f64;
        let lat = site.latitude + 0.002 * (phase * 6.28).sin() + 0.0002 * rng.next_f64();
        let lon = site.longitude + 0.002 * (phase * 6.28).cos() + 0.0002 * rng.next_f64();
        let drone = (1.0 - (phase - 0.5).abs() * 2.0) * 0.9 + 0.05 * rng.next_f64();
        let value = 20.0 + 60.0 * phase + 3.0 * rng.next_f64();
        let status = if rng.next_f64() < 0.12 { "Invalid" } else { "Valid" };
        let seconds = file_no * ROWS_PER_FILE + row;
        let timestamp = format!(
            "2025-08-12 10:{:02}:{:02}",
            30 + seconds / 60,
            seconds % 60
        );

        writer.write_record([
            row.to_string(),
            format!("{}{file_no:02}{row:04}", site.name.trim_start_matches("node")),
            "D".to_string(),
            format!("bg: {:.3}", rng.next_f64() * 0.1),
            format!("drone: {drone:.3}"),
            format!("{lat:.6}"),
            format!("{lon:.6}"),
            timestamp,
            "0".to_string(),
            status.to_string(),
            "0".to_string(),
            "0".to_string(),
            format!("{value:.1}"),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Populate `root` with the node folders as its immediate subdirectories,
/// matching what the folder selector lists.
fn generate_into(root: &Path, rng: &mut SimpleRng) -> Result<(), Box<dyn std::error::Error>> {
    for site in &SITES {
        let folder = root.join(site.name);
        std::fs::create_dir_all(&folder)?;
        for file_no in 0..FILES_PER_NODE {
            let path = folder.join(format!("LOG{:04}.CSV", file_no + 1));
            write_log(&path, site, file_no, rng)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(42);
    let root = Path::new("data");

    generate_into(root, &mut rng)?;

    println!("sample data ready under {}", root.display());
    Ok(())
}
