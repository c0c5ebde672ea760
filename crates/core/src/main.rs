// Headless simulator: plays one scripted session against a seeded module
// and logs what a host would see. Useful for eyeballing logs and for
// profiling mesh output without a renderer.

use tangle_core::harness::Harness;
use tangle_core::module::ModuleConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tangle_sim=info,tangle_core=info".into()),
        )
        .init();

    let (config, seed) = parse_args();
    let step = 1.0 / 30.0;

    tracing::info!("Simulating seed {seed}");
    let mut harness = Harness::from_seed(config, seed);
    let num_wires = harness.module().num_wires();

    // First pass: pair up a few wires and commit.
    harness.press_wire(0)?;
    harness.press_wire(1)?;
    harness.press_wire(2)?;
    harness.press_wire(3)?;
    tracing::info!("Lower groups: {:?}", harness.module().lower_groups());
    harness.submit();
    let pose = harness.settle(step);
    tracing::info!(
        "Shelf settled at yaw {} with the lid {:.0}% open",
        pose.yaw_deg,
        pose.lid * 100.0
    );

    // Peek at the lower grouping through a group button on the upper face.
    let peek = harness.module().association().letter_of(0);
    let lit = harness.press_button(peek)?;
    tracing::info!("Button {peek} lights slots {lit:?}");

    harness.submit();
    harness.settle(step);

    // One deliberate wrong press to show the strike reset.
    let wrong = harness.solution_order()[1];
    harness.press_wire(wrong)?;
    harness.settle(step);
    tracing::info!(
        "After the strike the display shows {:?}",
        harness.module().display_text()
    );

    harness.solve(step)?;
    tracing::info!("Display shows {:?}", harness.module().display_text());

    let meshes = harness.module().all_wire_meshes()?;
    let triangles: usize = meshes
        .iter()
        .map(|w| {
            w.wire.triangle_count() + w.highlight.triangle_count() + w.copper.triangle_count()
        })
        .sum();
    tracing::info!("{num_wires} wires carry {triangles} triangles");
    Ok(())
}

/// Parse `--seed N` and `--config path.json` from the command line.
fn parse_args() -> (ModuleConfig, u64) {
    let args: Vec<String> = std::env::args().collect();
    let mut config = ModuleConfig::default();
    let mut seed = 2024;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                match std::fs::read_to_string(&args[i]) {
                    Ok(text) => match serde_json::from_str(&text) {
                        Ok(parsed) => config = parsed,
                        Err(e) => tracing::warn!("Ignoring config {}: {e}", args[i]),
                    },
                    Err(e) => tracing::warn!("Cannot read config {}: {e}", args[i]),
                }
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(parsed) => seed = parsed,
                    Err(e) => tracing::warn!("Ignoring seed {}: {e}", args[i]),
                }
            }
            other => tracing::warn!("Unknown argument {other}"),
        }
        i += 1;
    }
    (config, seed)
}
