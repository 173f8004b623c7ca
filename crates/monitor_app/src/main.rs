mod platform;

fn main() -> anyhow::Result<()> {
    let origin = std::env::args()
        .nth(1)
        .unwrap_or_else(|| platform::DEFAULT_ORIGIN.to_string());
    platform::run_app(&origin)
}
