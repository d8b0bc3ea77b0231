use log::LevelFilter;
use std::io::Write;

/// Stdout logger at `level`. Per-module filters in `RUST_LOG` still apply on
/// top of it.
pub fn init_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{}: {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .filter_level(level)
        .parse_default_env();

    let _ = builder.try_init();
}
