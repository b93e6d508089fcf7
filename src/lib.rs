//! Bulk persistence of simulated Euchre games.
//!
//! A finished game arrives as an in-memory [`Graph`]: one game, its deals,
//! tricks, and decision records, each owning collections of fixed-shape
//! leaf rows. The [`Loader`] inserts the parents one by one to learn their
//! generated identities, pulls every leaf out of the graph, backpatches the
//! foreign keys, and streams each leaf table through PostgreSQL's binary
//! COPY, all inside a single transaction.
pub mod cards;
pub mod cursor;
pub mod error;
pub mod graph;
pub mod identity;
pub mod loader;
pub mod records;
pub mod schema;
pub mod store;
pub mod synthetic;

pub use error::*;
pub use graph::*;
pub use identity::*;
pub use loader::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Seat index around the table, 0 through 3. Seats 0 and 2 are partners.
pub type Position = u8;
/// Points scored by a team in a deal or a game.
pub type Points = i16;
/// Model estimate of points won by taking one option.
pub type Estimate = f32;

/// Number of seats at a Euchre table.
pub const N: usize = 4;
/// Cards dealt to each seat.
pub const HAND: usize = 5;
/// Tricks played in a deal.
pub const TRICKS: usize = 5;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for synthetic load and testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Cancel the token on Ctrl+C so the in-flight graph rolls back cleanly.
#[cfg(feature = "server")]
pub fn interrupt(token: tokio_util::sync::CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, rolling back in-flight graph");
            token.cancel();
        }
    });
}
