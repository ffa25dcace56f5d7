mod config;
mod prefs_store;
mod session;
mod trigger;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use config::ServerConfig;
use prefs_store::PrefsStore;
use session::PlayerSession;
use trigger::{handle_break_attempt, BreakDecision};

use qmine_blocks::vanilla_registry;
use qmine_world::{Actor, BlockPos, ItemStack, MemoryActor, MemoryDimension, Permutation};

const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn main() {
    let config = match ServerConfig::load_or_default("qmine.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load qmine.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("qmine v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = match vanilla_registry() {
        Ok(r) => Arc::new(r),
        Err(e) => {
            eprintln!("Failed to build the block registry: {e}");
            std::process::exit(1);
        }
    };
    info!("block registry ready, {} ids registered", registry.len());

    let mut prefs_store = match PrefsStore::open(&config.prefs.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open {}: {e}", config.prefs.path);
            std::process::exit(1);
        }
    };
    info!(
        "prefs store at {} holds {} players",
        config.prefs.path,
        prefs_store.len()
    );

    let limits = config.mining.to_limits();

    // Demo world: a coal vein buried below the player.
    let mut dim = MemoryDimension::new("overworld");
    let vein_origin = BlockPos::new(0, 10, 0);
    for dx in 0..4 {
        for dy in 0..2 {
            dim.place(
                vein_origin.offset(dx, dy, 0),
                Permutation::new("minecraft:coal_ore"),
            );
        }
    }

    let pickaxe = ItemStack::new("minecraft:iron_pickaxe", 1)
        .with_tag("minecraft:is_pickaxe")
        .with_tag("minecraft:iron_tier")
        .with_durability(250);
    let mut steve = MemoryActor::new("Steve")
        .with_main_hand(pickaxe)
        .sneaking(true)
        .at(20.5, 64.0, 20.5);

    let mut session = PlayerSession::new("Steve", prefs_store.get("Steve"));

    match handle_break_attempt(&mut session, &registry, &dim, &steve, vein_origin, limits) {
        BreakDecision::RunStarted => info!("mining run started at {vein_origin:?}"),
        other => {
            warn!("break attempt at {vein_origin:?} did not start a run: {other:?}");
            return;
        }
    }

    while session.has_active_task() {
        session.tick(&mut dim, &mut steve);
        std::thread::sleep(TICK_INTERVAL);
    }

    info!(
        "run complete: {} coal collected, {} xp gained",
        steve.held_amount_of("minecraft:coal"),
        steve.experience()
    );
    if let Some(tool) = steve.main_hand() {
        if let Some(durability) = tool.durability {
            info!("pickaxe has {} durability left", durability.remaining());
        }
    }

    if let Err(e) = prefs_store.set("Steve", session.prefs.clone()) {
        warn!("failed to persist player prefs: {e}");
    }
    info!("qmine shut down.");
}
