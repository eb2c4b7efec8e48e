//! Party synchronization gateway.
//!
//! Stores watch-party records, keeps WebSocket members of a party in a
//! local room, and fans messages out across instances over Redis pub/sub.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server
//! cargo run --bin parlor-server -- --host 0.0.0.0 --port 3000 --redis-url redis://127.0.0.1:6379
//! ```

use std::sync::Arc;

use clap::Parser;

use parlor_server::{
    domain::{EventNotifier, FanoutBus, PartyStore},
    infrastructure::{
        bus::{MemoryFanoutBus, RedisFanoutBus},
        notifier::{HttpEventNotifier, LogEventNotifier},
        store::{MemoryPartyStore, RedisPartyStore},
    },
    logger::setup_logger,
    registry::RoomRegistry,
    relay,
    ui::{AppState, Server},
    usecase::{
        CreatePartyUseCase, EndPartyUseCase, GetPartyUseCase, JoinPartyUseCase, LeavePartyUseCase,
        RelayMessageUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "parlor-server")]
#[command(about = "Watch-party synchronization gateway", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Redis URL backing the party store and the fanout bus.
    /// Absent means in-memory single-instance mode.
    #[arg(long)]
    redis_url: Option<String>,

    /// Base URL of the analytics collector. Absent means events are
    /// only logged.
    #[arg(long)]
    analytics_url: Option<String>,

    /// Public base URL advertised in party join links.
    /// Defaults to http://{host}:{port}.
    #[arg(long)]
    public_url: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Store + FanoutBus (Redis or in-memory)
    // 2. EventNotifier
    // 3. RoomRegistry + relay loop
    // 4. UseCases
    // 5. Server

    // 1. Store and bus share the Redis deployment when one is configured
    let (store, bus): (Arc<dyn PartyStore>, Arc<dyn FanoutBus>) = match &args.redis_url {
        Some(url) => {
            let store = match RedisPartyStore::connect(url).await {
                Ok(store) => store,
                Err(e) => {
                    tracing::error!("failed to connect party store to redis: {}", e);
                    std::process::exit(1);
                }
            };
            let bus = match RedisFanoutBus::connect(url).await {
                Ok(bus) => bus,
                Err(e) => {
                    tracing::error!("failed to connect fanout bus to redis: {}", e);
                    std::process::exit(1);
                }
            };
            tracing::info!("using redis at {}", url);
            (Arc::new(store), Arc::new(bus))
        }
        None => {
            tracing::warn!("no --redis-url given, running in single-instance memory mode");
            (
                Arc::new(MemoryPartyStore::new()),
                Arc::new(MemoryFanoutBus::new()),
            )
        }
    };

    // 2. Analytics sink
    let notifier: Arc<dyn EventNotifier> = match &args.analytics_url {
        Some(url) => {
            tracing::info!("sending events to {}", url);
            Arc::new(HttpEventNotifier::new(url.clone()))
        }
        None => Arc::new(LogEventNotifier),
    };

    // 3. Local room registry, fed by this instance's bus subscription
    let registry = Arc::new(RoomRegistry::new());
    relay::spawn_relay(bus.clone(), registry.clone());

    // 4. Create UseCases
    let create_party_usecase = Arc::new(CreatePartyUseCase::new(store.clone(), notifier.clone()));
    let get_party_usecase = Arc::new(GetPartyUseCase::new(store.clone()));
    let join_party_usecase = Arc::new(JoinPartyUseCase::new(registry.clone(), notifier.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(bus.clone(), notifier.clone()));
    let end_party_usecase = Arc::new(EndPartyUseCase::new(
        bus.clone(),
        store.clone(),
        notifier.clone(),
    ));
    let leave_party_usecase = Arc::new(LeavePartyUseCase::new(
        registry.clone(),
        store.clone(),
        notifier.clone(),
        end_party_usecase,
    ));

    let public_url = args
        .public_url
        .unwrap_or_else(|| format!("http://{}:{}", args.host, args.port));

    // 5. Create and run the server
    let server = Server::new(Arc::new(AppState {
        create_party_usecase,
        get_party_usecase,
        join_party_usecase,
        relay_message_usecase,
        leave_party_usecase,
        public_url,
    }));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
