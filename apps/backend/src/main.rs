use actix_web::{web, App, HttpServer};
use contaminados::config::store::rng_seed_from_env;
use contaminados::{
    build_state, cors_middleware, routes, RequestTrace, ServerConfig, StoreKind,
    StructuredLogger,
};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    let (store, seed) = match (StoreKind::from_env(), rng_seed_from_env()) {
        (Ok(store), Ok(seed)) => (store, seed),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting Contaminados backend on http://{}:{} ({} store)",
        server.host,
        server.port,
        store.label()
    );
    if seed.is_some() {
        tracing::warn!("GAME_RNG_SEED is set; role and leader draws are deterministic");
    }

    let app_state = match build_state()
        .with_store(store)
        .with_rng_seed_opt(seed)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
