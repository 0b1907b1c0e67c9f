//! lara-server entry point.

use lara::{
    AppState, Config, api,
    cli::{Cli, Commands, output::Output},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        Output::default().error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    init_tracing(cli.verbose);

    let mut config = Config::from_env()?;

    let (host, port) = match cli.command {
        Some(Commands::Config { validate }) => return show_config(&config, validate, &output),
        Some(Commands::Serve { host, port }) => (host, port),
        None => (None, None),
    };
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    serve(config, &output).await
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lara=debug,tower_http=debug"
    } else {
        "lara=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn show_config(config: &Config, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.info(&format!(
        "Server: {}:{}",
        config.server.host, config.server.port
    ));
    output.info(&format!(
        "LLM provider: {} (model: {})",
        config.llm.provider,
        config.llm.active_model()
    ));
    output.info(&format!("Ollama URL: {}", config.llm.ollama_url));
    output.info(&format!(
        "Embedding model: {} (cache: {} entries)",
        config.rag.embedding_model, config.rag.embed_cache_size
    ));
    output.info(&format!("Top-k: {}", config.rag.top_k));

    if validate {
        config.validate()?;
        output.success("Configuration is valid");
    }
    Ok(())
}

async fn serve(config: Config, output: &Output) -> anyhow::Result<()> {
    output.banner();
    output.info(&format!(
        "Chat model: {} via {}",
        config.llm.active_model(),
        config.llm.provider
    ));
    output.info(&format!("Embedding model: {}", config.rag.embedding_model));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    output.success(&format!("Listening on http://{}", listener.local_addr()?));

    axum::serve(listener, app).await?;
    Ok(())
}
