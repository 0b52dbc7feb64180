use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hanzi_notebook::content::Library;
use hanzi_notebook::state::AppState;
use hanzi_notebook::store::{ProgressStore, SettingsStore};
use hanzi_notebook::{config, handlers, paths};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hanzi_notebook=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let port = config::load_server_port();

  let library = Library::load();
  if library.total_words() == 0 {
    tracing::warn!(
      "No word collections found under {}",
      paths::words_dir().display()
    );
  }

  let progress = ProgressStore::open(paths::progress_path());
  let settings = SettingsStore::open(paths::settings_path());
  let state = AppState::new(library, progress, settings);

  let app = handlers::app(state);

  let bind_addr = config::server_bind_addr(port);
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
