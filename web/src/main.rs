use tracing::Level;

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "launching site");
    dioxus::launch(ui::Site);
}
