#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    // Set up logging; RUST_LOG controls verbosity
    env_logger::init();

    // File dialogs run on the tokio runtime entered here
    connect_the_dots::run_app()
}

// The web build starts from `connect_the_dots::start_web`.
#[cfg(target_arch = "wasm32")]
fn main() {}
