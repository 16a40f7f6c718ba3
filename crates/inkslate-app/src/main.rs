//! Main application entry point.

fn main() {
    env_logger::init();

    if let Err(e) = inkslate_app::run() {
        log::error!("{}", e);
        eprintln!("inkslate: {}", e);
        std::process::exit(1);
    }
}
