/**
 * Minimal integration demo for the HuntGlitch Rust SDK.
 *
 * Export your credentials, then run:
 *
 *   PROJECT_KEY=... DELIVERABLE_KEY=... cargo run -p huntglitch_demo
 *   cargo run -p huntglitch_demo -- --panic    # test panic capture
 *   cargo run -p huntglitch_demo -- --silent   # swallow delivery failures
 *
 * Diagnostic output from the SDK is emitted through `tracing`; set
 * RUST_LOG=huntglitch_core=debug to see per-attempt details.
 */
use huntglitch::{ClientConfig, HuntGlitchClient, LogLevel};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let test_panic = args.iter().any(|a| a == "--panic");
    let silent = args.iter().any(|a| a == "--silent");

    /*
     * Initialize the SDK from the environment. The panic hook is installed
     * by default, so the --panic path below gets reported automatically.
     */
    let config = ClientConfig::from_env()
        .expect("PROJECT_KEY and DELIVERABLE_KEY must be set")
        .with_silent_failures(silent);

    huntglitch::init(config.clone()).expect("failed to initialize HuntGlitch");
    println!("[demo] SDK initialized");

    /*
     * Send a plain log message through the process-wide client.
     */
    huntglitch::send_log(LogLevel::Info, "Hello from the HuntGlitch Rust SDK!");
    println!("[demo] Sent a log message");

    /*
     * Capture a real error (file not found).
     */
    match std::fs::read_to_string("/nonexistent/path.txt") {
        Ok(_) => unreachable!(),
        Err(e) => {
            huntglitch::capture_exception(&e);
            println!("[demo] Captured an io::Error: {e}");
        }
    }

    /*
     * A dedicated client exposes the delivery outcome, unlike the
     * fire-and-forget free functions above.
     */
    let client = HuntGlitchClient::new(config).expect("config was already validated");
    match client.send_log(LogLevel::Warning, "demo is almost done", None, None) {
        Ok(result) => println!(
            "[demo] Delivered: {} (attempts: {})",
            result.is_delivered(),
            result.attempts()
        ),
        Err(err) => println!("[demo] Delivery failed: {err}"),
    }

    /*
     * Test panic capture if requested. The panic hook intercepts this and
     * reports it before the process aborts.
     */
    if test_panic {
        println!("[demo] Triggering a panic...");
        panic!("Test panic from the HuntGlitch demo");
    }

    println!("[demo] Done.");
}
