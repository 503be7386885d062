use clap::Parser;
use sheetpack::cli::{Args, run};
use sheetpack_log::init_logger;

fn main() {
    let args = Args::parse();
    if let Err(e) = init_logger(args.log_level()) {
        eprintln!("failed to initialize logger: {e}");
    }
    let n_exit_code = run(&args);
    log::logger().flush();
    std::process::exit(n_exit_code);
}
