fn main() {
    hookgen_cli::init_tracing();
    std::process::exit(hookgen_cli::run_cli(std::env::args().collect()));
}
