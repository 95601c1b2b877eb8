fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match bankdash_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[bankdash-core] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = bankdash_core::runtime::run_with_options(options) {
        bankdash_core::logging::error(&format!("runtime failed: {error}"));
        eprintln!("[bankdash-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
