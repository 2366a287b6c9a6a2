fn main() {
    if let Err(err) = edugraph::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
