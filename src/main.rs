fn main() {
    if let Err(err) = biodata_renderer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
