fn main() {
    if let Err(err) = csv_triage::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
