fn main() {
    if let Err(err) = order_cleanse::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
