fn main() {
    if let Err(e) = sturzdoku_lib::run() {
        eprintln!("sturzdoku: {e}");
        std::process::exit(1);
    }
}
