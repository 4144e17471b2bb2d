fn main() {
    if let Err(e) = cypher_desktop_lib::run() {
        eprintln!("cypher-desktop: {e}");
        std::process::exit(1);
    }
}
