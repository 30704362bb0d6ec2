fn main() {
    #[cfg(feature = "cli")]
    seqcmp::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("seqcmp: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
