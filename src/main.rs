fn main() {
    #[cfg(feature = "cli")]
    lmu_rotate::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("lmu-rotate: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
