fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let report = list_demo::run()?;
    println!("{report}");
    log::debug!("{}", report.tree_dump);
    Ok(())
}
