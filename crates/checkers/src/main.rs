fn main() -> anyhow::Result<()> {
    checkers::run()?;
    Ok(())
}
