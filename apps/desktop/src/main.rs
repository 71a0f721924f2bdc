fn main() -> anyhow::Result<()> {
    quadrolingo_lib::run()
}
