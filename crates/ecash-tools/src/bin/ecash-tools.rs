fn main() -> ecash_tools::Result<()> {
    ecash_tools::run()
}
