fn main() -> anyhow::Result<()> {
    guessit_grader::run()
}
