fn main() {
    squares_cli::cli::run();
}
