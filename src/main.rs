// This binary crate is intentionally minimal.
// All engine logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example gate
fn main() {
    println!("filament-nn: a small feed-forward neural network engine in Rust.");
    println!("Run `cargo run --example gate` to see the training demo.");
}
