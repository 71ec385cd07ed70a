fn main() {
    // sqlx::migrate! embeds migrations/ at compile time, but cargo doesn't
    // track non-Rust files automatically.
    println!("cargo:rerun-if-changed=migrations");
}
