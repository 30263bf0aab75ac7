fn main() {
    // Migrations are embedded by `sqlx::migrate!`
    println!("cargo:rerun-if-changed=migrations");
}
