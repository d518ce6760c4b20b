//! Build script that ensures Cargo rebuilds when migrations change.
//!
//! `embed_migrations!` reads the migration files at compile time, but Cargo
//! does not track them on its own. Emitting `rerun-if-changed` keeps
//! incremental builds in step with new or edited migrations.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
