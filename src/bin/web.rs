#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("vtracker-web must be built for wasm32-unknown-unknown");
}

#[cfg(target_arch = "wasm32")]
fn main() -> anyhow::Result<()> {
    console_error_panic_hook::set_once();
    vtracker::runtime::web::run()
}
