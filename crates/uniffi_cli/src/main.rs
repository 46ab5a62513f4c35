// bindings are generated for the android host, `cargo run -p uniffi_cli -- generate ...`
fn main() {
    uniffi::uniffi_bindgen_main();
}
