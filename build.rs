fn main() {
    // The library and demo build without the webview toolchain.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
