use std::env;

fn main() {
    // Version string shown by `butterfly-nav --version`
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    match env::var("BUTTERFLY_BUILD_TAG") {
        Ok(tag) if !tag.is_empty() => {
            println!("cargo:rustc-env=BUTTERFLY_VERSION={version}+{tag}");
        }
        _ => println!("cargo:rustc-env=BUTTERFLY_VERSION={version}"),
    }

    println!("cargo:rerun-if-env-changed=BUTTERFLY_BUILD_TAG");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
