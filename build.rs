fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let describe = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty", "--tags"])
        .output();

    // gitがない環境（crate配布物など）ではパッケージのバージョンを使う
    let version = match describe {
        Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
        _ => format!("v{}", std::env::var("CARGO_PKG_VERSION").unwrap_or_default()),
    };

    println!("cargo:rustc-env=GIT_VERSION={}", version);
}
