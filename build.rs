//! Build script for fwctl
//!
//! Embeds build-time information (git commit, dirty status, build timestamp)
//! used by `fwctl --version`.

fn main() {
    // Re-run build if the default endpoint override changes
    println!("cargo:rerun-if-env-changed=FWCTL_DEFAULT_API_URL");

    // Embed git commit, build time, and dirty status
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build info");
}
