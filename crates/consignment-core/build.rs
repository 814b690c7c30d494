/// Builds the gRPC client and server code for `consignment.proto` using
/// `tonic-prost-build`.
///
/// The generated messages also derive `serde` traits so that clients can load
/// consignments from JSON documents. Every message is marked
/// `#[serde(default)]`, which lets a JSON document omit any field, the same
/// way a protobuf decoder treats missing fields.
///
/// # Files and Paths
///
/// - Proto file: `proto/consignment.proto`
/// - Includes: `proto/`
/// - Descriptor set: `$OUT_DIR/consignment_descriptor.bin`, used by the server
///   to register gRPC reflection.
///
/// # Output
///
/// ```rust
/// pub mod proto {
///     tonic::include_proto!("consignment");
/// }
/// ```
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("consignment_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();

    config
        .type_attribute(
            ".consignment",
            "#[derive(serde::Serialize, serde::Deserialize)]",
        )
        .type_attribute(".consignment", "#[serde(default)]")
        .file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/consignment.proto"], &["proto"])
        .unwrap();

    println!("cargo:rerun-if-changed=proto/consignment.proto");
}
