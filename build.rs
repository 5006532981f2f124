extern crate protobuf_codegen_pure;

use std::fs;

const MOD: &[u8] = b"
pub use self::cast_channel::*;

mod cast_channel;
";

fn main() {
    println!("cargo:rerun-if-changed=proto/cast_channel.proto");

    fs::create_dir_all("src/proto").expect("Failed to create src/proto");

    protobuf_codegen_pure::Codegen::new()
        .out_dir("src/proto")
        .inputs(&["proto/cast_channel.proto"])
        .include("proto")
        .run()
        .expect("protoc");

    fs::write("src/proto/mod.rs", MOD).expect("Failed to write proto/mod.rs");
}
