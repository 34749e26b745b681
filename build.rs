fn main() {
    // Release builds bake the fallback images into the binary.
    println!("cargo:rerun-if-changed=assets/images");
}
