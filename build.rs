fn main() {
    println!("cargo:rerun-if-env-changed=PETFEEDER_CONFIG");

    // ESP-IDF link arguments are only needed for the firmware binary.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
