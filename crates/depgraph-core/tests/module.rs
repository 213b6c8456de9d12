use depgraph_core::module::{ModuleId, ModuleKey};

#[test]
fn normalize_drops_extra_attributes() {
    let mut id = ModuleId::new("org.example", "lib", "1.0");
    id.extra.insert("branch".to_string(), "trunk".to_string());
    assert_eq!(id.normalize(), ModuleKey::new("org.example", "lib", "1.0"));
}

#[test]
fn extra_attributes_distinguish_engine_identities() {
    let plain = ModuleId::new("org.example", "lib", "1.0");
    let mut branched = plain.clone();
    branched.extra.insert("branch".to_string(), "trunk".to_string());
    assert_ne!(plain, branched);
    assert_eq!(plain.normalize(), branched.normalize());
}

#[test]
fn coordinate_and_display() {
    let mut id = ModuleId::new("org.example", "lib", "1.0");
    assert_eq!(id.coordinate(), "org.example:lib:1.0");
    assert_eq!(id.to_string(), "org.example:lib:1.0");
    id.extra.insert("branch".to_string(), "trunk".to_string());
    assert_eq!(id.to_string(), "org.example:lib:1.0;branch=trunk");
    assert_eq!(id.coordinate(), "org.example:lib:1.0");
}

#[test]
fn module_key_short() {
    let key = ModuleKey::new("org.example", "lib", "1.0");
    assert_eq!(key.short(), "org.example:lib");
    assert_eq!(key.to_string(), "org.example:lib:1.0");
}
