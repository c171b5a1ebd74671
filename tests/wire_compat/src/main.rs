fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use devcenter_api::{
        AppLookupResponse, NotesUpdate, PackageResponse, PackageStateUpdate, PackageStatus,
        UploadResponse,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type.
    fn parse_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        serde_json::from_value(load_fixture(name))
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"))
    }

    /// Deserializes a request body fixture, re-serializes it, and compares
    /// the JSON values exactly.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = parse_fixture(name);
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
    }

    // --- Response bodies ---

    #[test]
    fn fixture_app_lookup() {
        let lookup: AppLookupResponse = parse_fixture("app_lookup.json");
        let ids: Vec<u64> = lookup
            .data
            .unwrap_or_default()
            .iter()
            .map(|r| r.id.get())
            .collect();
        assert_eq!(ids, [1843, 2210]);
    }

    #[test]
    fn fixture_app_lookup_empty() {
        let lookup: AppLookupResponse = parse_fixture("app_lookup_empty.json");
        assert_eq!(lookup.data, Some(Vec::new()));
    }

    #[test]
    fn fixture_package_upload() {
        let upload: UploadResponse = parse_fixture("package_upload.json");
        assert_eq!(upload.data.id.get(), 58211);
    }

    #[test]
    fn fixture_package_status_draft() {
        let package: PackageResponse = parse_fixture("package_status_draft.json");
        assert_eq!(package.data.attributes.status, PackageStatus::Draft);
        assert!(package.data.attributes.status.is_terminal());
    }

    #[test]
    fn fixture_package_status_failure() {
        let package: PackageResponse = parse_fixture("package_status_failure.json");
        let attributes = package.data.attributes;
        assert_eq!(attributes.status, PackageStatus::Failure);
        assert_eq!(
            attributes.notes.as_deref(),
            Some("Tests failed: 2 of 31 test cases did not pass")
        );
    }

    #[test]
    fn fixture_package_status_pending() {
        let package: PackageResponse = parse_fixture("package_status_pending.json");
        let attributes = package.data.attributes;
        assert_eq!(attributes.status, PackageStatus::Other("deploying".into()));
        assert!(!attributes.status.is_terminal());
        assert_eq!(attributes.notes, None);
    }

    // --- Request bodies ---

    #[test]
    fn fixture_notes_update() {
        roundtrip_test::<NotesUpdate>("notes_update.json");
    }

    #[test]
    fn fixture_publish_update() {
        roundtrip_test::<PackageStateUpdate>("publish_update.json");
        assert_eq!(
            serde_json::to_value(PackageStateUpdate::published()).unwrap(),
            load_fixture("publish_update.json")
        );
    }
}
