use indoc::indoc;
use langswitch::{
    FileStorage, HeadlessHost, Language, LanguageContext,
    bundle::{BundleProvider, LprojBundles},
    storage::Storage,
};
use std::{fs, path::Path, rc::Rc};
use tempfile::tempdir;

fn write_table(root: &Path, localization: &str, table: &str, content: &str) {
    let dir = root.join(format!("{}.lproj", localization));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.strings", table)), content).unwrap();
}

fn write_utf16_table(root: &Path, localization: &str, table: &str, content: &str) {
    let dir = root.join(format!("{}.lproj", localization));
    fs::create_dir_all(&dir).unwrap();
    let mut bytes = vec![0xFF, 0xFE];
    for unit in content.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(dir.join(format!("{}.strings", table)), bytes).unwrap();
}

fn sample_tree(root: &Path) {
    write_table(
        root,
        "Base",
        "Localizable",
        indoc! {r#"
            "greeting" = "Hello";
            "fallback_only" = "Base value";
        "#},
    );
    write_table(
        root,
        "en",
        "Localizable",
        indoc! {r#"
            /* Shown on the home screen */
            "greeting" = "Hello";
            "items" = "%d items";
        "#},
    );
    write_utf16_table(
        root,
        "ar",
        "Localizable",
        indoc! {r#"
            "greeting" = "مرحبا";
            "items" = "%d عناصر";
        "#},
    );
    write_table(
        root,
        "ar",
        "Settings",
        indoc! {r#"
            "greeting" = "أهلا";
        "#},
    );
}

#[test]
fn test_lproj_bundles_are_discovered() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let bundles = LprojBundles::new(dir.path());

    assert_eq!(bundles.localizations().unwrap(), vec![Language::Ar, Language::En]);
    let arabic = bundles.bundle(Language::Ar).unwrap();
    assert_eq!(arabic.localized_string("greeting", "Localizable"), Some("مرحبا"));
    assert_eq!(arabic.localized_string("greeting", "Settings"), Some("أهلا"));
    assert!(bundles.bundle(Language::Fr).is_none());
    assert_eq!(
        bundles
            .main_bundle()
            .unwrap()
            .localized_string("fallback_only", "Localizable"),
        Some("Base value")
    );
}

#[test]
fn test_context_over_lproj_directory() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let ctx = LanguageContext::builder()
        .bundles(LprojBundles::new(dir.path()))
        .host(Rc::new(HeadlessHost::new()))
        .build();
    ctx.set_default_language(Language::En).unwrap();
    assert_eq!(ctx.localized_with("items", &[12i64.into()]).unwrap(), "12 items");

    ctx.set_language(Language::Ar).unwrap();
    assert_eq!(ctx.localized_with("items", &[12i64.into()]).unwrap(), "١٢ عناصر");
    assert_eq!(ctx.localized("fallback_only").unwrap(), "Base value");

    let all = ctx.all_expression_localizations("greeting", Language::Ar);
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["Localizable", "Settings"]);
}

#[test]
fn test_file_storage_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs").join("language.json");

    {
        let ctx = LanguageContext::builder()
            .storage(FileStorage::open(&path).unwrap())
            .build();
        ctx.set_default_language(Language::En).unwrap();
        ctx.set_language(Language::He).unwrap();
    }

    let storage = FileStorage::open(&path).unwrap();
    assert_eq!(storage.get("langswitch.defaultLanguage").as_deref(), Some("en"));
    assert_eq!(storage.get("langswitch.selectedLanguage").as_deref(), Some("he"));

    let ctx = LanguageContext::builder().storage(storage).build();
    assert!(ctx.is_right_to_left().unwrap());
}

#[test]
fn test_file_storage_removes_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("language.json");
    let storage = FileStorage::open(&path).unwrap();
    storage.set("key", Some("value")).unwrap();
    storage.set("key", None).unwrap();
    assert_eq!(FileStorage::open(&path).unwrap().get("key"), None);
}

#[test]
fn test_file_storage_rejects_garbage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("language.json");
    fs::write(&path, "not json").unwrap();
    assert!(FileStorage::open(&path).is_err());
}
