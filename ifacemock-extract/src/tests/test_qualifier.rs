use super::check_files;
use crate::{import_table, Import, Qualifier, UsedImports};
use ifacemock_typechecker::{PackageId, TypeEnv};
use pretty_assertions::assert_eq;

/// Qualify `path` from the point of view of the package's first file
fn qualify(env: &TypeEnv, package: PackageId, path: &str, used: &mut UsedImports) -> String {
    let first = env.package(package).files[0];
    let table = import_table(&env.file(first).ast);
    let target = env.package_by_path(path).expect("package should be loaded");
    let mut qualifier = Qualifier::new(env, package, &table, used);
    qualifier.qualify(target, env.package(target))
}

#[test]
fn test_own_package_is_unqualified() {
    let (env, package) = check_files(&[("a.go", "package test\n\ntype T int\n")]);
    let mut used = UsedImports::new();

    let table = import_table(&env.file(env.package(package).files[0]).ast);
    let mut qualifier = Qualifier::new(&env, package, &table, &mut used);
    assert_eq!(qualifier.qualify(package, env.package(package)), "");
    assert_eq!(used.imports().count(), 0);
}

#[test]
fn test_plain_import_uses_the_package_name() {
    let (env, package) = check_files(&[("a.go", "package test\n\nimport \"io\"\n")]);
    let mut used = UsedImports::new();

    assert_eq!(qualify(&env, package, "io", &mut used), "io");
    assert_eq!(used.imports().cloned().collect::<Vec<_>>(), vec![Import::new("io")]);
}

#[test]
fn test_renamed_import_uses_the_alias() {
    let (env, package) = check_files(&[("a.go", "package test\n\nimport stdio \"io\"\n")]);
    let mut used = UsedImports::new();

    assert_eq!(qualify(&env, package, "io", &mut used), "stdio");
    assert_eq!(
        used.imports().cloned().collect::<Vec<_>>(),
        vec![Import::with_alias("stdio", "io")]
    );
}

#[test]
fn test_dot_import_is_unqualified_but_used() {
    let (env, package) = check_files(&[("a.go", "package test\n\nimport . \"io\"\n")]);
    let mut used = UsedImports::new();

    assert_eq!(qualify(&env, package, "io", &mut used), "");
    assert_eq!(
        used.imports().cloned().collect::<Vec<_>>(),
        vec![Import::with_alias(".", "io")]
    );
}

#[test]
fn test_blank_import_is_skipped_for_a_later_one() {
    let (env, package) = check_files(&[(
        "a.go",
        "package test\n\nimport (\n\t_ \"io\"\n\tstdio \"io\"\n)\n",
    )]);
    let mut used = UsedImports::new();

    assert_eq!(qualify(&env, package, "io", &mut used), "stdio");
    assert!(used.synthesized().is_empty());
}

#[test]
fn test_uses_are_deduplicated_by_path() {
    let (env, package) = check_files(&[("a.go", "package test\n\nimport (\n\t\"io\"\n\t\"fmt\"\n)\n")]);
    let mut used = UsedImports::new();

    qualify(&env, package, "io", &mut used);
    qualify(&env, package, "fmt", &mut used);
    qualify(&env, package, "io", &mut used);

    let (imports, synthesized) = used.into_parts();
    assert_eq!(imports, vec![Import::new("io"), Import::new("fmt")]);
    assert!(synthesized.is_empty());
}

#[test]
fn test_missing_import_is_synthesized() {
    // Only the second file imports io for real
    let (env, package) = check_files(&[
        ("a.go", "package test\n\nimport _ \"io\"\n"),
        ("b.go", "package test\n\nimport \"io\"\n\ntype R io.Reader\n"),
    ]);
    let mut used = UsedImports::new();

    assert_eq!(qualify(&env, package, "io", &mut used), "io");
    qualify(&env, package, "io", &mut used);

    let (imports, synthesized) = used.into_parts();
    assert_eq!(imports, vec![Import::new("io")]);
    assert_eq!(synthesized.len(), 1);
    assert_eq!(synthesized[0].path, "io");
    assert_eq!(synthesized[0].name, "io");
    assert_eq!(synthesized[0].collision, None);
}

#[test]
fn test_synthesized_name_clashing_with_an_import() {
    let (env, package) = check_files(&[
        ("a.go", "package test\n\nimport io \"github.com/acme/io\"\n"),
        ("b.go", "package test\n\nimport \"io\"\n"),
    ]);
    let mut used = UsedImports::new();

    qualify(&env, package, "io", &mut used);

    let synthesized = used.synthesized();
    assert_eq!(
        synthesized[0].collision.as_deref(),
        Some("the name of import \"github.com/acme/io\"")
    );
}

#[test]
fn test_synthesized_name_clashing_with_a_declaration() {
    let (env, package) = check_files(&[
        ("a.go", "package test\n\ntype sort struct{}\n"),
        ("b.go", "package test\n\nimport \"sort\"\n"),
    ]);
    let mut used = UsedImports::new();

    qualify(&env, package, "sort", &mut used);

    assert_eq!(
        used.synthesized()[0].collision.as_deref(),
        Some("declared in package test")
    );
}
